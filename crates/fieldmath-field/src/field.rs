//! The [`Field`] type and its precision-tagged storage.

use fieldmath_core::{MissingValue, OpError, Precision, TypeKind};
use ndarray::{ArrayD, ArrayViewD, ArrayViewMutD, IxDyn};

use crate::attribute::{AttrValue, Attributes, MISSING_VALUE};
use crate::decomposition::Decomposition;
use crate::element::FieldElement;
use crate::error::FieldError;

/// Dense N-d storage in one of the two supported precisions.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldData {
    /// Single-precision elements.
    Single(ArrayD<f32>),
    /// Double-precision elements.
    Double(ArrayD<f64>),
}

impl FieldData {
    /// Precision of the stored elements.
    pub fn precision(&self) -> Precision {
        match self {
            Self::Single(_) => Precision::Single,
            Self::Double(_) => Precision::Double,
        }
    }

    /// Local extents.
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Single(a) => a.shape(),
            Self::Double(a) => a.shape(),
        }
    }

    /// Number of locally resident elements.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(a) => a.len(),
            Self::Double(a) => a.len(),
        }
    }

    /// Returns `true` if no elements are resident.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named, typed N-d array with attributes and decomposition metadata.
///
/// Invariant: every element is either a valid value or bit-equal to the
/// field's `missing_value` attribute. There is no separate mask.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    name: String,
    data: FieldData,
    attributes: Attributes,
    decomposition: Decomposition,
}

impl Field {
    /// Wrap existing storage. The field covers the whole grid and has no
    /// attributes.
    pub fn new(name: impl Into<String>, data: FieldData) -> Self {
        let decomposition = Decomposition::whole(data.shape());
        Self {
            name: name.into(),
            data,
            attributes: Attributes::new(),
            decomposition,
        }
    }

    /// Wrap a typed array.
    pub fn from_array<T: FieldElement>(name: impl Into<String>, array: ArrayD<T>) -> Self {
        Self::new(name, T::into_data(array))
    }

    /// Build a field from row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ShapeLength`] if `values` does not fill `shape`.
    pub fn from_shape_vec<T: FieldElement>(
        name: impl Into<String>,
        shape: &[usize],
        values: Vec<T>,
    ) -> Result<Self, FieldError> {
        let len = values.len();
        let array =
            ArrayD::from_shape_vec(IxDyn(shape), values).map_err(|_| FieldError::ShapeLength {
                shape: shape.to_vec(),
                len,
            })?;
        Ok(Self::from_array(name, array))
    }

    /// A zero-filled field of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::UnsupportedKind`] for integer kinds.
    pub fn zeros(
        name: impl Into<String>,
        shape: &[usize],
        kind: TypeKind,
    ) -> Result<Self, FieldError> {
        let data = match kind {
            TypeKind::R4 => FieldData::Single(ArrayD::zeros(IxDyn(shape))),
            TypeKind::R8 => FieldData::Double(ArrayD::zeros(IxDyn(shape))),
            TypeKind::I4 | TypeKind::I8 => return Err(FieldError::UnsupportedKind { kind }),
        };
        Ok(Self::new(name, data))
    }

    /// Attach decomposition metadata.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidDecomposition`] if the local array does
    /// not fit where the decomposition places it.
    pub fn with_decomposition(mut self, decomposition: Decomposition) -> Result<Self, FieldError> {
        decomposition.check(self.data.shape())?;
        self.decomposition = decomposition;
        Ok(self)
    }

    /// Name used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Storage precision.
    pub fn precision(&self) -> Precision {
        self.data.precision()
    }

    /// Local extents.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of locally resident elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if no elements are resident.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw storage.
    pub fn data(&self) -> &FieldData {
        &self.data
    }

    /// Mutable raw storage.
    pub fn data_mut(&mut self) -> &mut FieldData {
        &mut self.data
    }

    /// Read-only view of the local array, `None` if the field does not
    /// store `T`.
    pub fn view<T: FieldElement>(&self) -> Option<ArrayViewD<'_, T>> {
        T::array(&self.data).map(|a| a.view())
    }

    /// Writable view of the local array, `None` if the field does not
    /// store `T`.
    pub fn view_mut<T: FieldElement>(&mut self) -> Option<ArrayViewMutD<'_, T>> {
        T::array_mut(&mut self.data).map(|a| a.view_mut())
    }

    /// Decomposition metadata.
    pub fn decomposition(&self) -> &Decomposition {
        &self.decomposition
    }

    /// All attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Look up one attribute.
    pub fn attribute(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    /// Set an attribute, returning the previous value.
    ///
    /// No checking is done here; a `missing_value` of the wrong kind is
    /// reported when an operation reads it.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: AttrValue) -> Option<AttrValue> {
        self.attributes.set(key, value)
    }

    /// Remove an attribute.
    pub fn remove_attribute(&mut self, key: &str) -> Option<AttrValue> {
        self.attributes.remove(key)
    }

    /// The field's sentinel, read from the `missing_value` attribute.
    ///
    /// An absent attribute yields [`MissingValue::Absent`].
    ///
    /// # Errors
    ///
    /// - [`OpError::PrecisionMismatch`] if `T` is not the field's precision,
    ///   or the attribute is a real of the other precision.
    /// - [`OpError::UnsupportedPrecision`] if the attribute is an integer.
    /// - [`OpError::InvalidAttribute`] if the attribute is text.
    pub fn missing_value<T: FieldElement>(&self) -> Result<MissingValue<T>, OpError> {
        self.expect_precision(T::PRECISION)?;
        let Some(value) = self.attributes.get(MISSING_VALUE) else {
            return Ok(MissingValue::Absent);
        };
        if let Some(sentinel) = T::from_attr(value) {
            return Ok(MissingValue::Sentinel(sentinel));
        }
        match value.type_kind() {
            Some(kind) => Err(OpError::PrecisionMismatch {
                name: self.name.clone(),
                expected: T::PRECISION,
                found: kind.precision()?,
            }),
            None => Err(OpError::InvalidAttribute {
                name: self.name.clone(),
                reason: "value is text, not a number".into(),
            }),
        }
    }

    /// Set the `missing_value` attribute.
    ///
    /// # Errors
    ///
    /// Returns [`OpError::PrecisionMismatch`] if `T` is not the field's
    /// precision.
    pub fn set_missing_value<T: FieldElement>(&mut self, sentinel: T) -> Result<(), OpError> {
        self.expect_precision(T::PRECISION)?;
        self.attributes.set(MISSING_VALUE, sentinel.into_attr());
        Ok(())
    }

    /// Drop the `missing_value` attribute, returning to no-propagation mode.
    pub fn clear_missing_value(&mut self) -> Option<AttrValue> {
        self.attributes.remove(MISSING_VALUE)
    }

    fn expect_precision(&self, found: Precision) -> Result<(), OpError> {
        if self.precision() == found {
            Ok(())
        } else {
            Err(OpError::PrecisionMismatch {
                name: self.name.clone(),
                expected: self.precision(),
                found,
            })
        }
    }
}
