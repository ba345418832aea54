//! Typed access to field storage.

use fieldmath_core::Element;
use ndarray::ArrayD;

use crate::attribute::AttrValue;
use crate::field::FieldData;

/// An [`Element`] that fields can store.
///
/// Connects the precision-generic engine to the precision-tagged
/// [`FieldData`] enum: each method returns `None` when the stored
/// precision is not `Self`'s.
pub trait FieldElement: Element {
    /// Borrow the array if it holds `Self`.
    fn array(data: &FieldData) -> Option<&ArrayD<Self>>;

    /// Mutably borrow the array if it holds `Self`.
    fn array_mut(data: &mut FieldData) -> Option<&mut ArrayD<Self>>;

    /// Wrap an array of `Self`.
    fn into_data(array: ArrayD<Self>) -> FieldData;

    /// Read an attribute value of exactly this precision.
    fn from_attr(value: &AttrValue) -> Option<Self>;

    /// Store a value as an attribute of this precision.
    fn into_attr(self) -> AttrValue;
}

impl FieldElement for f32 {
    fn array(data: &FieldData) -> Option<&ArrayD<Self>> {
        match data {
            FieldData::Single(a) => Some(a),
            FieldData::Double(_) => None,
        }
    }

    fn array_mut(data: &mut FieldData) -> Option<&mut ArrayD<Self>> {
        match data {
            FieldData::Single(a) => Some(a),
            FieldData::Double(_) => None,
        }
    }

    fn into_data(array: ArrayD<Self>) -> FieldData {
        FieldData::Single(array)
    }

    fn from_attr(value: &AttrValue) -> Option<Self> {
        match value {
            AttrValue::R4(v) => Some(*v),
            _ => None,
        }
    }

    fn into_attr(self) -> AttrValue {
        AttrValue::R4(self)
    }
}

impl FieldElement for f64 {
    fn array(data: &FieldData) -> Option<&ArrayD<Self>> {
        match data {
            FieldData::Double(a) => Some(a),
            FieldData::Single(_) => None,
        }
    }

    fn array_mut(data: &mut FieldData) -> Option<&mut ArrayD<Self>> {
        match data {
            FieldData::Double(a) => Some(a),
            FieldData::Single(_) => None,
        }
    }

    fn into_data(array: ArrayD<Self>) -> FieldData {
        FieldData::Double(array)
    }

    fn from_attr(value: &AttrValue) -> Option<Self> {
        match value {
            AttrValue::R8(v) => Some(*v),
            _ => None,
        }
    }

    fn into_attr(self) -> AttrValue {
        AttrValue::R8(self)
    }
}
