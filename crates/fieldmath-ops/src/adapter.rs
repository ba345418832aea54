//! Field adapter: typed operand extraction and result commit.
//!
//! Operands are read as contiguous row-major slices, borrowed directly
//! when the array is in standard layout and copied otherwise. Results are
//! computed into a scratch buffer and committed here in one step, so a
//! destination that is also a source is never read after being written.

use std::borrow::Cow;

use fieldmath_core::{MissingValue, OpError, Precision};
use fieldmath_field::{Field, FieldElement};

/// One source field, unwrapped.
pub(crate) struct Operand<'a, T: FieldElement> {
    pub values: Cow<'a, [T]>,
    pub missing: MissingValue<T>,
}

fn wrong_precision(field: &Field, expected: Precision) -> OpError {
    OpError::PrecisionMismatch {
        name: field.name().to_string(),
        expected,
        found: field.precision(),
    }
}

/// Unwrap a source field's values and sentinel.
pub(crate) fn operand<T: FieldElement>(field: &Field) -> Result<Operand<'_, T>, OpError> {
    let array = T::array(field.data()).ok_or_else(|| wrong_precision(field, T::PRECISION))?;
    let values = match array.as_slice() {
        Some(slice) => Cow::Borrowed(slice),
        None => Cow::Owned(array.iter().copied().collect()),
    };
    Ok(Operand {
        values,
        missing: field.missing_value::<T>()?,
    })
}

/// Pick the sentinel written for missing outputs.
///
/// The destination's own sentinel wins. Without one, the first operand
/// sentinel is used and returned as the value the destination must adopt.
pub(crate) fn output_missing<T: FieldElement>(
    dest: MissingValue<T>,
    operands: &[Operand<'_, T>],
) -> (MissingValue<T>, Option<T>) {
    let out = operands.iter().fold(dest, |acc, o| acc.or(o.missing));
    let adopt = if dest.is_absent() { out.sentinel() } else { None };
    (out, adopt)
}

/// Write computed values into the destination's storage.
pub(crate) fn commit<T: FieldElement>(
    field: &mut Field,
    values: &[T],
    adopt: Option<T>,
) -> Result<(), OpError> {
    if field.precision() != T::PRECISION {
        return Err(wrong_precision(field, T::PRECISION));
    }
    if let Some(array) = T::array_mut(field.data_mut()) {
        match array.as_slice_mut() {
            Some(slice) => slice.copy_from_slice(values),
            None => array
                .iter_mut()
                .zip(values)
                .for_each(|(dst, &v)| *dst = v),
        }
    }
    if let Some(sentinel) = adopt {
        field.set_missing_value(sentinel)?;
    }
    Ok(())
}
