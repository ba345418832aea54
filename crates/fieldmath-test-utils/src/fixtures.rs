//! Reusable field fixtures.
//!
//! - [`grid`] / [`constant`] / [`ramp`] build plain fields.
//! - [`masked`] builds a field with a `missing_value` attribute.
//! - [`split_rows`] / [`reassemble`] cut a field into row tiles with
//!   decomposition metadata and stitch them back together.

use fieldmath_core::Element;
use fieldmath_field::{Decomposition, Field, FieldData, FieldElement};
use ndarray::{concatenate, ArrayD, ArrayViewD, Axis, IxDyn, Slice};

/// Placeholder sentinel for single-precision fixtures.
pub const SENTINEL_F32: f32 = 1.0e15;
/// Placeholder sentinel for double-precision fixtures.
pub const SENTINEL_F64: f64 = 1.0e15;

/// A field from row-major values.
pub fn grid<T: FieldElement>(name: &str, shape: &[usize], values: Vec<T>) -> Field {
    Field::from_shape_vec(name, shape, values).expect("values must fill shape")
}

/// A field with every element set to `value`.
pub fn constant<T: FieldElement>(name: &str, shape: &[usize], value: T) -> Field {
    Field::from_array(name, ArrayD::from_elem(IxDyn(shape), value))
}

/// A field whose i-th row-major element is `start + i * step`.
pub fn ramp<T: FieldElement>(name: &str, shape: &[usize], start: f64, step: f64) -> Field {
    let len: usize = shape.iter().product();
    let values = (0..len)
        .map(|i| T::from_param(start + i as f64 * step).expect("ramp value fits T"))
        .collect();
    grid(name, shape, values)
}

/// A field from row-major values with `sentinel` as its `missing_value`.
pub fn masked<T: FieldElement>(name: &str, shape: &[usize], values: Vec<T>, sentinel: T) -> Field {
    let mut field = grid(name, shape, values);
    field
        .set_missing_value(sentinel)
        .expect("sentinel precision matches values");
    field
}

/// Row-major copy of a field's values.
pub fn values<T: FieldElement>(field: &Field) -> Vec<T> {
    field
        .view::<T>()
        .expect("field precision matches T")
        .iter()
        .copied()
        .collect()
}

fn slice_rows<T: Element>(a: &ArrayD<T>, start: usize, end: usize) -> ArrayD<T> {
    a.slice_axis(Axis(0), Slice::from(start..end)).to_owned()
}

/// Cut a field into `tiles` blocks of rows (axis 0).
///
/// Each tile carries the parent's attributes and a [`Decomposition`]
/// placing it in the parent's index space. Leading tiles get one extra
/// row when the rows do not divide evenly.
pub fn split_rows(field: &Field, tiles: u32) -> Vec<Field> {
    let shape = field.shape().to_vec();
    let rows = shape[0];
    let base = rows / tiles as usize;
    let extra = rows % tiles as usize;
    let mut out = Vec::with_capacity(tiles as usize);
    let mut start = 0;
    for t in 0..tiles {
        let n = base + usize::from((t as usize) < extra);
        let end = start + n;
        let data = match field.data() {
            FieldData::Single(a) => FieldData::Single(slice_rows(a, start, end)),
            FieldData::Double(a) => FieldData::Double(slice_rows(a, start, end)),
        };
        let mut offset = vec![0; shape.len()];
        offset[0] = start;
        let decomposition =
            Decomposition::tiled(&shape, &offset, t, tiles).expect("tile metadata is consistent");
        let mut tile = Field::new(format!("{}[{t}]", field.name()), data)
            .with_decomposition(decomposition)
            .expect("tile fits its parent");
        for (key, value) in field.attributes().iter() {
            tile.set_attribute(key, value.clone());
        }
        out.push(tile);
        start = end;
    }
    out
}

fn stack<T: FieldElement>(tiles: &[Field]) -> ArrayD<T> {
    let views: Vec<ArrayViewD<'_, T>> = tiles
        .iter()
        .map(|t| t.view::<T>().expect("tiles share a precision"))
        .collect();
    concatenate(Axis(0), &views).expect("tiles share trailing extents")
}

/// Stitch row tiles back into one field named `name`.
pub fn reassemble(name: &str, tiles: &[Field]) -> Field {
    let data = match tiles.first().map(Field::data) {
        Some(FieldData::Double(_)) => FieldData::Double(stack::<f64>(tiles)),
        _ => FieldData::Single(stack::<f32>(tiles)),
    };
    let mut field = Field::new(name, data);
    if let Some(first) = tiles.first() {
        for (key, value) in first.attributes().iter() {
            field.set_attribute(key, value.clone());
        }
    }
    field
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_then_reassemble() {
        let f = ramp::<f64>("r", &[5, 2], 0.0, 1.0);
        let tiles = split_rows(&f, 2);
        assert_eq!(tiles[0].shape(), &[3, 2]);
        assert_eq!(tiles[1].shape(), &[2, 2]);
        assert_eq!(tiles[1].decomposition().offset(), &[3, 0]);
        assert_eq!(tiles[1].decomposition().global_shape(), &[5, 2]);
        let back = reassemble("r", &tiles);
        assert_eq!(values::<f64>(&back), values::<f64>(&f));
    }

    #[test]
    fn masked_sets_attribute() {
        let f = masked("m", &[2], vec![1.0f32, SENTINEL_F32], SENTINEL_F32);
        assert_eq!(
            f.missing_value::<f32>(),
            Ok(fieldmath_core::MissingValue::Sentinel(SENTINEL_F32))
        );
    }
}
