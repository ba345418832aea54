//! Benchmark profiles for the fieldmath engine.
//!
//! - [`reference_profile`]: 100x100 grid (10K elements)
//! - [`stress_profile`]: 1000x1000 grid (1M elements), large enough for
//!   the default parallel threshold
//! - [`missing_pattern`]: deterministic sentinel placement

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use fieldmath_core::FieldId;
use fieldmath_field::{Field, FieldStore};

/// Sentinel used by every profile.
pub const SENTINEL: f64 = -9.99e33;

/// A store holding two same-shaped double-precision operands and a
/// destination.
///
/// Benchmarks write into `out` only, so every iteration sees the same
/// operands.
pub struct Profile {
    /// Registered fields.
    pub store: FieldStore,
    /// First operand.
    pub lhs: FieldId,
    /// Second operand.
    pub rhs: FieldId,
    /// Destination, same shape and sentinel as the operands.
    pub out: FieldId,
}

/// 100x100 grid with roughly 5% missing elements.
pub fn reference_profile() -> Profile {
    build(&[100, 100], 20)
}

/// 1000x1000 grid with roughly 5% missing elements.
pub fn stress_profile() -> Profile {
    build(&[1000, 1000], 20)
}

/// Row-major values where every `stride`-th element (offset by `phase`)
/// is [`SENTINEL`] and the rest lie in `[0.5, 1.5)`.
pub fn missing_pattern(len: usize, stride: usize, phase: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            if stride > 0 && (i + phase) % stride == 0 {
                SENTINEL
            } else {
                0.5 + (i % 97) as f64 / 97.0
            }
        })
        .collect()
}

fn build(shape: &[usize], stride: usize) -> Profile {
    let len = shape.iter().product();
    let mut store = FieldStore::new();
    let lhs = store.insert(masked("lhs", shape, missing_pattern(len, stride, 0)));
    let rhs = store.insert(masked("rhs", shape, missing_pattern(len, stride, stride / 2)));
    let out = store.insert(masked("out", shape, vec![0.0; len]));
    Profile {
        store,
        lhs,
        rhs,
        out,
    }
}

fn masked(name: &str, shape: &[usize], values: Vec<f64>) -> Field {
    let mut field = Field::from_shape_vec(name, shape, values).unwrap();
    field.set_missing_value(SENTINEL).unwrap();
    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmath_ops::Engine;

    fn snapshot(p: &Profile, id: FieldId) -> Vec<u64> {
        let view = p.store.get(id).unwrap().view::<f64>().unwrap();
        view.iter().map(|v| v.to_bits()).collect()
    }

    #[test]
    fn repeated_ops_see_the_same_operands() {
        let mut p = reference_profile();
        let lhs = snapshot(&p, p.lhs);
        let rhs = snapshot(&p, p.rhs);
        let engine = Engine::default();

        engine.divide(&mut p.store, p.out, p.lhs, p.rhs).unwrap();
        let first = snapshot(&p, p.out);
        engine.divide(&mut p.store, p.out, p.lhs, p.rhs).unwrap();

        assert_eq!(snapshot(&p, p.out), first);
        assert_eq!(snapshot(&p, p.lhs), lhs);
        assert_eq!(snapshot(&p, p.rhs), rhs);
    }
}
