//! The elementwise compute-or-propagate rule.
//!
//! Inputs are tested against their own [`MissingValue`]; missing and
//! domain-violating elements are written with the output's sentinel. When
//! the output declares no sentinel, a missing input is copied through
//! unchanged (it is the only sentinel available).

use fieldmath_core::{DomainPolicy, Element, MissingValue, OpError};
use rayon::prelude::*;

use crate::options::KernelOptions;
use crate::report::KernelReport;

/// Write `value` into every element of `out`.
///
/// Nothing is read, so nothing propagates. Elements are counted as
/// missing only if `value` itself is the output sentinel.
pub fn fill<T: Element>(
    out: &mut [T],
    value: T,
    out_mv: MissingValue<T>,
    opts: &KernelOptions,
) -> KernelReport {
    if opts.is_parallel(out.len()) {
        out.par_chunks_mut(opts.chunk()).for_each(|c| c.fill(value));
    } else {
        out.fill(value);
    }
    let mut report = KernelReport::with_elements(out.len());
    if out_mv.is_missing(value) {
        report.missing = out.len();
    }
    report
}

/// Apply `f` to every element of `src`, writing into `out`.
///
/// # Errors
///
/// Returns [`OpError::ShapeMismatch`] if the slices differ in length.
pub fn map_unary<T, F>(
    src: &[T],
    src_mv: MissingValue<T>,
    out: &mut [T],
    out_mv: MissingValue<T>,
    opts: &KernelOptions,
    f: F,
) -> Result<KernelReport, OpError>
where
    T: Element,
    F: Fn(T) -> T + Sync,
{
    check_len("source", out.len(), src.len())?;
    let policy = opts.domain_policy;
    if opts.is_parallel(out.len()) {
        let chunk = opts.chunk();
        Ok(out
            .par_chunks_mut(chunk)
            .zip(src.par_chunks(chunk))
            .enumerate()
            .map(|(i, (o, s))| unary_chunk(i * chunk, s, src_mv, o, out_mv, policy, &f))
            .reduce(KernelReport::default, KernelReport::merge))
    } else {
        Ok(unary_chunk(0, src, src_mv, out, out_mv, policy, &f))
    }
}

/// Apply `g` to every pair of elements of `a` and `b`, writing into `out`.
///
/// # Errors
///
/// Returns [`OpError::ShapeMismatch`] if the slices differ in length.
#[allow(clippy::too_many_arguments)]
pub fn map_binary<T, G>(
    a: &[T],
    a_mv: MissingValue<T>,
    b: &[T],
    b_mv: MissingValue<T>,
    out: &mut [T],
    out_mv: MissingValue<T>,
    opts: &KernelOptions,
    g: G,
) -> Result<KernelReport, OpError>
where
    T: Element,
    G: Fn(T, T) -> T + Sync,
{
    check_len("lhs", out.len(), a.len())?;
    check_len("rhs", out.len(), b.len())?;
    let policy = opts.domain_policy;
    if opts.is_parallel(out.len()) {
        let chunk = opts.chunk();
        Ok(out
            .par_chunks_mut(chunk)
            .zip(a.par_chunks(chunk).zip(b.par_chunks(chunk)))
            .enumerate()
            .map(|(i, (o, (x, y)))| {
                binary_chunk(i * chunk, x, a_mv, y, b_mv, o, out_mv, policy, &g)
            })
            .reduce(KernelReport::default, KernelReport::merge))
    } else {
        Ok(binary_chunk(0, a, a_mv, b, b_mv, out, out_mv, policy, &g))
    }
}

fn check_len(name: &str, expected: usize, found: usize) -> Result<(), OpError> {
    if expected == found {
        Ok(())
    } else {
        Err(OpError::ShapeMismatch {
            name: name.to_string(),
            expected: vec![expected],
            found: vec![found],
        })
    }
}

fn unary_chunk<T, F>(
    base: usize,
    src: &[T],
    src_mv: MissingValue<T>,
    out: &mut [T],
    out_mv: MissingValue<T>,
    policy: DomainPolicy,
    f: &F,
) -> KernelReport
where
    T: Element,
    F: Fn(T) -> T,
{
    let mut report = KernelReport::with_elements(out.len());
    for (i, (o, &x)) in out.iter_mut().zip(src).enumerate() {
        if src_mv.is_missing(x) {
            *o = out_mv.sentinel().unwrap_or(x);
            report.missing += 1;
            continue;
        }
        *o = settle(f(x), x.is_finite(), base + i, out_mv, policy, &mut report);
    }
    report
}

#[allow(clippy::too_many_arguments)]
fn binary_chunk<T, G>(
    base: usize,
    a: &[T],
    a_mv: MissingValue<T>,
    b: &[T],
    b_mv: MissingValue<T>,
    out: &mut [T],
    out_mv: MissingValue<T>,
    policy: DomainPolicy,
    g: &G,
) -> KernelReport
where
    T: Element,
    G: Fn(T, T) -> T,
{
    let mut report = KernelReport::with_elements(out.len());
    for (i, (o, (&x, &y))) in out.iter_mut().zip(a.iter().zip(b)).enumerate() {
        let missing = if a_mv.is_missing(x) {
            Some(x)
        } else if b_mv.is_missing(y) {
            Some(y)
        } else {
            None
        };
        if let Some(m) = missing {
            *o = out_mv.sentinel().unwrap_or(m);
            report.missing += 1;
            continue;
        }
        let finite = x.is_finite() && y.is_finite();
        *o = settle(g(x, y), finite, base + i, out_mv, policy, &mut report);
    }
    report
}

/// Decide what a computed value becomes.
///
/// Non-finite results from finite operands are domain violations. Non-finite
/// operands that are not sentinels pass through the raw function.
#[inline]
fn settle<T: Element>(
    y: T,
    operands_finite: bool,
    index: usize,
    out_mv: MissingValue<T>,
    policy: DomainPolicy,
    report: &mut KernelReport,
) -> T {
    if y.is_finite() || !operands_finite {
        return y;
    }
    report.note_violation(index);
    match (policy, out_mv.sentinel()) {
        (DomainPolicy::PropagateMissing, Some(s)) => s,
        _ => y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MV: f32 = 1.0e15;

    fn serial() -> KernelOptions {
        KernelOptions::serial(DomainPolicy::PropagateMissing)
    }

    fn parallel(chunk_len: usize) -> KernelOptions {
        KernelOptions {
            domain_policy: DomainPolicy::PropagateMissing,
            parallel_threshold: 0,
            chunk_len,
        }
    }

    #[test]
    fn unary_propagates_missing() {
        let src = [2.0f32, MV, -1.0];
        let mut out = [0.0f32; 3];
        let mv = MissingValue::Sentinel(MV);
        let r = map_unary(&src, mv, &mut out, mv, &serial(), |x| -x).unwrap();
        assert_eq!(out, [-2.0, MV, 1.0]);
        assert_eq!(r.elements, 3);
        assert_eq!(r.missing, 1);
        assert_eq!(r.domain_violations, 0);
    }

    #[test]
    fn unary_without_sentinel_computes_everything() {
        let src = [MV, 1.0f32];
        let mut out = [0.0f32; 2];
        let r = map_unary(
            &src,
            MissingValue::Absent,
            &mut out,
            MissingValue::Absent,
            &serial(),
            |x| x + 1.0,
        )
        .unwrap();
        assert_eq!(out, [MV + 1.0, 2.0]);
        assert_eq!(r.missing, 0);
    }

    #[test]
    fn binary_writes_output_sentinel() {
        let a = [2.0f64, 2.0, -5.0, 2.0];
        let b = [-5.0f64, 3.0, 3.0, -7.0];
        let mut out = [0.0f64; 4];
        let r = map_binary(
            &a,
            MissingValue::Sentinel(-5.0),
            &b,
            MissingValue::Sentinel(-7.0),
            &mut out,
            MissingValue::Sentinel(-9.0),
            &serial(),
            |x, y| x + y,
        )
        .unwrap();
        assert_eq!(out, [-9.0, 5.0, -9.0, -9.0]);
        assert_eq!(r.missing, 3);
    }

    #[test]
    fn binary_without_output_sentinel_copies_input_sentinel() {
        let a = [MV, 1.0f32];
        let b = [1.0f32, 1.0];
        let mut out = [0.0f32; 2];
        map_binary(
            &a,
            MissingValue::Sentinel(MV),
            &b,
            MissingValue::Absent,
            &mut out,
            MissingValue::Absent,
            &serial(),
            |x, y| x * y,
        )
        .unwrap();
        assert_eq!(out, [MV, 1.0]);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let mut out = [0.0f32; 2];
        let err = map_unary(
            &[1.0f32; 3],
            MissingValue::Absent,
            &mut out,
            MissingValue::Absent,
            &serial(),
            |x| x,
        )
        .unwrap_err();
        assert!(matches!(err, OpError::ShapeMismatch { .. }));
        assert_eq!(out, [0.0, 0.0]);
    }

    #[test]
    fn domain_violation_becomes_sentinel() {
        let a = [1.0f32, 4.0, 0.0];
        let b = [0.0f32, 2.0, 0.0];
        let mut out = [0.0f32; 3];
        let mv = MissingValue::Sentinel(MV);
        let r = map_binary(&a, mv, &b, mv, &mut out, mv, &serial(), |x, y| x / y).unwrap();
        assert_eq!(out, [MV, 2.0, MV]);
        assert_eq!(r.domain_violations, 2);
        assert_eq!(r.first_violation, Some(0));
        assert_eq!(r.missing, 0);
    }

    #[test]
    fn ieee_policy_keeps_raw_result() {
        let src = [-1.0f64, 4.0];
        let mut out = [0.0f64; 2];
        let mv = MissingValue::Sentinel(1.0e15);
        let opts = KernelOptions::serial(DomainPolicy::Ieee);
        let r = map_unary(&src, mv, &mut out, mv, &opts, |x| x.sqrt()).unwrap();
        assert!(out[0].is_nan());
        assert_eq!(out[1], 2.0);
        assert_eq!(r.domain_violations, 1);
    }

    #[test]
    fn non_finite_inputs_are_not_violations() {
        let src = [f64::INFINITY, f64::NAN];
        let mut out = [0.0f64; 2];
        let mv = MissingValue::Sentinel(1.0e15);
        let r = map_unary(&src, mv, &mut out, mv, &serial(), |x| x * 2.0).unwrap();
        assert_eq!(out[0], f64::INFINITY);
        assert!(out[1].is_nan());
        assert_eq!(r.domain_violations, 0);
    }

    #[test]
    fn fill_counts_sentinel_fill_as_missing() {
        let mut out = [0.0f32; 5];
        let r = fill(&mut out, MV, MissingValue::Sentinel(MV), &serial());
        assert_eq!(out, [MV; 5]);
        assert_eq!(r.missing, 5);
        let r = fill(&mut out, 3.0, MissingValue::Sentinel(MV), &parallel(2));
        assert_eq!(out, [3.0; 5]);
        assert_eq!(r.missing, 0);
    }

    #[test]
    fn parallel_violation_index_is_global() {
        let mut src = vec![1.0f64; 100];
        src[37] = 0.0;
        src[90] = 0.0;
        let mut out = vec![0.0f64; 100];
        let mv = MissingValue::Sentinel(1.0e15);
        let r = map_unary(&src, mv, &mut out, mv, &parallel(8), |x| x.ln()).unwrap();
        assert_eq!(r.elements, 100);
        assert_eq!(r.domain_violations, 2);
        assert_eq!(r.first_violation, Some(37));
        assert_eq!(out[37], 1.0e15);
    }

    fn arb_masked(len: usize) -> impl Strategy<Value = Vec<f32>> {
        prop::collection::vec(
            prop_oneof![3 => -1.0e3f32..1.0e3, 1 => Just(MV)],
            len,
        )
    }

    proptest! {
        #[test]
        fn unary_rule_holds(src in arb_masked(64)) {
            let mv = MissingValue::Sentinel(MV);
            let mut out = vec![0.0f32; src.len()];
            map_unary(&src, mv, &mut out, mv, &serial(), |x| x.sin()).unwrap();
            for (x, y) in src.iter().zip(&out) {
                if *x == MV {
                    prop_assert_eq!(*y, MV);
                } else {
                    prop_assert_eq!(*y, x.sin());
                }
            }
        }

        #[test]
        fn binary_rule_holds(a in arb_masked(64), b in arb_masked(64)) {
            let mv = MissingValue::Sentinel(MV);
            let mut out = vec![0.0f32; a.len()];
            map_binary(&a, mv, &b, mv, &mut out, mv, &serial(), |x, y| x - y).unwrap();
            for i in 0..a.len() {
                if a[i] == MV || b[i] == MV {
                    prop_assert_eq!(out[i], MV);
                } else {
                    prop_assert_eq!(out[i], a[i] - b[i]);
                }
            }
        }

        #[test]
        fn parallel_matches_serial(
            a in arb_masked(257),
            b in arb_masked(257),
            chunk in 1usize..64,
        ) {
            let mv = MissingValue::Sentinel(MV);
            let mut s = vec![0.0f32; a.len()];
            let mut p = vec![0.0f32; a.len()];
            let rs = map_binary(&a, mv, &b, mv, &mut s, mv, &serial(), |x, y| x / y).unwrap();
            let rp = map_binary(&a, mv, &b, mv, &mut p, mv, &parallel(chunk), |x, y| x / y).unwrap();
            prop_assert_eq!(rs, rp);
            for (x, y) in s.iter().zip(&p) {
                prop_assert_eq!(x.to_bits(), y.to_bits());
            }
        }

        #[test]
        fn negate_twice_is_identity(src in arb_masked(64)) {
            let mv = MissingValue::Sentinel(MV);
            let mut once = vec![0.0f32; src.len()];
            let mut twice = vec![0.0f32; src.len()];
            map_unary(&src, mv, &mut once, mv, &serial(), |x| -x).unwrap();
            map_unary(&once, mv, &mut twice, mv, &serial(), |x| -x).unwrap();
            for (x, y) in src.iter().zip(&twice) {
                prop_assert_eq!(x.to_bits(), y.to_bits());
            }
        }
    }
}
