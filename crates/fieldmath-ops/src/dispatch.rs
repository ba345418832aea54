//! Typed dispatch: validation and precision selection.
//!
//! Every check happens before the kernel runs and before anything is
//! committed, so a rejected operation leaves the destination untouched.

use fieldmath_core::{DomainPolicy, Element, FieldId, MissingValue, OpError, Precision};
use fieldmath_field::{Field, FieldElement, FieldStore};
use fieldmath_kernel::{self as kernel, KernelOptions, KernelReport};
use log::{debug, warn};

use crate::adapter::{self, Operand};
use crate::catalog::Operation;
use crate::report::OpReport;

/// Validate `op` against the fields it names and run it in the
/// destination's precision.
pub(crate) fn dispatch(
    store: &mut FieldStore,
    op: Operation,
    dest: FieldId,
    sources: &[FieldId],
    opts: &KernelOptions,
) -> Result<OpReport, OpError> {
    let expected = op.arity().source_count();
    if sources.len() != expected {
        return Err(OpError::ArityMismatch {
            op: op.name(),
            expected,
            found: sources.len(),
        });
    }
    match store.get(dest)?.precision() {
        Precision::Single => run::<f32>(store, op, dest, sources, opts),
        Precision::Double => run::<f64>(store, op, dest, sources, opts),
    }
}

fn check_compatible(dest: &Field, src: &Field) -> Result<(), OpError> {
    if src.precision() != dest.precision() {
        return Err(OpError::PrecisionMismatch {
            name: src.name().to_string(),
            expected: dest.precision(),
            found: src.precision(),
        });
    }
    if src.shape() != dest.shape() {
        return Err(OpError::ShapeMismatch {
            name: src.name().to_string(),
            expected: dest.shape().to_vec(),
            found: src.shape().to_vec(),
        });
    }
    Ok(())
}

fn run<T: FieldElement>(
    store: &mut FieldStore,
    op: Operation,
    dest: FieldId,
    sources: &[FieldId],
    opts: &KernelOptions,
) -> Result<OpReport, OpError> {
    let (values, kr, out_mv, adopt) = {
        let target = store.get(dest)?;
        let dest_mv = target.missing_value::<T>()?;
        let mut operands = Vec::with_capacity(sources.len());
        for &id in sources {
            let field = store.get(id)?;
            check_compatible(target, field)?;
            operands.push(adapter::operand::<T>(field)?);
        }
        let (out_mv, adopt) = adapter::output_missing(dest_mv, &operands);
        if out_mv.is_absent() {
            debug!(
                "{}: no missing_value on '{}' or its sources; computing without propagation",
                op.name(),
                target.name()
            );
        }
        let mut values = vec![T::default(); target.len()];
        let kr = compute(op, &operands, &mut values, out_mv, opts)?;
        (values, kr, out_mv, adopt)
    };

    check_domain(op, &kr, out_mv, opts.domain_policy)?;
    adapter::commit(store.get_mut(dest)?, &values, adopt)?;

    debug!(
        "{} -> field {dest}: {} element(s) in {} precision, {} missing",
        op.name(),
        kr.elements,
        T::PRECISION,
        kr.missing
    );
    Ok(OpReport {
        op: op.name(),
        precision: T::PRECISION,
        elements: kr.elements,
        missing: kr.missing,
        domain_violations: kr.domain_violations,
        missing_mode: out_mv.mode(),
        parallel: opts.is_parallel(kr.elements),
    })
}

fn compute<T: FieldElement>(
    op: Operation,
    operands: &[Operand<'_, T>],
    out: &mut [T],
    out_mv: MissingValue<T>,
    opts: &KernelOptions,
) -> Result<KernelReport, OpError> {
    match (op, operands) {
        (Operation::Fill(c), []) => Ok(kernel::fill(out, scalar(op, c)?, out_mv, opts)),
        (Operation::Unary(u), [x]) => {
            kernel::map_unary(&*x.values, x.missing, out, out_mv, opts, |v| u.eval(v))
        }
        (Operation::Param(p, param), [x]) => {
            let param = scalar(op, param)?;
            kernel::map_unary(&*x.values, x.missing, out, out_mv, opts, |v| {
                p.eval(v, param)
            })
        }
        (Operation::Binary(b), [x, y]) => kernel::map_binary(
            &*x.values,
            x.missing,
            &*y.values,
            y.missing,
            out,
            out_mv,
            opts,
            |l, r| b.eval(l, r),
        ),
        _ => Err(OpError::ArityMismatch {
            op: op.name(),
            expected: op.arity().source_count(),
            found: operands.len(),
        }),
    }
}

fn scalar<T: Element>(op: Operation, value: f64) -> Result<T, OpError> {
    T::from_param(value).ok_or(OpError::ParamOutOfRange {
        op: op.name(),
        value,
        precision: T::PRECISION,
    })
}

fn check_domain<T: Element>(
    op: Operation,
    kr: &KernelReport,
    out_mv: MissingValue<T>,
    policy: DomainPolicy,
) -> Result<(), OpError> {
    if kr.domain_violations == 0 {
        return Ok(());
    }
    match policy {
        DomainPolicy::Ieee => {
            debug!(
                "{}: {} non-finite result(s) kept",
                op.name(),
                kr.domain_violations
            );
            Ok(())
        }
        DomainPolicy::PropagateMissing if !out_mv.is_absent() => {
            warn!(
                "{}: {} element(s) out of domain written as missing",
                op.name(),
                kr.domain_violations
            );
            Ok(())
        }
        _ => Err(OpError::DomainError {
            op: op.name(),
            violations: kr.domain_violations,
            first_index: kr.first_violation.unwrap_or_default(),
        }),
    }
}
