//! Error types for elementwise field operations.
//!
//! Every failure is reported synchronously as the operation's return
//! value. A missing `missing_value` attribute is deliberately not an
//! error; see [`MissingMode::Absent`](crate::MissingMode::Absent).

use std::error::Error;
use std::fmt;

use crate::id::FieldId;
use crate::precision::{Precision, TypeKind};

/// Errors from validating or executing an elementwise operation.
///
/// Validation errors (shape, precision, arity, handles, attributes) are
/// detected before any element is computed. No variant is ever returned
/// after the destination has been written.
#[derive(Clone, Debug, PartialEq)]
pub enum OpError {
    /// An operand's extents differ from the destination's.
    ShapeMismatch {
        /// Name of the offending field.
        name: String,
        /// Destination extents.
        expected: Vec<usize>,
        /// Extents of the offending operand.
        found: Vec<usize>,
    },
    /// Two combined fields, or a field and its `missing_value` attribute,
    /// differ in precision. The engine never promotes implicitly.
    PrecisionMismatch {
        /// Name of the offending field.
        name: String,
        /// Precision required by the destination.
        expected: Precision,
        /// Precision actually found.
        found: Precision,
    },
    /// A value kind outside {single, double}.
    UnsupportedPrecision {
        /// The unsupported kind.
        kind: TypeKind,
    },
    /// Valid operands produced a non-finite result that could not be
    /// recorded as missing (or the strict policy is in effect).
    DomainError {
        /// Name of the operation.
        op: &'static str,
        /// Number of offending elements.
        violations: usize,
        /// Flat row-major index of the first offending element.
        first_index: usize,
    },
    /// A field handle is not registered in the store.
    UnknownField {
        /// The unrecognised handle.
        field: FieldId,
    },
    /// The operation was given the wrong number of source fields.
    ArityMismatch {
        /// Name of the operation.
        op: &'static str,
        /// Number of sources the operation takes.
        expected: usize,
        /// Number of sources supplied.
        found: usize,
    },
    /// A scalar fill value or parameter does not fit the fields'
    /// precision: it would overflow to infinity or flush to zero.
    ParamOutOfRange {
        /// Name of the operation.
        op: &'static str,
        /// The scalar as supplied.
        value: f64,
        /// Precision it had to be converted to.
        precision: Precision,
    },
    /// A `missing_value` attribute holds something other than a number.
    InvalidAttribute {
        /// Name of the field carrying the attribute.
        name: String,
        /// Description of the problem.
        reason: String,
    },
}

impl fmt::Display for OpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "shape mismatch: field '{name}' has extents {found:?}, expected {expected:?}"
            ),
            Self::PrecisionMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "precision mismatch: '{name}' is {found} precision, expected {expected}"
            ),
            Self::UnsupportedPrecision { kind } => {
                write!(f, "unsupported precision: type kind {kind}")
            }
            Self::DomainError {
                op,
                violations,
                first_index,
            } => write!(
                f,
                "domain error in '{op}': {violations} element(s) out of domain, first at index {first_index}"
            ),
            Self::UnknownField { field } => write!(f, "unknown field: {field}"),
            Self::ArityMismatch {
                op,
                expected,
                found,
            } => write!(
                f,
                "operation '{op}' takes {expected} source field(s), got {found}"
            ),
            Self::ParamOutOfRange {
                op,
                value,
                precision,
            } => write!(
                f,
                "scalar {value:e} for '{op}' is not representable in {precision} precision"
            ),
            Self::InvalidAttribute { name, reason } => {
                write!(f, "invalid missing_value on '{name}': {reason}")
            }
        }
    }
}

impl Error for OpError {}
