//! Field construction errors.

use std::error::Error;
use std::fmt;

use fieldmath_core::TypeKind;

/// Errors from building a [`Field`](crate::Field) or attaching metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldError {
    /// The number of values does not match the product of the extents.
    ShapeLength {
        /// Requested extents.
        shape: Vec<usize>,
        /// Number of values supplied.
        len: usize,
    },
    /// Decomposition metadata is inconsistent with the local array.
    InvalidDecomposition {
        /// Description of the inconsistency.
        reason: String,
    },
    /// Field storage requested for a non-real kind.
    UnsupportedKind {
        /// The rejected kind.
        kind: TypeKind,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeLength { shape, len } => {
                write!(f, "{len} values do not fill extents {shape:?}")
            }
            Self::InvalidDecomposition { reason } => {
                write!(f, "invalid decomposition: {reason}")
            }
            Self::UnsupportedKind { kind } => {
                write!(f, "fields cannot store type kind {kind}")
            }
        }
    }
}

impl Error for FieldError {}
