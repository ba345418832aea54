//! C-compatible status codes for elementwise operations.
//!
//! [`OpStatus`] is a `repr(i32)` enum: `Ok` is zero and every error is
//! negative. Conversions from [`OpError`] and from operation results are
//! provided so callers that want a plain status can get one.

use crate::error::OpError;

/// Status returned by an elementwise operation.
///
/// Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpStatus {
    /// Success.
    Ok = 0,
    /// Operand extents differ.
    ShapeMismatch = -1,
    /// Operand precisions differ.
    PrecisionMismatch = -2,
    /// Value kind outside {single, double}.
    UnsupportedPrecision = -3,
    /// Numeric-domain violation among valid elements.
    DomainError = -4,
    /// Field handle not registered.
    UnknownField = -5,
    /// Wrong number of source fields.
    ArityMismatch = -6,
    /// `missing_value` attribute is not numeric.
    InvalidAttribute = -7,
    /// Scalar fill value or parameter out of range for the precision.
    ParamOutOfRange = -8,
}

impl OpStatus {
    /// Status of an operation result.
    pub fn of<T>(result: &Result<T, OpError>) -> Self {
        match result {
            Ok(_) => Self::Ok,
            Err(e) => Self::from(e),
        }
    }

    /// Returns `true` for [`OpStatus::Ok`].
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

impl From<&OpError> for OpStatus {
    fn from(e: &OpError) -> Self {
        match e {
            OpError::ShapeMismatch { .. } => Self::ShapeMismatch,
            OpError::PrecisionMismatch { .. } => Self::PrecisionMismatch,
            OpError::UnsupportedPrecision { .. } => Self::UnsupportedPrecision,
            OpError::DomainError { .. } => Self::DomainError,
            OpError::UnknownField { .. } => Self::UnknownField,
            OpError::ArityMismatch { .. } => Self::ArityMismatch,
            OpError::InvalidAttribute { .. } => Self::InvalidAttribute,
            OpError::ParamOutOfRange { .. } => Self::ParamOutOfRange,
        }
    }
}
