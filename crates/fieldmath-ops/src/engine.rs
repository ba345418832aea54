//! The public operation interface.

use fieldmath_core::{FieldId, OpError};
use fieldmath_field::FieldStore;
use fieldmath_kernel::KernelOptions;

use crate::catalog::{BinaryOp, Operation, ParamOp, UnaryOp};
use crate::config::{ConfigError, EngineConfig};
use crate::dispatch::dispatch;
use crate::report::OpReport;

/// Applies cataloged operations to fields in a [`FieldStore`].
///
/// Every call is synchronous: it validates, computes, and commits into
/// the destination before returning. On error the destination is left
/// exactly as it was. Destination and sources may be the same handle.
#[derive(Clone, Debug)]
pub struct Engine {
    config: EngineConfig,
    options: KernelOptions,
}

impl Default for Engine {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            options: config.kernel_options(),
            config,
        }
    }
}

macro_rules! named_unary {
    ($($(#[$doc:meta])* $name:ident => $op:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(
                &self,
                store: &mut FieldStore,
                dest: FieldId,
                src: FieldId,
            ) -> Result<OpReport, OpError> {
                self.unary(store, UnaryOp::$op, dest, src)
            }
        )*
    };
}

macro_rules! named_binary {
    ($($(#[$doc:meta])* $name:ident => $op:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(
                &self,
                store: &mut FieldStore,
                dest: FieldId,
                lhs: FieldId,
                rhs: FieldId,
            ) -> Result<OpReport, OpError> {
                self.binary(store, BinaryOp::$op, dest, lhs, rhs)
            }
        )*
    };
}

impl Engine {
    /// Create an engine.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            options: config.kernel_options(),
            config,
        })
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Apply any operation: `dest = op(sources...)`.
    ///
    /// # Errors
    ///
    /// - [`OpError::ArityMismatch`] if `sources` has the wrong length.
    /// - [`OpError::UnknownField`] for an unregistered handle.
    /// - [`OpError::PrecisionMismatch`] / [`OpError::ShapeMismatch`] if a
    ///   source differs from the destination.
    /// - [`OpError::UnsupportedPrecision`] / [`OpError::InvalidAttribute`]
    ///   for an unusable `missing_value` attribute.
    /// - [`OpError::ParamOutOfRange`] if a fill value or parameter does
    ///   not fit the fields' precision.
    /// - [`OpError::DomainError`] if out-of-domain results cannot be
    ///   recorded under the configured policy.
    pub fn apply(
        &self,
        store: &mut FieldStore,
        op: Operation,
        dest: FieldId,
        sources: &[FieldId],
    ) -> Result<OpReport, OpError> {
        dispatch(store, op, dest, sources, &self.options)
    }

    /// `dest = value` everywhere.
    pub fn fill(
        &self,
        store: &mut FieldStore,
        dest: FieldId,
        value: f64,
    ) -> Result<OpReport, OpError> {
        self.apply(store, Operation::Fill(value), dest, &[])
    }

    /// `dest = op(src)`.
    pub fn unary(
        &self,
        store: &mut FieldStore,
        op: UnaryOp,
        dest: FieldId,
        src: FieldId,
    ) -> Result<OpReport, OpError> {
        self.apply(store, Operation::Unary(op), dest, &[src])
    }

    /// `dest = op(src, param)`. `param` is converted to the fields'
    /// precision and never treated as missing; a value that would overflow
    /// or flush to zero in that precision is rejected.
    pub fn param(
        &self,
        store: &mut FieldStore,
        op: ParamOp,
        dest: FieldId,
        src: FieldId,
        param: f64,
    ) -> Result<OpReport, OpError> {
        self.apply(store, Operation::Param(op, param), dest, &[src])
    }

    /// `dest = op(lhs, rhs)`.
    pub fn binary(
        &self,
        store: &mut FieldStore,
        op: BinaryOp,
        dest: FieldId,
        lhs: FieldId,
        rhs: FieldId,
    ) -> Result<OpReport, OpError> {
        self.apply(store, Operation::Binary(op), dest, &[lhs, rhs])
    }

    /// `dest = src ^ exponent`.
    pub fn pow(
        &self,
        store: &mut FieldStore,
        dest: FieldId,
        src: FieldId,
        exponent: f64,
    ) -> Result<OpReport, OpError> {
        self.param(store, ParamOp::Pow, dest, src, exponent)
    }

    named_binary! {
        /// `dest = lhs + rhs`.
        add => Add;
        /// `dest = lhs - rhs`.
        subtract => Subtract;
        /// `dest = lhs * rhs`.
        multiply => Multiply;
        /// `dest = lhs / rhs`.
        divide => Divide;
    }

    named_unary! {
        /// `dest = -src`.
        negate => Negate;
        /// `dest = |src|`.
        abs => Abs;
        /// `dest = sqrt(src)`.
        sqrt => Sqrt;
        /// `dest = e^src`.
        exp => Exp;
        /// `dest = ln(src)`.
        log => Log;
        /// `dest = sin(src)`.
        sin => Sin;
        /// `dest = cos(src)`.
        cos => Cos;
        /// `dest = tan(src)`.
        tan => Tan;
        /// `dest = src`, with the source's sentinel rewritten as the
        /// destination's.
        copy => Copy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn invalid_config_is_rejected() {
        let err = Engine::new(EngineConfig::default().chunk_len(0)).unwrap_err();
        assert_eq!(err, ConfigError::ZeroChunkLen);
    }

    #[test]
    fn default_engine_uses_default_config() {
        assert_eq!(Engine::default().config(), &EngineConfig::default());
    }
}
