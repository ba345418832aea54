//! Floating-point precisions and the [`Element`] trait.
//!
//! The engine supports exactly two storage precisions. Everything that
//! touches raw element data is generic over [`Element`], which is sealed
//! and implemented only for `f32` and `f64`. Mixing precisions is never
//! done implicitly: conversions happen only through
//! [`Element::from_param`] for caller-supplied scalar parameters, which
//! refuses values the target precision cannot hold.

use std::fmt;

use num_traits::Float;

use crate::error::OpError;

/// Storage precision of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Precision {
    /// IEEE-754 binary32 (about 7 decimal digits).
    Single,
    /// IEEE-754 binary64 (about 15 decimal digits).
    Double,
}

impl Precision {
    /// Width of one element in bits.
    pub fn bits(self) -> u32 {
        match self {
            Self::Single => 32,
            Self::Double => 64,
        }
    }

    /// The floating-point [`TypeKind`] with this precision.
    pub fn type_kind(self) -> TypeKind {
        match self {
            Self::Single => TypeKind::R4,
            Self::Double => TypeKind::R8,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Double => write!(f, "double"),
        }
    }
}

/// Declared element kind of a value, as seen by field construction and
/// attribute storage.
///
/// Only the real kinds ([`TypeKind::R4`], [`TypeKind::R8`]) map onto a
/// [`Precision`] the engine can compute in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// 32-bit signed integer.
    I4,
    /// 64-bit signed integer.
    I8,
    /// 32-bit real.
    R4,
    /// 64-bit real.
    R8,
}

impl TypeKind {
    /// Resolve the engine precision for this kind.
    ///
    /// # Errors
    ///
    /// Returns [`OpError::UnsupportedPrecision`] for integer kinds.
    pub fn precision(self) -> Result<Precision, OpError> {
        match self {
            Self::R4 => Ok(Precision::Single),
            Self::R8 => Ok(Precision::Double),
            Self::I4 | Self::I8 => Err(OpError::UnsupportedPrecision { kind: self }),
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::I4 => "I4",
            Self::I8 => "I8",
            Self::R4 => "R4",
            Self::R8 => "R8",
        };
        f.write_str(s)
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// A floating-point element type the engine can compute in.
///
/// Sealed: implemented for `f32` ([`Precision::Single`]) and `f64`
/// ([`Precision::Double`]) only.
pub trait Element:
    Float + Default + fmt::Debug + fmt::Display + Send + Sync + 'static + sealed::Sealed
{
    /// The precision this type stores.
    const PRECISION: Precision;

    /// Bit-for-bit equality.
    ///
    /// Unlike `==`, this distinguishes `0.0` from `-0.0` and matches a NaN
    /// against an identical NaN payload.
    fn bit_eq(self, other: Self) -> bool;

    /// Convert a caller-supplied `f64` scalar parameter into this type.
    ///
    /// Returns `None` if a finite `p` becomes infinite or a non-zero `p`
    /// becomes zero. Non-finite `p` converts as is.
    fn from_param(p: f64) -> Option<Self>;
}

impl Element for f32 {
    const PRECISION: Precision = Precision::Single;

    #[inline]
    fn bit_eq(self, other: Self) -> bool {
        self.to_bits() == other.to_bits()
    }

    #[inline]
    fn from_param(p: f64) -> Option<Self> {
        let narrowed = p as f32;
        let overflow = p.is_finite() && !narrowed.is_finite();
        let underflow = narrowed == 0.0 && p != 0.0;
        (!overflow && !underflow).then_some(narrowed)
    }
}

impl Element for f64 {
    const PRECISION: Precision = Precision::Double;

    #[inline]
    fn bit_eq(self, other: Self) -> bool {
        self.to_bits() == other.to_bits()
    }

    #[inline]
    fn from_param(p: f64) -> Option<Self> {
        Some(p)
    }
}
