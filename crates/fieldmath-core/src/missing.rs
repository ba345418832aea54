//! Missing-value policy values.
//!
//! A field marks "no data" by storing a sentinel scalar in place of a
//! value; there is no separate validity mask. [`MissingValue`] carries
//! that sentinel (or its absence) alongside the data so propagation logic
//! can be exercised without any field or grid abstraction.

use std::fmt;

use crate::precision::Element;

/// The missing-value marker of one field.
#[derive(Clone, Copy, Debug)]
pub enum MissingValue<T> {
    /// The field declares no sentinel. Nothing is ever treated as missing
    /// and the rule engine degrades to plain elementwise compute.
    Absent,
    /// Elements bit-equal to this value are missing.
    Sentinel(T),
}

impl<T: Element> MissingValue<T> {
    /// Wrap an optional sentinel.
    pub fn from_option(sentinel: Option<T>) -> Self {
        match sentinel {
            Some(s) => Self::Sentinel(s),
            None => Self::Absent,
        }
    }

    /// Whether `value` marks a missing element. Always `false` when absent.
    #[inline]
    pub fn is_missing(&self, value: T) -> bool {
        match self {
            Self::Absent => false,
            Self::Sentinel(s) => value.bit_eq(*s),
        }
    }

    /// The sentinel, if any.
    #[inline]
    pub fn sentinel(&self) -> Option<T> {
        match self {
            Self::Absent => None,
            Self::Sentinel(s) => Some(*s),
        }
    }

    /// Returns `true` if no sentinel is declared.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// `self` if it carries a sentinel, otherwise `other`.
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Absent => other,
            present => present,
        }
    }

    /// The reporting mode this policy puts an operation in.
    pub fn mode(&self) -> MissingMode {
        match self {
            Self::Absent => MissingMode::Absent,
            Self::Sentinel(_) => MissingMode::Sentinel,
        }
    }
}

impl<T: Element> PartialEq for MissingValue<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Absent, Self::Absent) => true,
            (Self::Sentinel(a), Self::Sentinel(b)) => a.bit_eq(*b),
            _ => false,
        }
    }
}

impl<T: Element> Default for MissingValue<T> {
    fn default() -> Self {
        Self::Absent
    }
}

/// Whether an operation ran with a sentinel in effect.
///
/// `Absent` is the documented fallback when no field involved carries a
/// `missing_value` attribute; it is not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingMode {
    /// A sentinel was in effect; missing inputs were propagated.
    Sentinel,
    /// No sentinel anywhere; every element was computed.
    Absent,
}

impl fmt::Display for MissingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sentinel => write!(f, "sentinel"),
            Self::Absent => write!(f, "absent"),
        }
    }
}

/// What to do when valid, finite operands produce a non-finite result
/// (division by zero, `log` of a non-positive value, `sqrt` of a negative
/// value, overflow, ...).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DomainPolicy {
    /// Write the output sentinel. Fails with a domain error when there is
    /// no sentinel to write.
    #[default]
    PropagateMissing,
    /// Fail the whole operation; the destination is left untouched.
    Strict,
    /// Keep the raw IEEE result (NaN or infinity).
    Ieee,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn absent_never_missing() {
        let mv = MissingValue::<f32>::Absent;
        assert!(!mv.is_missing(0.0));
        assert!(!mv.is_missing(1.0e15));
        assert!(!mv.is_missing(f32::NAN));
        assert_eq!(mv.mode(), MissingMode::Absent);
    }

    #[test]
    fn sentinel_is_exact() {
        let mv = MissingValue::Sentinel(1.0e15f32);
        assert!(mv.is_missing(1.0e15));
        assert!(!mv.is_missing(1.0e15 * (1.0 + f32::EPSILON)));
        assert!(!mv.is_missing(0.0));
    }

    #[test]
    fn negative_zero_sentinel_does_not_match_zero() {
        let mv = MissingValue::Sentinel(-0.0f64);
        assert!(mv.is_missing(-0.0));
        assert!(!mv.is_missing(0.0));
    }

    #[test]
    fn nan_sentinel_matches_itself() {
        let mv = MissingValue::Sentinel(f64::NAN);
        assert!(mv.is_missing(f64::NAN));
        assert!(!mv.is_missing(1.0));
    }

    #[test]
    fn or_prefers_self() {
        let a = MissingValue::Sentinel(1.0f32);
        let b = MissingValue::Sentinel(2.0f32);
        assert_eq!(a.or(b), a);
        assert_eq!(MissingValue::Absent.or(b), b);
        assert_eq!(
            MissingValue::<f32>::Absent.or(MissingValue::Absent),
            MissingValue::Absent
        );
    }

    #[test]
    fn default_policy_propagates() {
        assert_eq!(DomainPolicy::default(), DomainPolicy::PropagateMissing);
    }

    proptest! {
        #[test]
        fn only_the_sentinel_is_missing(s in any::<f64>(), x in any::<f64>()) {
            let mv = MissingValue::Sentinel(s);
            prop_assert_eq!(mv.is_missing(x), x.to_bits() == s.to_bits());
        }
    }
}
