//! Per-operation outcome.

use fieldmath_core::{MissingMode, Precision};

/// What a successful operation did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpReport {
    /// Name of the operation.
    pub op: &'static str,
    /// Precision it ran in.
    pub precision: Precision,
    /// Elements written.
    pub elements: usize,
    /// Elements written as missing because an input was missing.
    pub missing: usize,
    /// Valid elements with a non-finite result. Under the default policy
    /// these were written as missing too.
    pub domain_violations: usize,
    /// Whether a sentinel was in effect.
    pub missing_mode: MissingMode,
    /// Whether the kernel ran on the thread pool.
    pub parallel: bool,
}
