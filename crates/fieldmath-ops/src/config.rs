//! Engine configuration, validation, and error types.
//!
//! [`EngineConfig`] is the builder input for an [`Engine`](crate::Engine).
//! [`validate()`](EngineConfig::validate) is called by
//! [`Engine::new`](crate::Engine::new); an engine never runs with an
//! invalid configuration.

use std::error::Error;
use std::fmt;

use fieldmath_core::DomainPolicy;
use fieldmath_kernel::KernelOptions;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`EngineConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `chunk_len` is zero.
    ZeroChunkLen,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroChunkLen => write!(f, "chunk_len must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

// ── EngineConfig ───────────────────────────────────────────────────

/// Configuration for an [`Engine`](crate::Engine).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Handling of non-finite results from valid operands.
    /// Default: [`DomainPolicy::PropagateMissing`].
    pub domain_policy: DomainPolicy,
    /// Local element count at or above which kernels run on the rayon
    /// pool. `usize::MAX` disables parallel execution. Default: 65 536.
    pub parallel_threshold: usize,
    /// Elements per parallel work item. Default: 8192.
    pub chunk_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            domain_policy: DomainPolicy::default(),
            parallel_threshold: KernelOptions::DEFAULT_PARALLEL_THRESHOLD,
            chunk_len: KernelOptions::DEFAULT_CHUNK_LEN,
        }
    }
}

impl EngineConfig {
    /// A configuration that never uses the thread pool.
    pub fn serial() -> Self {
        Self {
            parallel_threshold: usize::MAX,
            ..Self::default()
        }
    }

    /// Set the domain policy.
    pub fn domain_policy(mut self, policy: DomainPolicy) -> Self {
        self.domain_policy = policy;
        self
    }

    /// Set the parallel threshold.
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Set the parallel chunk length.
    pub fn chunk_len(mut self, chunk_len: usize) -> Self {
        self.chunk_len = chunk_len;
        self
    }

    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroChunkLen`] if `chunk_len` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_len == 0 {
            return Err(ConfigError::ZeroChunkLen);
        }
        Ok(())
    }

    pub(crate) fn kernel_options(&self) -> KernelOptions {
        KernelOptions {
            domain_policy: self.domain_policy,
            parallel_threshold: self.parallel_threshold,
            chunk_len: self.chunk_len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
        assert_eq!(EngineConfig::serial().validate(), Ok(()));
    }

    #[test]
    fn zero_chunk_rejected() {
        let cfg = EngineConfig::default().chunk_len(0);
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroChunkLen));
    }

    #[test]
    fn setters_flow_into_kernel_options() {
        let cfg = EngineConfig::serial()
            .domain_policy(DomainPolicy::Strict)
            .chunk_len(64);
        let opts = cfg.kernel_options();
        assert_eq!(opts.domain_policy, DomainPolicy::Strict);
        assert_eq!(opts.chunk_len, 64);
        assert_eq!(opts.parallel_threshold, usize::MAX);
    }
}
