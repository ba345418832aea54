//! Execution options for the kernels.

use fieldmath_core::DomainPolicy;

/// How a kernel call is executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KernelOptions {
    /// Handling of non-finite results from valid operands.
    pub domain_policy: DomainPolicy,
    /// Element count at or above which the rayon pool is used.
    /// `usize::MAX` keeps every call serial.
    pub parallel_threshold: usize,
    /// Elements per parallel work item. Must be non-zero.
    pub chunk_len: usize,
}

impl KernelOptions {
    /// Default chunk length for parallel execution.
    pub const DEFAULT_CHUNK_LEN: usize = 8192;
    /// Default parallel threshold.
    pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 16;

    /// Options that never use the thread pool.
    pub fn serial(domain_policy: DomainPolicy) -> Self {
        Self {
            domain_policy,
            parallel_threshold: usize::MAX,
            chunk_len: Self::DEFAULT_CHUNK_LEN,
        }
    }

    /// Whether a call over `len` elements runs in parallel.
    pub fn is_parallel(&self, len: usize) -> bool {
        len >= self.parallel_threshold && len > self.chunk_len
    }

    /// Chunk length clamped to at least one element.
    pub(crate) fn chunk(&self) -> usize {
        self.chunk_len.max(1)
    }
}

impl Default for KernelOptions {
    fn default() -> Self {
        Self {
            domain_policy: DomainPolicy::default(),
            parallel_threshold: Self::DEFAULT_PARALLEL_THRESHOLD,
            chunk_len: Self::DEFAULT_CHUNK_LEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_never_parallel() {
        let opts = KernelOptions::serial(DomainPolicy::Strict);
        assert!(!opts.is_parallel(usize::MAX - 1));
    }

    #[test]
    fn small_inputs_stay_serial() {
        let opts = KernelOptions {
            parallel_threshold: 0,
            chunk_len: 16,
            ..KernelOptions::default()
        };
        assert!(!opts.is_parallel(16));
        assert!(opts.is_parallel(17));
    }
}
