//! Per-call kernel statistics.

/// What a kernel call did, element by element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KernelReport {
    /// Number of elements written.
    pub elements: usize,
    /// Elements written as missing because an input was missing.
    pub missing: usize,
    /// Elements whose valid, finite operands produced a non-finite result.
    pub domain_violations: usize,
    /// Index of the first domain violation.
    pub first_violation: Option<usize>,
}

impl KernelReport {
    pub(crate) fn with_elements(elements: usize) -> Self {
        Self {
            elements,
            ..Self::default()
        }
    }

    pub(crate) fn note_violation(&mut self, index: usize) {
        self.domain_violations += 1;
        if self.first_violation.is_none() {
            self.first_violation = Some(index);
        }
    }

    /// Combine the reports of two disjoint chunks.
    pub fn merge(self, other: Self) -> Self {
        let first_violation = match (self.first_violation, other.first_violation) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        Self {
            elements: self.elements + other.elements,
            missing: self.missing + other.missing,
            domain_violations: self.domain_violations + other.domain_violations,
            first_violation,
        }
    }
}
