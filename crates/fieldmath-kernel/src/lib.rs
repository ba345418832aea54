//! Missing-value-aware elementwise kernels.
//!
//! The kernels here know nothing about fields, shapes, or attributes.
//! They take flat slices, one [`MissingValue`](fieldmath_core::MissingValue)
//! per operand plus one for the output, and apply a scalar function under
//! the propagation rule:
//!
//! ```text
//! unary:  out = sentinel          if src is missing
//!             = f(src)            otherwise
//! binary: out = sentinel          if a or b is missing
//!             = g(a, b)           otherwise
//! ```
//!
//! Each element is independent of every other, so large inputs are split
//! into fixed-size chunks and processed on the rayon pool. Serial and
//! parallel execution produce bit-identical output.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod options;
pub mod report;
pub mod rule;

pub use options::KernelOptions;
pub use report::KernelReport;
pub use rule::{fill, map_binary, map_unary};
