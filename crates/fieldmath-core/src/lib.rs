//! Core types and traits for the fieldmath elementwise engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other crate in the workspace: field
//! handles, floating-point precisions, the [`Element`] trait, the
//! [`MissingValue`] policy value, error types, and status codes.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod missing;
pub mod precision;
pub mod status;

pub use error::OpError;
pub use id::FieldId;
pub use missing::{DomainPolicy, MissingMode, MissingValue};
pub use precision::{Element, Precision, TypeKind};
pub use status::OpStatus;
