//! Typed N-d fields and the handles the engine operates on.
//!
//! A [`Field`] bundles a dense array in one of two precisions, a
//! string-keyed attribute map (where the `missing_value` sentinel lives),
//! and decomposition metadata describing which part of a larger global
//! grid the local array covers. The engine never reads the decomposition;
//! it is carried for the grid-management layer and for diagnostics.
//!
//! Fields are registered in a [`FieldStore`] and referred to by
//! [`FieldId`](fieldmath_core::FieldId) handles.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod attribute;
pub mod decomposition;
pub mod element;
pub mod error;
pub mod field;
pub mod store;

pub use attribute::{AttrValue, Attributes, MISSING_VALUE};
pub use decomposition::Decomposition;
pub use element::FieldElement;
pub use error::FieldError;
pub use field::{Field, FieldData};
pub use store::FieldStore;
