//! fieldmath: elementwise arithmetic over typed N-d fields with
//! missing-value propagation.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the fieldmath sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use fieldmath::prelude::*;
//!
//! let mut store = FieldStore::new();
//!
//! let mut x = Field::from_shape_vec("x", &[2, 2], vec![2.0f64, 2.0, 2.0, -999.0]).unwrap();
//! x.set_missing_value(-999.0f64).unwrap();
//! let x = store.insert(x);
//!
//! let engine = Engine::new(EngineConfig::default()).unwrap();
//! let report = engine.pow(&mut store, x, x, 3.0).unwrap();
//! assert_eq!(report.missing, 1);
//!
//! let out = store.get(x).unwrap().view::<f64>().unwrap();
//! assert_eq!(out.iter().copied().collect::<Vec<_>>(), [8.0, 8.0, 8.0, -999.0]);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `fieldmath-core` | IDs, precisions, sentinels, errors, status codes |
//! | [`kernel`] | `fieldmath-kernel` | Slice kernels applying the compute-or-propagate rule |
//! | [`field`] | `fieldmath-field` | Fields, attributes, decompositions, the field store |
//! | [`ops`] | `fieldmath-ops` | Operation catalog and the [`Engine`](ops::Engine) |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`fieldmath-core`).
///
/// [`types::MissingValue`] is the per-field sentinel; [`types::OpError`]
/// and [`types::OpStatus`] describe failures.
pub use fieldmath_core as types;

/// Slice kernels (`fieldmath-kernel`).
///
/// Most users go through [`ops::Engine`] instead; the kernels are useful
/// for plain slices that do not live in a [`field::Field`].
pub use fieldmath_kernel as kernel;

/// Field data model (`fieldmath-field`).
pub use fieldmath_field as field;

/// Operations and the engine (`fieldmath-ops`).
///
/// [`ops::catalog()`] lists every operation; [`ops::lookup`] resolves one
/// by name.
pub use fieldmath_ops as ops;

/// Common imports for typical fieldmath usage.
///
/// ```rust
/// use fieldmath::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use fieldmath_core::{
        DomainPolicy, Element, FieldId, MissingMode, MissingValue, Precision, TypeKind,
    };

    // Errors
    pub use fieldmath_core::{OpError, OpStatus};

    // Fields
    pub use fieldmath_field::{
        AttrValue, Decomposition, Field, FieldData, FieldElement, FieldStore, MISSING_VALUE,
    };

    // Operations
    pub use fieldmath_ops::{
        BinaryOp, Engine, EngineConfig, OpReport, Operation, ParamOp, UnaryOp,
    };
}
