//! Elementwise operations on fields with missing-value propagation.
//!
//! Three layers sit between a caller and the kernels:
//!
//! 1. The [`catalog`] names each operation, its arity, and its scalar
//!    function.
//! 2. Dispatch validates arity, precision, and extents, then selects the
//!    `f32` or `f64` instantiation.
//! 3. The field adapter unwraps each field's array and `missing_value`
//!    attribute, runs the kernel into a scratch buffer, and commits the
//!    result into the destination.
//!
//! ```
//! use fieldmath_field::{Field, FieldStore};
//! use fieldmath_ops::Engine;
//!
//! let mut store = FieldStore::new();
//! let mut x = Field::from_shape_vec("x", &[2, 2], vec![2.0f32, 2.0, 2.0, 1.0e15]).unwrap();
//! x.set_missing_value(1.0e15f32).unwrap();
//! let mut y = Field::from_shape_vec("y", &[2, 2], vec![1.0e15f32, 3.0, 3.0, 1.0e15]).unwrap();
//! y.set_missing_value(1.0e15f32).unwrap();
//! let x = store.insert(x);
//! let y = store.insert(y);
//!
//! let engine = Engine::default();
//! engine.add(&mut store, y, y, x).unwrap();
//!
//! let y = store.get(y).unwrap().view::<f32>().unwrap();
//! assert_eq!(y.iter().copied().collect::<Vec<_>>(), [1.0e15, 5.0, 5.0, 1.0e15]);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod adapter;
pub mod catalog;
pub mod config;
mod dispatch;
pub mod engine;
pub mod report;

pub use catalog::{
    catalog, lookup, Arity, BinaryOp, OpDescriptor, Operation, ParamOp, UnaryOp, UnknownOperation,
};
pub use config::{ConfigError, EngineConfig};
pub use engine::Engine;
pub use report::OpReport;
