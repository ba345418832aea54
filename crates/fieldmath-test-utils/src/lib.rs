//! Sample fields and decompositions for fieldmath development.
//!
//! Builders here panic on bad input: they exist to make tests short, not
//! to validate callers.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    constant, grid, masked, ramp, reassemble, split_rows, values, SENTINEL_F32, SENTINEL_F64,
};
