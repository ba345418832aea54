//! Strongly-typed field handles.

use std::fmt;

/// Identifies a field registered in a field store.
///
/// Handles are opaque to callers: they are handed out by the store on
/// insertion and are never reused while the store is alive. Passing the
/// same handle twice to one operation expresses aliasing
/// (e.g. `y = y + x`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub u32);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for FieldId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
