//! Field attributes.

use fieldmath_core::TypeKind;
use indexmap::IndexMap;

/// Attribute key under which a field's sentinel is stored.
pub const MISSING_VALUE: &str = "missing_value";

/// A single attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    /// 32-bit integer.
    I4(i32),
    /// 64-bit integer.
    I8(i64),
    /// 32-bit real.
    R4(f32),
    /// 64-bit real.
    R8(f64),
    /// Free text (units, long names, ...).
    Text(String),
}

impl AttrValue {
    /// Numeric kind of the value, `None` for text.
    pub fn type_kind(&self) -> Option<TypeKind> {
        match self {
            Self::I4(_) => Some(TypeKind::I4),
            Self::I8(_) => Some(TypeKind::I8),
            Self::R4(_) => Some(TypeKind::R4),
            Self::R8(_) => Some(TypeKind::R8),
            Self::Text(_) => None,
        }
    }
}

impl From<f32> for AttrValue {
    fn from(v: f32) -> Self {
        Self::R4(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::R8(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        Self::I4(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::I8(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// Insertion-ordered attribute map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes {
    entries: IndexMap<String, AttrValue>,
}

impl Attributes {
    /// Create an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) an attribute, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: AttrValue) -> Option<AttrValue> {
        self.entries.insert(key.into(), value)
    }

    /// Look up an attribute.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.get(key)
    }

    /// Remove an attribute, keeping the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.entries.shift_remove(key)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_and_returns_previous() {
        let mut attrs = Attributes::new();
        assert_eq!(attrs.set(MISSING_VALUE, 1.0f32.into()), None);
        assert_eq!(
            attrs.set(MISSING_VALUE, 2.0f32.into()),
            Some(AttrValue::R4(1.0))
        );
        assert_eq!(attrs.get(MISSING_VALUE), Some(&AttrValue::R4(2.0)));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn remove_preserves_order() {
        let mut attrs = Attributes::new();
        attrs.set("units", "K".into());
        attrs.set(MISSING_VALUE, 1.0e15f64.into());
        attrs.set("long_name", "air temperature".into());
        attrs.remove(MISSING_VALUE);
        let keys: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["units", "long_name"]);
    }

    #[test]
    fn kinds() {
        assert_eq!(AttrValue::I4(1).type_kind(), Some(TypeKind::I4));
        assert_eq!(AttrValue::R8(1.0).type_kind(), Some(TypeKind::R8));
        assert_eq!(AttrValue::Text("x".into()).type_kind(), None);
    }
}
