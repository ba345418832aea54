//! Registry mapping [`FieldId`] handles to fields.

use fieldmath_core::{FieldId, OpError};
use indexmap::IndexMap;

use crate::field::Field;

/// Owns fields and hands out stable handles for them.
///
/// Operations name their destination and sources by handle, which lets
/// one field appear in several roles of the same call.
#[derive(Clone, Debug, Default)]
pub struct FieldStore {
    fields: IndexMap<FieldId, Field>,
    next_id: u32,
}

impl FieldStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field and return its handle.
    pub fn insert(&mut self, field: Field) -> FieldId {
        let id = FieldId(self.next_id);
        self.next_id += 1;
        self.fields.insert(id, field);
        id
    }

    /// Borrow a field.
    ///
    /// # Errors
    ///
    /// Returns [`OpError::UnknownField`] if the handle is not registered.
    pub fn get(&self, id: FieldId) -> Result<&Field, OpError> {
        self.fields
            .get(&id)
            .ok_or(OpError::UnknownField { field: id })
    }

    /// Mutably borrow a field.
    ///
    /// # Errors
    ///
    /// Returns [`OpError::UnknownField`] if the handle is not registered.
    pub fn get_mut(&mut self, id: FieldId) -> Result<&mut Field, OpError> {
        self.fields
            .get_mut(&id)
            .ok_or(OpError::UnknownField { field: id })
    }

    /// Unregister a field and hand it back. The handle is not reused.
    pub fn remove(&mut self, id: FieldId) -> Option<Field> {
        self.fields.shift_remove(&id)
    }

    /// Whether a handle is registered.
    pub fn contains(&self, id: FieldId) -> bool {
        self.fields.contains_key(&id)
    }

    /// Handle of the first field with the given name.
    pub fn find(&self, name: &str) -> Option<FieldId> {
        self.fields
            .iter()
            .find(|(_, f)| f.name() == name)
            .map(|(id, _)| *id)
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no fields are registered.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &Field)> {
        self.fields.iter().map(|(id, f)| (*id, f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmath_core::TypeKind;

    fn field(name: &str) -> Field {
        Field::zeros(name, &[2], TypeKind::R4).unwrap()
    }

    #[test]
    fn handles_are_not_reused() {
        let mut store = FieldStore::new();
        let a = store.insert(field("a"));
        assert!(store.remove(a).is_some());
        let b = store.insert(field("b"));
        assert_ne!(a, b);
        assert!(!store.contains(a));
        assert_eq!(store.get(a), Err(OpError::UnknownField { field: a }));
    }

    #[test]
    fn find_by_name_in_registration_order() {
        let mut store = FieldStore::new();
        let a = store.insert(field("u"));
        store.insert(field("v"));
        store.insert(field("u"));
        assert_eq!(store.find("u"), Some(a));
        assert_eq!(store.find("w"), None);
        let names: Vec<&str> = store.iter().map(|(_, f)| f.name()).collect();
        assert_eq!(names, ["u", "v", "u"]);
    }
}
