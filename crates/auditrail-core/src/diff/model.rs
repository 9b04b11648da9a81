//! Change set output types.
//!
//! Collections use `BTreeMap` for deterministic serialization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The old/new display values of one changed field
///
/// Serializes as a 2-element array `[old, new]` with `null` on a side
/// where the field (or the whole object) was absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange(pub Option<String>, pub Option<String>);

impl FieldChange {
    /// Display value before the change, if the field existed
    pub fn old(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Display value after the change, if the field still exists
    pub fn new(&self) -> Option<&str> {
        self.1.as_deref()
    }
}

/// Minimal field-level diff between two snapshots
///
/// A field appears here if and only if its display value differs between
/// the two snapshots, or it transitions to/from absence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet(BTreeMap<String, FieldChange>);

impl ChangeSet {
    /// Create an empty change set
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no field changed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of changed fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Look up the change recorded for a field
    pub fn get(&self, field: &str) -> Option<&FieldChange> {
        self.0.get(field)
    }

    /// Record a change for a field
    pub fn insert(&mut self, field: impl Into<String>, change: FieldChange) {
        self.0.insert(field.into(), change);
    }

    /// Iterate changes in stable field order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldChange)> {
        self.0.iter()
    }

    /// Changed field names, in stable order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, FieldChange)> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = (String, FieldChange)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_change_serializes_as_pair() {
        let change = FieldChange(Some("x".to_string()), Some("y".to_string()));
        assert_eq!(serde_json::to_string(&change).unwrap(), r#"["x","y"]"#);

        let change = FieldChange(None, Some("x".to_string()));
        assert_eq!(serde_json::to_string(&change).unwrap(), r#"[null,"x"]"#);
    }

    #[test]
    fn test_change_set_serializes_as_map() {
        let mut changes = ChangeSet::new();
        changes.insert("name", FieldChange(Some("x".to_string()), Some("y".to_string())));
        assert_eq!(
            serde_json::to_string(&changes).unwrap(),
            r#"{"name":["x","y"]}"#
        );
    }

    #[test]
    fn test_round_trip() {
        let mut changes = ChangeSet::new();
        changes.insert("a", FieldChange(None, Some("1".to_string())));
        changes.insert("b", FieldChange(Some("2".to_string()), None));

        let json = serde_json::to_string(&changes).unwrap();
        let back: ChangeSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, changes);
    }
}
