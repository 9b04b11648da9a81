//! Snapshot diff computation engine.
//!
//! The core entry point is [`snapshot_diff`], which accepts two optional
//! object snapshots and produces a [`ChangeSet`].

use crate::diff::model::{ChangeSet, FieldChange};
use crate::model::ObjectSnapshot;
use serde_json::Value;
use std::collections::BTreeSet;

/// Convert a field value to its stable display form.
///
/// Strings are taken verbatim; JSON `null` counts as an absent value;
/// everything else uses its compact JSON encoding. The encoding is what
/// gets persisted in change sets, so it must never depend on in-memory
/// representation details.
pub fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn field_display(snapshot: Option<&ObjectSnapshot>, field: &str) -> Option<String> {
    snapshot
        .and_then(|s| s.fields.get(field))
        .and_then(display_value)
}

/// Compute the minimal field-level change set between two snapshots.
///
/// - Both absent: empty change set.
/// - `old` absent (creation): every field of `new` as `[null, value]`.
/// - `new` absent (deletion): every field of `old` as `[value, null]`.
/// - Both present: for the union of field names, a field is included iff
///   its display value differs between the sides.
///
/// Two values with identical display forms are treated as unchanged even
/// when their underlying representations differ.
pub fn snapshot_diff(old: Option<&ObjectSnapshot>, new: Option<&ObjectSnapshot>) -> ChangeSet {
    let mut changes = ChangeSet::new();

    if old.is_none() && new.is_none() {
        return changes;
    }

    let field_names: BTreeSet<&str> = old
        .iter()
        .chain(new.iter())
        .flat_map(|s| s.fields.keys().map(String::as_str))
        .collect();

    for field in field_names {
        let old_value = field_display(old, field);
        let new_value = field_display(new, field);

        if old_value != new_value {
            changes.insert(field, FieldChange(old_value, new_value));
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use auditrail_core_types::ObjectRef;
    use serde_json::json;

    fn snapshot(fields: &[(&str, Value)]) -> ObjectSnapshot {
        let mut snap = ObjectSnapshot::new(ObjectRef::new("article", "1"), "Article 1");
        for (name, value) in fields {
            snap = snap.with_field(*name, value.clone());
        }
        snap
    }

    #[test]
    fn test_both_absent_yields_empty() {
        assert!(snapshot_diff(None, None).is_empty());
    }

    #[test]
    fn test_creation_reports_all_fields() {
        let new = snapshot(&[("name", json!("x")), ("published", json!(true))]);
        let changes = snapshot_diff(None, Some(&new));

        assert_eq!(changes.len(), 2);
        assert_eq!(
            changes.get("name"),
            Some(&FieldChange(None, Some("x".to_string())))
        );
        assert_eq!(
            changes.get("published"),
            Some(&FieldChange(None, Some("true".to_string())))
        );
    }

    #[test]
    fn test_deletion_reports_all_fields() {
        let old = snapshot(&[("name", json!("x"))]);
        let changes = snapshot_diff(Some(&old), None);

        assert_eq!(changes.len(), 1);
        assert_eq!(
            changes.get("name"),
            Some(&FieldChange(Some("x".to_string()), None))
        );
    }

    #[test]
    fn test_equal_snapshots_yield_empty() {
        let snap = snapshot(&[("name", json!("x")), ("count", json!(3))]);
        assert!(snapshot_diff(Some(&snap), Some(&snap)).is_empty());
    }

    #[test]
    fn test_changed_field_reports_both_values() {
        let old = snapshot(&[("name", json!("x"))]);
        let new = snapshot(&[("name", json!("y"))]);
        let changes = snapshot_diff(Some(&old), Some(&new));

        assert_eq!(changes.len(), 1);
        assert_eq!(
            changes.get("name"),
            Some(&FieldChange(Some("x".to_string()), Some("y".to_string())))
        );
    }

    #[test]
    fn test_field_appearing_and_disappearing() {
        let old = snapshot(&[("a", json!("1"))]);
        let new = snapshot(&[("b", json!("2"))]);
        let changes = snapshot_diff(Some(&old), Some(&new));

        assert_eq!(
            changes.get("a"),
            Some(&FieldChange(Some("1".to_string()), None))
        );
        assert_eq!(
            changes.get("b"),
            Some(&FieldChange(None, Some("2".to_string())))
        );
    }

    #[test]
    fn test_display_equal_values_are_unchanged() {
        // A number and a string that stringify identically: observable
        // state did not change, so no entry material is produced.
        let old = snapshot(&[("count", json!(1))]);
        let new = snapshot(&[("count", json!("1"))]);
        assert!(snapshot_diff(Some(&old), Some(&new)).is_empty());
    }

    #[test]
    fn test_null_value_counts_as_absent() {
        let old = snapshot(&[("name", json!(null))]);
        let new = snapshot(&[("name", json!("x"))]);
        let changes = snapshot_diff(Some(&old), Some(&new));

        assert_eq!(
            changes.get("name"),
            Some(&FieldChange(None, Some("x".to_string())))
        );

        // null on both sides is no change at all
        let old = snapshot(&[("name", json!(null))]);
        let new = snapshot(&[]);
        assert!(snapshot_diff(Some(&old), Some(&new)).is_empty());
    }

    #[test]
    fn test_compound_values_use_compact_json() {
        let old = snapshot(&[("tags", json!(["a", "b"]))]);
        let new = snapshot(&[("tags", json!(["a", "c"]))]);
        let changes = snapshot_diff(Some(&old), Some(&new));

        assert_eq!(
            changes.get("tags"),
            Some(&FieldChange(
                Some(r#"["a","b"]"#.to_string()),
                Some(r#"["a","c"]"#.to_string())
            ))
        );
    }

    #[test]
    fn test_deterministic_output() {
        let old = snapshot(&[("a", json!("1")), ("b", json!("2")), ("c", json!("3"))]);
        let new = snapshot(&[("a", json!("9")), ("b", json!("2")), ("d", json!("4"))]);

        let first = snapshot_diff(Some(&old), Some(&new));
        let second = snapshot_diff(Some(&old), Some(&new));
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
