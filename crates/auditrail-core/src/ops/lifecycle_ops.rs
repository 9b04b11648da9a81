//! Lifecycle event logging
//!
//! One operation per classified lifecycle event. Each computes the diff,
//! decides whether an entry is warranted, persists it through the factory,
//! and publishes a notification, in that order, so subscribers only ever
//! see entries that already exist in the store.
//!
//! Registry consultation (is this kind audited at all, which fields count)
//! happens in the engine façade before these operations run.

use crate::diff::snapshot_diff;
use crate::errors::Result;
use crate::model::{Action, LogEntry, ObjectSnapshot};
use crate::notify::{AuditEvent, EventBus};
use crate::ops::entry_ops::create_entry;
use crate::ops::store::EntryStore;
use auditrail_core_types::ActorContext;
use tracing::debug;

/// Log the creation of an object.
///
/// Always produces an entry, even for an object with no fields; the change
/// set reports every field as `[null, value]`.
///
/// # Errors
///
/// `Serialization`/`Persistence` from the entry factory.
pub fn log_create<E: EntryStore>(
    entries: &mut E,
    bus: &EventBus,
    snapshot: &ObjectSnapshot,
    actor: &ActorContext,
) -> Result<LogEntry> {
    let changes = snapshot_diff(None, Some(snapshot));
    let entry = create_entry(entries, snapshot, Action::Create, &changes, actor)?;

    bus.publish(&AuditEvent::EntryCreated {
        old: None,
        new: Some(snapshot.clone()),
        entry: entry.clone(),
    });
    Ok(entry)
}

/// Log an update to an object.
///
/// No entry is created when nothing observable changed, or when no prior
/// snapshot exists (the object was never seen before; recovered locally,
/// not an error).
///
/// # Errors
///
/// `Serialization`/`Persistence` from the entry factory.
pub fn log_update<E: EntryStore>(
    entries: &mut E,
    bus: &EventBus,
    old: Option<&ObjectSnapshot>,
    new: &ObjectSnapshot,
    actor: &ActorContext,
) -> Result<Option<LogEntry>> {
    let Some(old) = old else {
        debug!(
            component = module_path!(),
            op = "log_update",
            object = %new.object,
            "no prior snapshot for update; skipping"
        );
        return Ok(None);
    };

    let changes = snapshot_diff(Some(old), Some(new));
    if changes.is_empty() {
        return Ok(None);
    }

    let entry = create_entry(entries, new, Action::Update, &changes, actor)?;
    bus.publish(&AuditEvent::EntryCreated {
        old: Some(old.clone()),
        new: Some(new.clone()),
        entry: entry.clone(),
    });
    Ok(Some(entry))
}

/// Log the deletion of an object.
///
/// Always produces an entry; the change set reports every field as
/// `[value, null]`. The entry's target reference outlives the object.
///
/// # Errors
///
/// `Serialization`/`Persistence` from the entry factory.
pub fn log_delete<E: EntryStore>(
    entries: &mut E,
    bus: &EventBus,
    snapshot: &ObjectSnapshot,
    actor: &ActorContext,
) -> Result<LogEntry> {
    let changes = snapshot_diff(Some(snapshot), None);
    let entry = create_entry(entries, snapshot, Action::Delete, &changes, actor)?;

    bus.publish(&AuditEvent::EntryCreated {
        old: Some(snapshot.clone()),
        new: None,
        entry: entry.clone(),
    });
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::FieldChange;
    use crate::ops::store::MemoryStore;
    use auditrail_core_types::ObjectRef;
    use serde_json::json;

    fn snapshot(name: &str) -> ObjectSnapshot {
        ObjectSnapshot::new(ObjectRef::new("article", "1"), "Article 1")
            .with_field("name", json!(name))
    }

    #[test]
    fn test_create_produces_entry_with_creation_pairs() {
        let mut store = MemoryStore::new();
        let bus = EventBus::new();

        let entry = log_create(&mut store, &bus, &snapshot("x"), &ActorContext::anonymous())
            .unwrap();

        assert_eq!(entry.action, Action::Create);
        let changes = entry.changes_set().unwrap();
        assert_eq!(
            changes.get("name"),
            Some(&FieldChange(None, Some("x".to_string())))
        );
    }

    #[test]
    fn test_create_with_no_fields_still_logs() {
        let mut store = MemoryStore::new();
        let bus = EventBus::new();
        let empty = ObjectSnapshot::new(ObjectRef::new("article", "1"), "Article 1");

        let entry = log_create(&mut store, &bus, &empty, &ActorContext::anonymous()).unwrap();
        assert!(entry.changes_set().unwrap().is_empty());
        assert_eq!(store.entry_count(), 1);
    }

    #[test]
    fn test_update_logs_only_when_changed() {
        let mut store = MemoryStore::new();
        let bus = EventBus::new();

        let unchanged = log_update(
            &mut store,
            &bus,
            Some(&snapshot("x")),
            &snapshot("x"),
            &ActorContext::anonymous(),
        )
        .unwrap();
        assert!(unchanged.is_none());
        assert_eq!(store.entry_count(), 0);

        let changed = log_update(
            &mut store,
            &bus,
            Some(&snapshot("x")),
            &snapshot("y"),
            &ActorContext::anonymous(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(changed.action, Action::Update);
        assert_eq!(
            changed.changes_set().unwrap().get("name"),
            Some(&FieldChange(Some("x".to_string()), Some("y".to_string())))
        );
    }

    #[test]
    fn test_update_without_prior_snapshot_skips() {
        let mut store = MemoryStore::new();
        let bus = EventBus::new();

        let result = log_update(
            &mut store,
            &bus,
            None,
            &snapshot("x"),
            &ActorContext::anonymous(),
        )
        .unwrap();
        assert!(result.is_none());
        assert_eq!(store.entry_count(), 0);
    }

    #[test]
    fn test_delete_produces_entry_with_deletion_pairs() {
        let mut store = MemoryStore::new();
        let bus = EventBus::new();

        let entry = log_delete(&mut store, &bus, &snapshot("x"), &ActorContext::anonymous())
            .unwrap();

        assert_eq!(entry.action, Action::Delete);
        assert_eq!(
            entry.changes_set().unwrap().get("name"),
            Some(&FieldChange(Some("x".to_string()), None))
        );
    }
}
