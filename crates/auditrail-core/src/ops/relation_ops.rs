//! Relation change tracking
//!
//! A bulk change to a many-valued relation (add several, remove several,
//! clear all) is reduced to one update-style entry per affected related
//! object. Entries are logged against the related object; the owning
//! instance is identified inside the change payload, keyed by the relation
//! field name with an `add`/`delete` verb:
//!
//! ```json
//! {"tags": ["add", "Article 1"]}
//! ```
//!
//! CLEAR is not a delta: it removes everything, so the tracker enumerates
//! the full pre-clear membership itself instead of trusting the (empty)
//! related set supplied by the hook.

use crate::diff::{ChangeSet, FieldChange};
use crate::errors::Result;
use crate::model::{Action, LogEntry, ObjectSnapshot};
use crate::notify::{AuditEvent, EventBus};
use crate::ops::entry_ops::create_entry;
use crate::ops::store::{EntryStore, SnapshotSource};
use auditrail_core_types::ActorContext;
use serde::{Deserialize, Serialize};

/// Kind of bulk relation change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationAction {
    Add,
    Remove,
    Clear,
}

impl RelationAction {
    /// The verb recorded in change payloads
    pub fn verb(self) -> &'static str {
        match self {
            RelationAction::Add => "add",
            RelationAction::Remove | RelationAction::Clear => "delete",
        }
    }
}

impl std::fmt::Display for RelationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RelationAction::Add => "add",
            RelationAction::Remove => "remove",
            RelationAction::Clear => "clear",
        };
        write!(f, "{}", name)
    }
}

/// Expand one bulk relation-change event into per-member entries.
///
/// `related_kind`/`related_ids` name the explicitly affected objects for
/// ADD and REMOVE; for CLEAR they are ignored and the full current
/// membership of `field_name` on the instance is enumerated instead. One
/// notification is published per created entry, after that entry is
/// persisted, carrying the complete affected set so subscribers can batch.
///
/// # Errors
///
/// `Persistence` from the snapshot source or the entry factory.
pub fn log_relation_change<O: SnapshotSource, E: EntryStore>(
    objects: &O,
    entries: &mut E,
    bus: &EventBus,
    instance: &ObjectSnapshot,
    related_kind: &str,
    related_ids: &[String],
    action: RelationAction,
    field_name: &str,
    actor: &ActorContext,
) -> Result<Vec<LogEntry>> {
    let affected = match action {
        RelationAction::Clear => objects.relation_members(&instance.object, field_name)?,
        RelationAction::Add | RelationAction::Remove => {
            objects.filter_by_ids(related_kind, related_ids)?
        }
    };

    let affected_refs: Vec<_> = affected.iter().map(|s| s.object.clone()).collect();
    let mut created = Vec::with_capacity(affected.len());

    for related in &affected {
        let mut changes = ChangeSet::new();
        changes.insert(
            field_name,
            FieldChange(
                Some(action.verb().to_string()),
                Some(instance.repr.clone()),
            ),
        );

        let entry = create_entry(entries, related, Action::Update, &changes, actor)?;
        bus.publish(&AuditEvent::RelationEntryCreated {
            instance: instance.object.clone(),
            related: affected_refs.clone(),
            action,
            field_name: field_name.to_string(),
            entry: entry.clone(),
        });
        created.push(entry);
    }

    Ok(created)
}
