//! Immutability guard for persisted entries
//!
//! A persisted entry is history: every field except `additional_data` is
//! write-once. The guard compares a proposed write against the persisted
//! version and forces protected fields back to their prior values, warning
//! per reverted field. The write itself always proceeds: an attempt to
//! rewrite history must never block a legitimate annotation edit sharing
//! the same write call.
//!
//! The protected-field list lives in
//! [`auditrail_core_types::schema::PROTECTED_ENTRY_FIELDS`]; this module
//! only interprets it.

use crate::model::LogEntry;
use auditrail_core_types::schema::{self, PROTECTED_ENTRY_FIELDS};
use tracing::warn;

/// Outcome of running the guard over one proposed write
#[derive(Debug, Clone)]
pub struct GuardReport {
    /// The write as it will be committed, protected fields restored
    pub entry: LogEntry,
    /// Names of the fields that were reverted
    pub reverted: Vec<&'static str>,
}

impl GuardReport {
    /// True if the proposed write left all protected fields alone
    pub fn clean(&self) -> bool {
        self.reverted.is_empty()
    }
}

fn field_differs(field: &str, prior: &LogEntry, proposed: &LogEntry) -> bool {
    match field {
        schema::ENTRY_ID => prior.id != proposed.id,
        schema::ENTRY_OBJECT_KIND => prior.object.kind != proposed.object.kind,
        schema::ENTRY_OBJECT_ID => prior.object.id != proposed.object.id,
        schema::ENTRY_OBJECT_REPR => prior.object_repr != proposed.object_repr,
        schema::ENTRY_ACTION => prior.action != proposed.action,
        schema::ENTRY_CHANGES => prior.changes != proposed.changes,
        schema::ENTRY_ACTOR_ID => prior.actor_id != proposed.actor_id,
        schema::ENTRY_ACTOR_REPR => prior.actor_repr != proposed.actor_repr,
        schema::ENTRY_REMOTE_ADDR => prior.remote_addr != proposed.remote_addr,
        schema::ENTRY_CLIENT => prior.client != proposed.client,
        schema::ENTRY_TIMESTAMP => prior.timestamp != proposed.timestamp,
        _ => false,
    }
}

fn revert_field(field: &str, prior: &LogEntry, proposed: &mut LogEntry) {
    match field {
        schema::ENTRY_ID => proposed.id = prior.id.clone(),
        schema::ENTRY_OBJECT_KIND => proposed.object.kind = prior.object.kind.clone(),
        schema::ENTRY_OBJECT_ID => proposed.object.id = prior.object.id.clone(),
        schema::ENTRY_OBJECT_REPR => proposed.object_repr = prior.object_repr.clone(),
        schema::ENTRY_ACTION => proposed.action = prior.action,
        schema::ENTRY_CHANGES => proposed.changes = prior.changes.clone(),
        schema::ENTRY_ACTOR_ID => proposed.actor_id = prior.actor_id.clone(),
        schema::ENTRY_ACTOR_REPR => proposed.actor_repr = prior.actor_repr.clone(),
        schema::ENTRY_REMOTE_ADDR => proposed.remote_addr = prior.remote_addr.clone(),
        schema::ENTRY_CLIENT => proposed.client = prior.client.clone(),
        schema::ENTRY_TIMESTAMP => proposed.timestamp = prior.timestamp,
        _ => {}
    }
}

/// Validate a proposed write against the persisted version of the entry.
///
/// With no prior version (initial creation) the write passes unconditionally.
/// Otherwise each protected field that differs is reverted to its prior
/// value and a warning is emitted naming the field. `additional_data` is
/// exempt and passes through unchanged.
pub fn enforce_immutability(prior: Option<&LogEntry>, proposed: LogEntry) -> GuardReport {
    let Some(prior) = prior else {
        return GuardReport {
            entry: proposed,
            reverted: Vec::new(),
        };
    };

    let mut entry = proposed;
    let mut reverted = Vec::new();

    for field in PROTECTED_ENTRY_FIELDS {
        if field_differs(field, prior, &entry) {
            revert_field(field, prior, &mut entry);
            warn!(
                component = module_path!(),
                op = "enforce_immutability",
                event = schema::EVENT_FIELD_REVERTED,
                entry_id = %entry.id,
                field = *field,
                "attempted change to protected entry field was reverted"
            );
            reverted.push(*field);
        }
    }

    GuardReport { entry, reverted }
}
