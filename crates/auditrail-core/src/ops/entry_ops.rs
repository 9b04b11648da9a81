//! Entry creation and guarded writes
//!
//! [`create_entry`] assembles a [`LogEntry`] from a snapshot, an action
//! classification, and actor context, and persists it. [`save_entry`] is
//! the only sanctioned path for writing to an existing entry; it loads the
//! persisted version and runs the immutability guard before committing.

use crate::diff::ChangeSet;
use crate::errors::Result;
use crate::guard::enforce_immutability;
use crate::model::{Action, LogEntry, ObjectSnapshot};
use crate::ops::store::EntryStore;
use auditrail_core_types::ActorContext;
use tracing::debug;

/// Build and persist a log entry for one classified lifecycle event.
///
/// The target reference and display representation come from the supplied
/// snapshot (callers pass the new snapshot for CREATE/UPDATE and the old
/// one for DELETE). Whether an empty change set should have short-circuited
/// is the caller's concern; this factory persists unconditionally.
///
/// # Errors
///
/// `Serialization` if the change set cannot be encoded; `Persistence` if
/// the store rejects the write (propagated, never retried here).
pub fn create_entry<E: EntryStore>(
    entries: &mut E,
    snapshot: &ObjectSnapshot,
    action: Action,
    changes: &ChangeSet,
    actor: &ActorContext,
) -> Result<LogEntry> {
    let entry = LogEntry::new(
        snapshot.object.clone(),
        snapshot.repr.clone(),
        action,
        changes,
        actor,
        snapshot.additional_data.clone(),
    )?;

    let persisted = entries.create(entry)?;
    debug!(
        component = module_path!(),
        op = "create_entry",
        entry_id = %persisted.id,
        object = %persisted.object,
        action = persisted.action.label(),
        changed_fields = changes.len(),
        request_id = ?actor.request.as_ref().map(|r| r.request_id.as_str()),
        "audit entry persisted"
    );
    Ok(persisted)
}

/// Commit a write to an entry through the immutability guard.
///
/// Loads the currently-persisted version by identity; if none exists the
/// write is treated as the initial creation and passes unconditionally.
/// Otherwise protected fields are reverted to their persisted values (with
/// a warning per field) and the write proceeds. It never hard-fails on an
/// attempted protected-field change, so a legitimate `additional_data`
/// edit is never blocked.
///
/// # Errors
///
/// `Persistence` if the store rejects the read or the write.
pub fn save_entry<E: EntryStore>(entries: &mut E, proposed: LogEntry) -> Result<LogEntry> {
    let prior = entries.get_prior(&proposed.id)?;
    let report = enforce_immutability(prior.as_ref(), proposed);

    match prior {
        Some(_) => entries.update(report.entry),
        None => entries.create(report.entry),
    }
}
