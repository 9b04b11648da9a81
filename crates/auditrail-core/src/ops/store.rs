//! Store contracts and the in-memory reference store
//!
//! Persistence is an external collaborator: the engine only requires the
//! two traits below. [`MemoryStore`] is a HashMap-backed implementation of
//! both, used by the pure kernel's tests and by integrators that keep
//! their trail in process memory. Not thread-safe (no Arc/RwLock),
//! designed for single-threaded use within one write path.

use crate::errors::Result;
use crate::model::{LogEntry, ObjectSnapshot};
use auditrail_core_types::ObjectRef;
use std::collections::HashMap;

/// Read access to audited-object state
pub trait SnapshotSource {
    /// Fetch the current snapshot of an object, `None` if it does not exist
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the underlying store cannot be reached.
    fn get(&self, object: &ObjectRef) -> Result<Option<ObjectSnapshot>>;

    /// Fetch snapshots for the named identities of one kind
    ///
    /// Unknown identities are skipped, not errors.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the underlying store cannot be reached.
    fn filter_by_ids(&self, kind: &str, ids: &[String]) -> Result<Vec<ObjectSnapshot>>;

    /// Current membership of a many-valued relation field
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the underlying store cannot be reached.
    fn relation_members(&self, object: &ObjectRef, field: &str) -> Result<Vec<ObjectSnapshot>>;
}

/// Durable storage for log entries
pub trait EntryStore {
    /// Persist a new entry; returns the persisted record
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the write is rejected; the failure
    /// propagates to the caller, no retry happens here.
    fn create(&mut self, entry: LogEntry) -> Result<LogEntry>;

    /// Fetch the currently-persisted version of an entry, if any
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the underlying store cannot be reached.
    fn get_prior(&self, entry_id: &str) -> Result<Option<LogEntry>>;

    /// Commit a write to an existing entry
    ///
    /// Callers are expected to run the write through the immutability
    /// guard first; see [`crate::ops::save_entry`].
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` if no such entry exists, `Persistence` if
    /// the write is rejected.
    fn update(&mut self, entry: LogEntry) -> Result<LogEntry>;

    /// All entries for one object, newest first
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the underlying store cannot be reached.
    fn entries_for_object(&self, object: &ObjectRef) -> Result<Vec<LogEntry>>;

    /// All entries for the named identities of one kind, newest first
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the underlying store cannot be reached.
    fn entries_for_objects(&self, kind: &str, ids: &[String]) -> Result<Vec<LogEntry>>;
}

/// In-memory store for snapshots and entries
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Object key ("kind:id") to current snapshot
    objects: HashMap<String, ObjectSnapshot>,
    /// (object key, relation field) to current membership
    relations: HashMap<(String, String), Vec<ObjectRef>>,
    /// Entry ID to entry
    entries: HashMap<String, LogEntry>,
}

fn object_key(object: &ObjectRef) -> String {
    format!("{}:{}", object.kind, object.id)
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an object snapshot
    pub fn insert_object(&mut self, snapshot: ObjectSnapshot) {
        self.objects.insert(object_key(&snapshot.object), snapshot);
    }

    /// Remove an object (its entries remain)
    pub fn remove_object(&mut self, object: &ObjectRef) {
        self.objects.remove(&object_key(object));
    }

    /// Replace the membership of a relation field
    pub fn set_relation(&mut self, object: &ObjectRef, field: &str, members: Vec<ObjectRef>) {
        self.relations
            .insert((object_key(object), field.to_string()), members);
    }

    /// Number of stored entries
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// All stored entries, newest first
    pub fn all_entries(&self) -> Vec<LogEntry> {
        let mut entries: Vec<LogEntry> = self.entries.values().cloned().collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }
}

impl SnapshotSource for MemoryStore {
    fn get(&self, object: &ObjectRef) -> Result<Option<ObjectSnapshot>> {
        Ok(self.objects.get(&object_key(object)).cloned())
    }

    fn filter_by_ids(&self, kind: &str, ids: &[String]) -> Result<Vec<ObjectSnapshot>> {
        let mut found = Vec::new();
        for id in ids {
            let key = format!("{}:{}", kind, id);
            if let Some(snapshot) = self.objects.get(&key) {
                found.push(snapshot.clone());
            }
        }
        Ok(found)
    }

    fn relation_members(&self, object: &ObjectRef, field: &str) -> Result<Vec<ObjectSnapshot>> {
        let members = self
            .relations
            .get(&(object_key(object), field.to_string()))
            .cloned()
            .unwrap_or_default();

        let mut found = Vec::new();
        for member in &members {
            if let Some(snapshot) = self.objects.get(&object_key(member)) {
                found.push(snapshot.clone());
            }
        }
        Ok(found)
    }
}

impl EntryStore for MemoryStore {
    fn create(&mut self, entry: LogEntry) -> Result<LogEntry> {
        self.entries.insert(entry.id.clone(), entry.clone());
        Ok(entry)
    }

    fn get_prior(&self, entry_id: &str) -> Result<Option<LogEntry>> {
        Ok(self.entries.get(entry_id).cloned())
    }

    fn update(&mut self, entry: LogEntry) -> Result<LogEntry> {
        if !self.entries.contains_key(&entry.id) {
            return Err(crate::errors::AuditError::EntryNotFound {
                entry_id: entry.id.clone(),
            });
        }
        self.entries.insert(entry.id.clone(), entry.clone());
        Ok(entry)
    }

    fn entries_for_object(&self, object: &ObjectRef) -> Result<Vec<LogEntry>> {
        let mut entries: Vec<LogEntry> = self
            .entries
            .values()
            .filter(|e| &e.object == object)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    fn entries_for_objects(&self, kind: &str, ids: &[String]) -> Result<Vec<LogEntry>> {
        let mut entries: Vec<LogEntry> = self
            .entries
            .values()
            .filter(|e| e.object.kind == kind && ids.contains(&e.object.id))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }
}
