//! The durable audit record
//!
//! A [`LogEntry`] is created exactly once per classified lifecycle event and
//! is never deleted by this engine. Every field except `additional_data` is
//! write-once; the guard in [`crate::guard`] enforces that against the
//! declared protected-field list.

use crate::diff::ChangeSet;
use crate::errors::Result;
use crate::model::Action;
use auditrail_core_types::{ActorContext, ObjectRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// One immutable audit record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Opaque identity (UUIDv7), assigned at creation, never reassigned
    pub id: String,

    /// Reference identifying the audited object even after its deletion
    pub object: ObjectRef,

    /// Display representation of the object at event time
    pub object_repr: String,

    /// Lifecycle classification; fixed at creation
    pub action: Action,

    /// Serialized change set (JSON, `{"field": [old, new]}`)
    pub changes: String,

    /// Responsible actor, if any
    pub actor_id: Option<String>,

    /// Actor display representation, resilient to later actor deletion
    pub actor_repr: Option<String>,

    /// Origin network address
    pub remote_addr: Option<String>,

    /// Client descriptor (e.g. user-agent string)
    pub client: Option<String>,

    /// Server-side creation timestamp, monotonic per process
    pub timestamp: DateTime<Utc>,

    /// Open annotation payload; the only mutable field
    pub additional_data: Option<Value>,
}

impl LogEntry {
    /// Build a new entry from its parts
    ///
    /// Assigns a fresh UUIDv7 identity and a monotonic timestamp. The
    /// change set is serialized here so the stored form is fixed at
    /// creation time.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the change set cannot be encoded.
    pub fn new(
        object: ObjectRef,
        object_repr: String,
        action: Action,
        changes: &ChangeSet,
        actor: &ActorContext,
        additional_data: Option<Value>,
    ) -> Result<Self> {
        let changes = serde_json::to_string(changes)?;
        Ok(Self {
            id: Uuid::now_v7().to_string(),
            object,
            object_repr,
            action,
            changes,
            actor_id: actor.actor_id.clone(),
            actor_repr: actor.actor_repr.clone(),
            remote_addr: actor.remote_addr.clone(),
            client: actor.client.clone(),
            timestamp: crate::clock::monotonic_now(),
            additional_data,
        })
    }

    /// Parse the serialized change set back into its typed form
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the stored payload is not a valid
    /// change-set encoding.
    pub fn changes_set(&self) -> Result<ChangeSet> {
        Ok(serde_json::from_str(&self.changes)?)
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LogEntry({}, {} on {})",
            self.id, self.action, self.object
        )
    }
}
