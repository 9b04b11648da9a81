//! Point-in-time object snapshots
//!
//! A snapshot is the diff engine's only view of an object: a mapping from
//! field name to a comparable, printable value, captured at one instant by
//! the integrating system. Fields use `BTreeMap` so that serialization and
//! diff iteration order are deterministic.

use auditrail_core_types::ObjectRef;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// An object's state at one instant
///
/// "Object does not exist" (before creation, after deletion) is expressed
/// as `Option<&ObjectSnapshot>` at call sites, not as a snapshot variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    /// Reference to the audited object
    pub object: ObjectRef,

    /// Human-readable representation at snapshot time
    pub repr: String,

    /// Field name to value, in stable (lexicographic) order
    pub fields: BTreeMap<String, Value>,

    /// Open annotation payload forwarded onto created entries
    pub additional_data: Option<Value>,
}

impl ObjectSnapshot {
    /// Create a snapshot with no fields
    pub fn new(object: ObjectRef, repr: impl Into<String>) -> Self {
        Self {
            object,
            repr: repr.into(),
            fields: BTreeMap::new(),
            additional_data: None,
        }
    }

    /// Add a field value
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Attach an annotation payload
    pub fn with_additional_data(mut self, data: Value) -> Self {
        self.additional_data = Some(data);
        self
    }
}

impl std::fmt::Display for ObjectSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.repr, self.object)
    }
}
