//! Tracking registry
//!
//! Keeps track of which object kinds are audited and how: which fields
//! participate in diffs, how field names are displayed, and which
//! many-valued relation fields are tracked. Dispatch consults the registry
//! before creating entries; unregistered kinds are ignored.
//!
//! Registration is explicit and happens at startup; there is no implicit
//! global dispatch.

use crate::model::ObjectSnapshot;
use std::collections::HashMap;

/// Per-kind configuration of what is audited
#[derive(Debug, Clone, Default)]
pub struct TrackingOptions {
    /// Fields to include; empty means "all fields"
    pub include_fields: Vec<String>,
    /// Fields to exclude; overrides includes
    pub exclude_fields: Vec<String>,
    /// Field name to display label, applied to change-set keys
    pub mapping_fields: HashMap<String, String>,
    /// Many-valued relation fields tracked for this kind
    pub relation_fields: Vec<String>,
}

impl TrackingOptions {
    /// Track every field with no renaming
    pub fn all_fields() -> Self {
        Self::default()
    }

    /// Restrict tracking to the named fields
    pub fn include(mut self, fields: &[&str]) -> Self {
        self.include_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Exclude the named fields (overrides includes)
    pub fn exclude(mut self, fields: &[&str]) -> Self {
        self.exclude_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Map a field name to a display label in change sets
    pub fn map_field(mut self, field: &str, label: &str) -> Self {
        self.mapping_fields
            .insert(field.to_string(), label.to_string());
        self
    }

    /// Track a many-valued relation field
    pub fn relation(mut self, field: &str) -> Self {
        self.relation_fields.push(field.to_string());
        self
    }

    /// Whether a field participates in diffs under these options
    pub fn tracks(&self, field: &str) -> bool {
        if self.exclude_fields.iter().any(|f| f == field) {
            return false;
        }
        self.include_fields.is_empty() || self.include_fields.iter().any(|f| f == field)
    }

    /// Display label for a field (the mapped name, or the field itself)
    pub fn display_name<'a>(&'a self, field: &'a str) -> &'a str {
        self.mapping_fields
            .get(field)
            .map(String::as_str)
            .unwrap_or(field)
    }

    /// Reduce a snapshot to the tracked fields, renamed for display
    ///
    /// Applied to both sides before diffing so the change set only ever
    /// contains tracked fields under their display labels.
    pub fn apply(&self, snapshot: &ObjectSnapshot) -> ObjectSnapshot {
        let mut filtered = ObjectSnapshot::new(snapshot.object.clone(), snapshot.repr.clone());
        filtered.additional_data = snapshot.additional_data.clone();
        for (field, value) in &snapshot.fields {
            if self.tracks(field) {
                filtered
                    .fields
                    .insert(self.display_name(field).to_string(), value.clone());
            }
        }
        filtered
    }
}

/// Registry-level toggles for which lifecycle events are logged
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    pub log_create: bool,
    pub log_update: bool,
    pub log_delete: bool,
    pub track_relations: bool,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            log_create: true,
            log_update: true,
            log_delete: true,
            track_relations: true,
        }
    }
}

/// A registry of the object kinds audited by this engine
#[derive(Debug, Clone, Default)]
pub struct AuditRegistry {
    kinds: HashMap<String, TrackingOptions>,
    settings: RegistrySettings,
}

impl AuditRegistry {
    /// Create a registry with default settings (all events logged)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with explicit settings
    pub fn with_settings(settings: RegistrySettings) -> Self {
        Self {
            kinds: HashMap::new(),
            settings,
        }
    }

    /// Register an object kind for auditing
    pub fn register(&mut self, kind: impl Into<String>, options: TrackingOptions) {
        self.kinds.insert(kind.into(), options);
    }

    /// Unregister an object kind; already-written entries are unaffected
    pub fn unregister(&mut self, kind: &str) {
        self.kinds.remove(kind);
    }

    /// Check if a kind is registered
    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    /// Tracking options for a kind, if registered
    pub fn options(&self, kind: &str) -> Option<&TrackingOptions> {
        self.kinds.get(kind)
    }

    /// All registered kinds
    pub fn registered_kinds(&self) -> Vec<&str> {
        self.kinds.keys().map(String::as_str).collect()
    }

    /// Registry-level event toggles
    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }
}
