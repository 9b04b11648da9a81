//! Canonical schema constants for log entries and structured logging
//!
//! The entry field names double as the single source of truth for the
//! immutability guard: [`PROTECTED_ENTRY_FIELDS`] lists every write-once
//! field, and is the only place that list is defined.

// Log entry field names
pub const ENTRY_ID: &str = "id";
pub const ENTRY_OBJECT_KIND: &str = "object_kind";
pub const ENTRY_OBJECT_ID: &str = "object_id";
pub const ENTRY_OBJECT_REPR: &str = "object_repr";
pub const ENTRY_ACTION: &str = "action";
pub const ENTRY_CHANGES: &str = "changes";
pub const ENTRY_ACTOR_ID: &str = "actor_id";
pub const ENTRY_ACTOR_REPR: &str = "actor_repr";
pub const ENTRY_REMOTE_ADDR: &str = "remote_addr";
pub const ENTRY_CLIENT: &str = "client";
pub const ENTRY_TIMESTAMP: &str = "timestamp";
pub const ENTRY_ADDITIONAL_DATA: &str = "additional_data";

/// Write-once entry fields, in schema order
///
/// Every entry field except `additional_data`. A persisted entry may never
/// have any of these changed; the guard reverts attempts field by field.
pub const PROTECTED_ENTRY_FIELDS: &[&str] = &[
    ENTRY_ID,
    ENTRY_OBJECT_KIND,
    ENTRY_OBJECT_ID,
    ENTRY_OBJECT_REPR,
    ENTRY_ACTION,
    ENTRY_CHANGES,
    ENTRY_ACTOR_ID,
    ENTRY_ACTOR_REPR,
    ENTRY_REMOTE_ADDR,
    ENTRY_CLIENT,
    ENTRY_TIMESTAMP,
];

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Audit identifiers in structured logs
pub const FIELD_OBJECT: &str = "object";
pub const FIELD_ENTRY_ID: &str = "entry_id";
pub const FIELD_ENTRY_FIELD: &str = "field";
pub const FIELD_SUBSCRIBER: &str = "subscriber";

// Error fields
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_FIELD_REVERTED: &str = "field_reverted";
