//! Auditrail Core - Change-tracking and audit-entry engine
//!
//! This crate provides the engine that turns observed object lifecycle
//! events into an immutable, queryable audit trail:
//! - Snapshot diffing down to a minimal field-level change set
//! - Log entry construction and persistence via abstract store contracts
//! - An immutability guard that reverts writes to protected entry fields
//! - A relation change tracker expanding bulk add/remove/clear events into
//!   per-member entries
//! - An event notifier publishing "entry created" events to subscribers
//!
//! Persistence, lifecycle interception, and actor identity are external
//! collaborators; see the `SnapshotSource` and `EntryStore` traits.

pub mod clock;
pub mod diff;
pub mod errors;
pub mod guard;
pub mod logging_facility;
pub mod model;
pub mod notify;
pub mod ops;
pub mod registry;

// Re-export commonly used types
pub use diff::{snapshot_diff, ChangeSet, FieldChange};
pub use errors::{AuditError, Result};
pub use guard::{enforce_immutability, GuardReport};
pub use model::{Action, LogEntry, ObjectSnapshot};
pub use notify::{AuditEvent, AuditSubscriber, EventBus};
pub use ops::{EntryStore, MemoryStore, RelationAction, SnapshotSource};
pub use registry::{AuditRegistry, RegistrySettings, TrackingOptions};
