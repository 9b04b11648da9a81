//! Snapshot diff engine.
//!
//! Compares two optional object snapshots and produces a minimal
//! field-level change set suitable for durable storage.
//!
//! ## Entry point
//!
//! ```ignore
//! use auditrail_core::diff::snapshot_diff;
//!
//! let changes = snapshot_diff(Some(&old), Some(&new));
//! if !changes.is_empty() { /* build an entry */ }
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical change sets, in a
//!   stable (lexicographic) field order.
//! - **Display-level comparison**: values that stringify identically are
//!   treated as unchanged even when their in-memory representations differ.
//!   The trail records observable change, not representational change.
//! - **Presence tracking**: fields appearing on only one side are reported
//!   with `null` on the absent side.

pub mod engine;
pub mod model;

pub use engine::{display_value, snapshot_diff};
pub use model::{ChangeSet, FieldChange};
