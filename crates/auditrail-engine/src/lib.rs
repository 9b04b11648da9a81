//! Auditrail Engine - Orchestration layer
//!
//! Provides the hook-facing façade that coordinates the tracking registry,
//! the core audit operations, the persistence layer, and the event
//! notifier.

pub mod engine;

pub use engine::AuditEngine;
