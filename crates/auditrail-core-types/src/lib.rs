//! Core types shared across auditrail facilities
//!
//! This crate provides foundational types used by the audit engine, the
//! persistence layer, and the logging facility:
//!
//! - **Reference types**: ObjectRef, ActorContext
//! - **Correlation types**: RequestId, TraceId, RequestContext
//! - **Schema constants**: Canonical log-entry field keys, the protected
//!   (write-once) field list, and structured-log event names

pub mod correlation;
pub mod refs;
pub mod schema;

pub use correlation::{RequestContext, RequestId, TraceId};
pub use refs::{ActorContext, ObjectRef};
