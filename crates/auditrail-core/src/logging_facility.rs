//! Structured logging facility for auditrail
//!
//! This module provides a canonical logging facility with:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Correlation propagation (request/trace ids on operation events)
//! - Test capture mode for deterministic assertions; the immutability
//!   guard's revert warnings are asserted through it
//!
//! # Usage
//!
//! ```rust
//! use auditrail_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
