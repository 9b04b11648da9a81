//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log audit
//! operations (entry creation, guarded writes, relation expansion).

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use auditrail_core::log_op_start;
/// log_op_start!("log_create");
/// log_op_start!("log_create", object = "article:1");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = auditrail_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = auditrail_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use auditrail_core::log_op_end;
/// log_op_end!("log_create", duration_ms = 4);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = auditrail_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = auditrail_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// # Example
///
/// ```
/// # use auditrail_core::{log_op_error, errors::AuditError};
/// let err = AuditError::persistence("create_entry", "store unavailable");
/// log_op_error!("log_create", err);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr) => {{
        let err: &$crate::errors::AuditError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = auditrail_core_types::schema::EVENT_END_ERROR,
            err_code = err.code(),
            err_message = %err,
        );
    }};
    ($op:expr, $err:expr, $($field:tt)*) => {{
        let err: &$crate::errors::AuditError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = auditrail_core_types::schema::EVENT_END_ERROR,
            err_code = err.code(),
            err_message = %err,
            $($field)*
        );
    }};
}
