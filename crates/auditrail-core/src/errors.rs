use thiserror::Error;

/// Result type alias using AuditError
pub type Result<T> = std::result::Result<T, AuditError>;

/// Error taxonomy for auditrail operations
///
/// Each variant maps to a stable error code via [`AuditError::code`] for
/// programmatic handling and test assertions. Recoverable conditions
/// (missing prior snapshot on update, missing prior entry in the guard)
/// are handled locally by the operations and never surface as errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuditError {
    // ===== Lookup =====
    /// Audited object not found in the snapshot source
    #[error("Object not found: {kind}:{id}")]
    ObjectNotFound { kind: String, id: String },

    /// Log entry not found in the entry store
    #[error("Log entry not found: {entry_id}")]
    EntryNotFound { entry_id: String },

    // ===== Validation =====
    /// Object kind is not registered for auditing
    #[error("Object kind not registered for auditing: {kind}")]
    NotRegistered { kind: String },

    /// Invalid input (empty kind, malformed identifier, ...)
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    // ===== Integration/IO =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Persistence failure; propagated to the caller, never retried here
    #[error("Persistence error in {op}: {message}")]
    Persistence { op: String, message: String },

    /// A notification subscriber failed; isolated per subscriber
    #[error("Subscriber '{subscriber}' failed: {message}")]
    Subscriber { subscriber: String, message: String },

    // ===== Internal =====
    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AuditError {
    /// Get the stable error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            AuditError::ObjectNotFound { .. } => "ERR_OBJECT_NOT_FOUND",
            AuditError::EntryNotFound { .. } => "ERR_ENTRY_NOT_FOUND",
            AuditError::NotRegistered { .. } => "ERR_NOT_REGISTERED",
            AuditError::InvalidInput { .. } => "ERR_INVALID_INPUT",
            AuditError::Serialization { .. } => "ERR_SERIALIZATION",
            AuditError::Persistence { .. } => "ERR_PERSISTENCE",
            AuditError::Subscriber { .. } => "ERR_SUBSCRIBER",
            AuditError::Internal { .. } => "ERR_INTERNAL",
        }
    }

    /// Build a persistence error with operation context
    pub fn persistence(op: impl Into<String>, message: impl Into<String>) -> Self {
        AuditError::Persistence {
            op: op.into(),
            message: message.into(),
        }
    }
}

/// Conversion from serde_json::Error to AuditError
impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        AuditError::Serialization {
            message: err.to_string(),
        }
    }
}
