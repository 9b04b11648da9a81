//! Error handling for auditrail-store
//!
//! Wraps auditrail-core AuditError with store-specific helpers

use auditrail_core::errors::AuditError;

/// Result type alias using AuditError
pub type Result<T> = std::result::Result<T, AuditError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> AuditError {
    AuditError::persistence(
        "migration",
        format!("Migration {} failed: {}", migration_id, reason),
    )
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> AuditError {
    AuditError::persistence(
        "migration_checksum",
        format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ),
    )
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> AuditError {
    AuditError::persistence("sqlite", err.to_string())
}

/// Create a row-decoding error (stored data is not a valid entry)
pub fn decode_error(column: &str, reason: &str) -> AuditError {
    AuditError::Serialization {
        message: format!("cannot decode column {}: {}", column, reason),
    }
}
