//! Migration runner
//!
//! Applies migrations with checksums and idempotency

use crate::errors::{checksum_mismatch, from_rusqlite, Result};
use crate::migrations::checksums::compute_checksum;
use crate::migrations::embedded::get_migrations;
use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

/// Apply all pending migrations to the database
///
/// Already-applied migrations are skipped after their recorded checksum is
/// verified against the embedded SQL; a mismatch aborts the run.
///
/// # Errors
///
/// Returns `Persistence` on SQL failure or checksum mismatch.
pub fn apply_migrations(conn: &mut Connection) -> Result<()> {
    create_schema_version_table(conn)?;

    for migration in get_migrations() {
        apply_migration(conn, migration.id, migration.sql)?;
    }

    Ok(())
}

/// Create the schema_version table if it doesn't exist
fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY,
            migration_id TEXT NOT NULL UNIQUE,
            checksum TEXT NOT NULL,
            applied_at INTEGER NOT NULL
        )",
        [],
    )
    .map_err(from_rusqlite)?;
    Ok(())
}

/// Apply a single migration if it has not been applied yet
fn apply_migration(conn: &mut Connection, migration_id: &str, sql: &str) -> Result<()> {
    let checksum = compute_checksum(sql);

    let recorded: Option<String> = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = ?1",
            rusqlite::params![migration_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    if let Some(recorded) = recorded {
        if recorded != checksum {
            return Err(checksum_mismatch(migration_id, &recorded, &checksum));
        }
        return Ok(());
    }

    let tx = conn.transaction().map_err(from_rusqlite)?;
    tx.execute_batch(sql).map_err(from_rusqlite)?;
    tx.execute(
        "INSERT INTO schema_version (migration_id, checksum, applied_at)
         VALUES (?1, ?2, ?3)",
        rusqlite::params![
            migration_id,
            checksum,
            chrono::Utc::now().timestamp_micros()
        ],
    )
    .map_err(from_rusqlite)?;
    tx.commit().map_err(from_rusqlite)?;

    debug!(
        component = module_path!(),
        op = "apply_migration",
        migration_id,
        "migration applied"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    #[test]
    fn test_apply_migrations_is_idempotent() {
        let mut conn = open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        apply_migrations(&mut conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count as usize, get_migrations().len());
    }

    #[test]
    fn test_tampered_checksum_is_detected() {
        let mut conn = open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();

        conn.execute(
            "UPDATE schema_version SET checksum = 'deadbeef' WHERE migration_id = '001_audit_entries'",
            [],
        )
        .unwrap();

        let result = apply_migrations(&mut conn);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code(), "ERR_PERSISTENCE");
    }

    #[test]
    fn test_schema_has_entry_table() {
        let mut conn = open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM audit_entries", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
