//! SQLite repository for log entries
//!
//! Maps [`LogEntry`] to rows of the `audit_entries` table. Timestamps are
//! stored as microseconds since the epoch so monotonic ordering survives
//! the round trip.

use crate::errors::{decode_error, from_rusqlite, Result};
use auditrail_core::model::{Action, LogEntry};
use auditrail_core_types::ObjectRef;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row};

const ENTRY_COLUMNS: &str = "id, object_kind, object_id, object_repr, action, changes, \
     actor_id, actor_repr, remote_addr, client, timestamp_us, additional_data";

/// SQLite repository for audit entries
pub struct EntryRepo;

/// One row as read from SQLite, before decoding into a LogEntry
struct RawEntryRow {
    id: String,
    object_kind: String,
    object_id: String,
    object_repr: String,
    action: i64,
    changes: String,
    actor_id: Option<String>,
    actor_repr: Option<String>,
    remote_addr: Option<String>,
    client: Option<String>,
    timestamp_us: i64,
    additional_data: Option<String>,
}

fn read_raw(row: &Row<'_>) -> rusqlite::Result<RawEntryRow> {
    Ok(RawEntryRow {
        id: row.get(0)?,
        object_kind: row.get(1)?,
        object_id: row.get(2)?,
        object_repr: row.get(3)?,
        action: row.get(4)?,
        changes: row.get(5)?,
        actor_id: row.get(6)?,
        actor_repr: row.get(7)?,
        remote_addr: row.get(8)?,
        client: row.get(9)?,
        timestamp_us: row.get(10)?,
        additional_data: row.get(11)?,
    })
}

fn decode(raw: RawEntryRow) -> Result<LogEntry> {
    let action = Action::from_code(raw.action)
        .ok_or_else(|| decode_error("action", &format!("unknown code {}", raw.action)))?;

    let timestamp: DateTime<Utc> = DateTime::from_timestamp_micros(raw.timestamp_us)
        .ok_or_else(|| {
            decode_error(
                "timestamp_us",
                &format!("out of range value {}", raw.timestamp_us),
            )
        })?;

    let additional_data = match raw.additional_data {
        Some(text) => Some(
            serde_json::from_str(&text)
                .map_err(|e| decode_error("additional_data", &e.to_string()))?,
        ),
        None => None,
    };

    Ok(LogEntry {
        id: raw.id,
        object: ObjectRef::new(raw.object_kind, raw.object_id),
        object_repr: raw.object_repr,
        action,
        changes: raw.changes,
        actor_id: raw.actor_id,
        actor_repr: raw.actor_repr,
        remote_addr: raw.remote_addr,
        client: raw.client,
        timestamp,
        additional_data,
    })
}

impl EntryRepo {
    /// Persist an entry to the database
    ///
    /// Upserts by identity; the immutability guard has already reverted any
    /// protected-field changes by the time a write reaches this layer.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the write is rejected.
    pub fn persist_entry(conn: &Connection, entry: &LogEntry) -> Result<()> {
        let additional_data = match &entry.additional_data {
            Some(value) => Some(serde_json::to_string(value).map_err(auditrail_core::AuditError::from)?),
            None => None,
        };

        conn.execute(
            "INSERT INTO audit_entries (id, object_kind, object_id, object_repr, action, changes, \
                 actor_id, actor_repr, remote_addr, client, timestamp_us, additional_data)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
             ON CONFLICT(id) DO UPDATE SET
                object_kind = excluded.object_kind,
                object_id = excluded.object_id,
                object_repr = excluded.object_repr,
                action = excluded.action,
                changes = excluded.changes,
                actor_id = excluded.actor_id,
                actor_repr = excluded.actor_repr,
                remote_addr = excluded.remote_addr,
                client = excluded.client,
                timestamp_us = excluded.timestamp_us,
                additional_data = excluded.additional_data",
            rusqlite::params![
                entry.id,
                entry.object.kind,
                entry.object.id,
                entry.object_repr,
                entry.action.code(),
                entry.changes,
                entry.actor_id,
                entry.actor_repr,
                entry.remote_addr,
                entry.client,
                entry.timestamp.timestamp_micros(),
                additional_data,
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    /// Get an entry from the database by ID
    ///
    /// # Errors
    ///
    /// Returns `Persistence` on SQL failure, `Serialization` on a corrupt row.
    pub fn get_entry(conn: &Connection, entry_id: &str) -> Result<Option<LogEntry>> {
        let raw = conn
            .query_row(
                &format!(
                    "SELECT {} FROM audit_entries WHERE id = ?1",
                    ENTRY_COLUMNS
                ),
                rusqlite::params![entry_id],
                read_raw,
            )
            .optional()
            .map_err(from_rusqlite)?;

        raw.map(decode).transpose()
    }

    /// All entries for one object, newest first
    ///
    /// # Errors
    ///
    /// Returns `Persistence` on SQL failure, `Serialization` on a corrupt row.
    pub fn entries_for_object(conn: &Connection, object: &ObjectRef) -> Result<Vec<LogEntry>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM audit_entries \
                 WHERE object_kind = ?1 AND object_id = ?2 \
                 ORDER BY timestamp_us DESC",
                ENTRY_COLUMNS
            ))
            .map_err(from_rusqlite)?;

        let raws: Vec<RawEntryRow> = stmt
            .query_map(rusqlite::params![object.kind, object.id], read_raw)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        raws.into_iter().map(decode).collect()
    }

    /// All entries for the named identities of one kind, newest first
    ///
    /// # Errors
    ///
    /// Returns `Persistence` on SQL failure, `Serialization` on a corrupt row.
    pub fn entries_for_objects(
        conn: &Connection,
        kind: &str,
        ids: &[String],
    ) -> Result<Vec<LogEntry>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders: Vec<String> = (0..ids.len()).map(|i| format!("?{}", i + 2)).collect();
        let sql = format!(
            "SELECT {} FROM audit_entries \
             WHERE object_kind = ?1 AND object_id IN ({}) \
             ORDER BY timestamp_us DESC",
            ENTRY_COLUMNS,
            placeholders.join(", ")
        );

        let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;

        let mut params: Vec<&dyn rusqlite::ToSql> = vec![&kind];
        for id in ids {
            params.push(id);
        }

        let raws: Vec<RawEntryRow> = stmt
            .query_map(params.as_slice(), read_raw)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        raws.into_iter().map(decode).collect()
    }

    /// Total number of stored entries
    ///
    /// # Errors
    ///
    /// Returns `Persistence` on SQL failure.
    pub fn count(conn: &Connection) -> Result<usize> {
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM audit_entries", [], |row| row.get(0))
            .map_err(from_rusqlite)?;
        Ok(count as usize)
    }
}
