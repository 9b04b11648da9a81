//! SQLite-backed entry store
//!
//! Owns a connection and implements the core's [`EntryStore`] contract over
//! the repository layer. Each write is a single atomic statement; there is
//! no cross-entry transaction because the engine never writes more than one
//! entry per call.

use crate::db;
use crate::errors::Result;
use crate::migrations::apply_migrations;
use crate::repo::EntryRepo;
use auditrail_core::errors::AuditError;
use auditrail_core::model::LogEntry;
use auditrail_core::ops::EntryStore;
use auditrail_core_types::ObjectRef;
use rusqlite::Connection;
use std::path::Path;

/// Entry store persisting to SQLite
pub struct SqliteEntryStore {
    conn: Connection,
}

impl SqliteEntryStore {
    /// Open (or create) a store at the given path, applying migrations
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the database cannot be opened or migrated.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut conn = db::open(path)?;
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory store (for testing), applying migrations
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the database cannot be created or migrated.
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = db::open_in_memory()?;
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    /// Total number of stored entries
    ///
    /// # Errors
    ///
    /// Returns `Persistence` on SQL failure.
    pub fn entry_count(&self) -> Result<usize> {
        EntryRepo::count(&self.conn)
    }

    /// Access the underlying connection (maintenance, ad-hoc queries)
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl EntryStore for SqliteEntryStore {
    fn create(&mut self, entry: LogEntry) -> Result<LogEntry> {
        EntryRepo::persist_entry(&self.conn, &entry)?;
        Ok(entry)
    }

    fn get_prior(&self, entry_id: &str) -> Result<Option<LogEntry>> {
        EntryRepo::get_entry(&self.conn, entry_id)
    }

    fn update(&mut self, entry: LogEntry) -> Result<LogEntry> {
        if EntryRepo::get_entry(&self.conn, &entry.id)?.is_none() {
            return Err(AuditError::EntryNotFound {
                entry_id: entry.id.clone(),
            });
        }
        EntryRepo::persist_entry(&self.conn, &entry)?;
        Ok(entry)
    }

    fn entries_for_object(&self, object: &ObjectRef) -> Result<Vec<LogEntry>> {
        EntryRepo::entries_for_object(&self.conn, object)
    }

    fn entries_for_objects(&self, kind: &str, ids: &[String]) -> Result<Vec<LogEntry>> {
        EntryRepo::entries_for_objects(&self.conn, kind, ids)
    }
}
