//! Database module for the plushie assistant
//!
//! Durable key/value storage: each client owns a handful of independently
//! keyed JSON blobs.

mod schema;

pub use schema::*;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Database connection lock poisoned")]
    LockPoisoned,
}

pub type DbResult<T> = Result<T, DbError>;

/// Thread-safe database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::LockPoisoned)
    }

    fn run_migrations(&self) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    // ==================== Key/Value Operations ====================

    /// Read one value, `None` if the key was never written or was deleted
    pub fn get_value(&self, client_id: &str, key: &str) -> DbResult<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM client_storage WHERE client_id = ?1 AND key = ?2",
                params![client_id, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Upsert several values in one transaction
    pub fn put_values(&self, client_id: &str, entries: &[(&str, String)]) -> DbResult<()> {
        let mut conn = self.lock()?;
        let now = Utc::now().to_rfc3339();
        let tx = conn.transaction()?;
        for (key, value) in entries {
            tx.execute(
                "INSERT INTO client_storage (client_id, key, value, updated_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(client_id, key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![client_id, key, value, now],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Delete keys; returns how many rows existed
    pub fn delete_values(&self, client_id: &str, keys: &[&str]) -> DbResult<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let mut deleted = 0;
        for key in keys {
            deleted += tx.execute(
                "DELETE FROM client_storage WHERE client_id = ?1 AND key = ?2",
                params![client_id, key],
            )?;
        }
        tx.commit()?;
        Ok(deleted)
    }

    /// Keys currently stored for a client, sorted
    #[allow(dead_code)] // Used in tests
    pub fn list_keys(&self, client_id: &str) -> DbResult<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT key FROM client_storage WHERE client_id = ?1 ORDER BY key")?;
        let rows = stmt.query_map(params![client_id], |row| row.get(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }
}
