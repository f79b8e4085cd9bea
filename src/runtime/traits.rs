//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the session runtime with mock implementations.

use async_trait::async_trait;
use std::sync::Arc;

/// Durable per-client key/value storage
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read one serialized value
    async fn read_value(&self, client_id: &str, key: &str) -> Result<Option<String>, String>;

    /// Write all entries atomically
    async fn write_values(&self, client_id: &str, entries: &[(&str, String)])
        -> Result<(), String>;

    /// Delete keys; missing keys are not an error
    async fn delete_values(&self, client_id: &str, keys: &[&str]) -> Result<(), String>;
}

// ============================================================================
// Arc implementation for trait objects
// ============================================================================

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn read_value(&self, client_id: &str, key: &str) -> Result<Option<String>, String> {
        (**self).read_value(client_id, key).await
    }

    async fn write_values(
        &self,
        client_id: &str,
        entries: &[(&str, String)],
    ) -> Result<(), String> {
        (**self).write_values(client_id, entries).await
    }

    async fn delete_values(&self, client_id: &str, keys: &[&str]) -> Result<(), String> {
        (**self).delete_values(client_id, keys).await
    }
}

// ============================================================================
// Production Adapter
// ============================================================================

use crate::db::Database;

/// Adapter to use Database as `SessionStore`
#[derive(Clone)]
pub struct DatabaseStorage {
    db: Database,
}

impl DatabaseStorage {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    #[allow(dead_code)] // Useful for tests
    pub fn inner(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl SessionStore for DatabaseStorage {
    async fn read_value(&self, client_id: &str, key: &str) -> Result<Option<String>, String> {
        self.db
            .get_value(client_id, key)
            .map_err(|e| e.to_string())
    }

    async fn write_values(
        &self,
        client_id: &str,
        entries: &[(&str, String)],
    ) -> Result<(), String> {
        self.db
            .put_values(client_id, entries)
            .map_err(|e| e.to_string())
    }

    async fn delete_values(&self, client_id: &str, keys: &[&str]) -> Result<(), String> {
        self.db
            .delete_values(client_id, keys)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
