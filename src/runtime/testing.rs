//! Mock implementations for testing
//!
//! These mocks enable runtime testing without real I/O.

use super::traits::SessionStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// In-memory store that can be told to fail writes
#[derive(Default)]
pub struct MockSessionStore {
    values: Mutex<HashMap<(String, String), String>>,
    fail_writes: AtomicBool,
    /// Number of `write_values` calls that reached the store
    pub write_count: Mutex<usize>,
}

impl MockSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing serialization
    pub fn insert_raw(&self, client_id: &str, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert((client_id.to_string(), key.to_string()), value.to_string());
    }

    pub fn get_raw(&self, client_id: &str, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap()
            .get(&(client_id.to_string(), key.to_string()))
            .cloned()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn read_value(&self, client_id: &str, key: &str) -> Result<Option<String>, String> {
        Ok(self.get_raw(client_id, key))
    }

    async fn write_values(
        &self,
        client_id: &str,
        entries: &[(&str, String)],
    ) -> Result<(), String> {
        *self.write_count.lock().unwrap() += 1;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err("disk full".to_string());
        }
        let mut values = self.values.lock().unwrap();
        for (key, value) in entries {
            values.insert((client_id.to_string(), (*key).to_string()), value.clone());
        }
        Ok(())
    }

    async fn delete_values(&self, client_id: &str, keys: &[&str]) -> Result<(), String> {
        let mut values = self.values.lock().unwrap();
        for key in keys {
            values.remove(&(client_id.to_string(), (*key).to_string()));
        }
        Ok(())
    }
}
