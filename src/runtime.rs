//! Session runtime for the assistant
//!
//! Owns the read-modify-write-persist cycle around the dialogue engine.
//! Calls for the same client are serialized; different clients run
//! concurrently.

mod session;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use session::AssistantSession;
pub use traits::*;

use crate::assistant::Reply;
use crate::db::{MESSAGES_KEY, SESSION_STATE_KEY};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

/// Type alias for production runtime with the SQLite store
pub type ProductionRuntime = RuntimeManager<DatabaseStorage>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Per-client slot; `None` until the session is first loaded
type SessionSlot = Arc<Mutex<Option<AssistantSession>>>;

/// Number of client sessions kept in memory before idle ones are evicted
pub const DEFAULT_CACHE_LIMIT: usize = 1024;

/// Manager for all client sessions
pub struct RuntimeManager<S> {
    store: S,
    sessions: RwLock<HashMap<String, SessionSlot>>,
    cache_limit: usize,
}

impl<S: SessionStore> RuntimeManager<S> {
    pub fn new(store: S) -> Self {
        Self::with_cache_limit(store, DEFAULT_CACHE_LIMIT)
    }

    pub fn with_cache_limit(store: S, cache_limit: usize) -> Self {
        Self {
            store,
            sessions: RwLock::new(HashMap::new()),
            cache_limit,
        }
    }

    #[allow(dead_code)] // Useful for tests
    pub fn store(&self) -> &S {
        &self.store
    }

    async fn cached_slot(&self, client_id: &str) -> Option<SessionSlot> {
        self.sessions.read().await.get(client_id).map(Arc::clone)
    }

    async fn slot(&self, client_id: &str) -> SessionSlot {
        if let Some(slot) = self.cached_slot(client_id).await {
            return slot;
        }

        let mut sessions = self.sessions.write().await;
        if let Some(slot) = sessions.get(client_id) {
            return Arc::clone(slot);
        }
        if sessions.len() >= self.cache_limit {
            evict_idle(&mut sessions, self.cache_limit);
        }
        let slot = SessionSlot::default();
        sessions.insert(client_id.to_string(), Arc::clone(&slot));
        slot
    }

    /// Lock the client's slot. A slot retired by `clear` while we waited is
    /// skipped so every caller for a client shares one mutex.
    async fn lock_slot(&self, client_id: &str) -> OwnedMutexGuard<Option<AssistantSession>> {
        loop {
            let slot = self.slot(client_id).await;
            let guard = Arc::clone(&slot).lock_owned().await;
            let current = self
                .sessions
                .read()
                .await
                .get(client_id)
                .is_some_and(|cached| Arc::ptr_eq(cached, &slot));
            if current {
                return guard;
            }
        }
    }

    async fn loaded(
        &self,
        client_id: &str,
        cached: &mut Option<AssistantSession>,
    ) -> Result<AssistantSession, RuntimeError> {
        if let Some(session) = cached {
            return Ok(session.clone());
        }
        let session = AssistantSession::load(&self.store, client_id).await?;
        *cached = Some(session.clone());
        Ok(session)
    }

    /// Run one exchange for a client and persist the result.
    ///
    /// The cached session only changes after the write succeeded, so a failed
    /// write leaves transcript and state as they were.
    pub async fn send_message(
        &self,
        client_id: &str,
        text: &str,
    ) -> Result<(Reply, AssistantSession), RuntimeError> {
        let mut guard = self.lock_slot(client_id).await;

        let mut next = self.loaded(client_id, &mut guard).await?;
        let reply = next.exchange(text, &mut rand::thread_rng());
        next.persist(&self.store, client_id).await?;

        tracing::debug!(
            client_id = %client_id,
            intent = ?reply.intent,
            mode = reply.new_state.mode(),
            "Assistant replied"
        );

        *guard = Some(next.clone());
        Ok((reply, next))
    }

    /// Current transcript and state for a client.
    ///
    /// Reads for a client without a cached session go straight to the store
    /// and leave the cache alone.
    pub async fn history(&self, client_id: &str) -> Result<AssistantSession, RuntimeError> {
        if self.cached_slot(client_id).await.is_none() {
            return AssistantSession::load(&self.store, client_id).await;
        }
        let mut guard = self.lock_slot(client_id).await;
        self.loaded(client_id, &mut guard).await
    }

    /// Delete both stored blobs and drop the cached session
    pub async fn clear(&self, client_id: &str) -> Result<(), RuntimeError> {
        let mut guard = self.lock_slot(client_id).await;

        self.store
            .delete_values(client_id, &[MESSAGES_KEY, SESSION_STATE_KEY])
            .await
            .map_err(RuntimeError::Storage)?;
        *guard = None;
        self.sessions.write().await.remove(client_id);

        tracing::info!(client_id = %client_id, "Cleared assistant history");
        Ok(())
    }

    #[cfg(test)]
    async fn cached_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Drop slots nobody holds until there is room for one more entry. A slot
/// held only by the map has no call in flight and its session is already
/// persisted. When every slot is busy the map grows past the limit.
fn evict_idle(sessions: &mut HashMap<String, SessionSlot>, limit: usize) {
    let excess = sessions.len() + 1 - limit;
    let idle: Vec<String> = sessions
        .iter()
        .filter(|(_, slot)| Arc::strong_count(slot) == 1)
        .map(|(client_id, _)| client_id.clone())
        .take(excess)
        .collect();

    for client_id in &idle {
        sessions.remove(client_id);
    }
    tracing::debug!(evicted = idle.len(), "Evicted idle assistant sessions");
}
