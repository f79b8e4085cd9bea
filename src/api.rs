//! HTTP API for the plushie assistant

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::db::Database;
use crate::runtime::{DatabaseStorage, ProductionRuntime, RuntimeManager};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<ProductionRuntime>,
    /// Longest accepted message, in characters
    pub max_message_chars: usize,
}

impl AppState {
    pub fn new(db: Database, max_message_chars: usize) -> Self {
        Self {
            runtime: Arc::new(RuntimeManager::new(DatabaseStorage::new(db))),
            max_message_chars,
        }
    }
}
