//! Server configuration from environment variables

use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_MESSAGE_CHARS: usize = 2000;

/// Runtime configuration, read once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub port: u16,
    pub max_message_chars: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; unparseable values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = lookup("PLUSHIE_DB_PATH").map_or_else(
            || {
                let home = lookup("HOME").unwrap_or_else(|| "/tmp".to_string());
                PathBuf::from(format!("{home}/.plushie-assistant/assistant.db"))
            },
            PathBuf::from,
        );

        let port = lookup("PLUSHIE_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let max_message_chars = lookup("PLUSHIE_MAX_MESSAGE_CHARS")
            .and_then(|n| n.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_MESSAGE_CHARS);

        Self {
            db_path,
            port,
            max_message_chars,
        }
    }
}
