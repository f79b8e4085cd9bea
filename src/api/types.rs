//! API request and response types

use crate::assistant::{Intent, SessionState};
use crate::db::Message;
use serde::{Deserialize, Serialize};

/// Request to send a message to the assistant
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Reply to one message
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_state: SessionState,
    pub intent: Intent,
}

/// Full transcript and state for a client
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<Message>,
    pub session_state: SessionState,
}

/// Response for lifecycle actions
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Response for the version endpoint
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
