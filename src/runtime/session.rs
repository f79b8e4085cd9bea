//! One client's transcript and dialogue state

use super::traits::SessionStore;
use super::RuntimeError;
use crate::assistant::{process_message, Reply, SessionState};
use crate::db::{Message, MESSAGES_KEY, SESSION_STATE_KEY};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Transcript plus dialogue state, persisted as two independent blobs
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssistantSession {
    pub messages: Vec<Message>,
    pub state: SessionState,
}

impl AssistantSession {
    /// Load both blobs for a client.
    ///
    /// A missing blob yields its default. A blob that does not parse is
    /// logged and replaced by its default; only store failures are errors.
    pub async fn load<S: SessionStore + ?Sized>(
        store: &S,
        client_id: &str,
    ) -> Result<Self, RuntimeError> {
        let messages = read_or_default(store, client_id, MESSAGES_KEY).await?;
        let state = read_or_default(store, client_id, SESSION_STATE_KEY).await?;
        Ok(Self { messages, state })
    }

    /// Run one exchange and append both sides to the transcript
    pub fn exchange<R: Rng + ?Sized>(&mut self, text: &str, rng: &mut R) -> Reply {
        let reply = process_message(text, &self.state, rng);
        self.messages.push(Message::user(text));
        self.messages.push(Message::assistant(reply.response.clone()));
        self.state = reply.new_state.clone();
        reply
    }

    /// Write transcript and state in one store transaction
    pub async fn persist<S: SessionStore + ?Sized>(
        &self,
        store: &S,
        client_id: &str,
    ) -> Result<(), RuntimeError> {
        let messages = serde_json::to_string(&self.messages)?;
        let state = serde_json::to_string(&self.state)?;
        store
            .write_values(
                client_id,
                &[(MESSAGES_KEY, messages), (SESSION_STATE_KEY, state)],
            )
            .await
            .map_err(RuntimeError::Storage)
    }
}

async fn read_or_default<S, T>(store: &S, client_id: &str, key: &str) -> Result<T, RuntimeError>
where
    S: SessionStore + ?Sized,
    T: DeserializeOwned + Default,
{
    let Some(raw) = store
        .read_value(client_id, key)
        .await
        .map_err(RuntimeError::Storage)?
    else {
        return Ok(T::default());
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(
                client_id = %client_id,
                key = %key,
                error = %e,
                "Discarding malformed stored value"
            );
            Ok(T::default())
        }
    }
}
