//! HTTP request handlers

use super::types::{
    ChatRequest, ChatResponse, ErrorResponse, HistoryResponse, SuccessResponse, VersionResponse,
};
use super::AppState;
use crate::runtime::RuntimeError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

const MAX_CLIENT_ID_LEN: usize = 64;

/// Client-facing text for runtime failures; the details only go to the log
const INTERNAL_ERROR_MESSAGE: &str = "Assistant storage unavailable";

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Transcript and state
        .route("/api/assistant/:client_id", get(get_history))
        // One exchange
        .route("/api/assistant/:client_id/messages", post(send_message))
        // Clear history
        .route("/api/assistant/:client_id/clear", post(clear_history))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Assistant
// ============================================================

async fn get_history(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<HistoryResponse>, AppError> {
    validate_client_id(&client_id)?;

    let session = state.runtime.history(&client_id).await?;

    Ok(Json(HistoryResponse {
        messages: session.messages,
        session_state: session.state,
    }))
}

async fn send_message(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    validate_client_id(&client_id)?;

    let chars = req.text.chars().count();
    if chars > state.max_message_chars {
        return Err(AppError::BadRequest(format!(
            "Message too long ({chars} characters, limit {})",
            state.max_message_chars
        )));
    }

    let (reply, _) = state.runtime.send_message(&client_id, &req.text).await?;

    Ok(Json(ChatResponse {
        response: reply.response,
        session_state: reply.new_state,
        intent: reply.intent,
    }))
}

async fn clear_history(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    validate_client_id(&client_id)?;

    state.runtime.clear(&client_id).await?;

    Ok(Json(SuccessResponse { success: true }))
}

async fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: concat!("plushie-assistant ", env!("CARGO_PKG_VERSION")),
    })
}

fn validate_client_id(client_id: &str) -> Result<(), AppError> {
    let valid = !client_id.is_empty()
        && client_id.len() <= MAX_CLIENT_ID_LEN
        && client_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!("Invalid client id: {client_id}")))
    }
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Internal(String),
}

impl From<RuntimeError> for AppError {
    fn from(e: RuntimeError) -> Self {
        tracing::error!(error = %e, "Assistant runtime failed");
        AppError::Internal(INTERNAL_ERROR_MESSAGE.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_router() -> Router {
        let db = Database::open_in_memory().unwrap();
        create_router(AppState::new(db, 200))
    }

    async fn call(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_story_round_trip() {
        let router = test_router();

        let (status, body) = call(
            &router,
            post_json(
                "/api/assistant/client-1/messages",
                &json!({ "text": "tell me a plushie story" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["intent"], "story");
        assert_eq!(body["session_state"], json!({ "mode": "idle" }));
        assert!(body["response"].as_str().unwrap().contains("The End"));

        let (status, body) = call(&router, get("/api/assistant/client-1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][1]["role"], "assistant");
    }

    #[tokio::test]
    async fn test_recommendation_state_is_reported() {
        let router = test_router();

        let (_, body) = call(
            &router,
            post_json(
                "/api/assistant/c/messages",
                &json!({ "text": "which plushie should I get?" }),
            ),
        )
        .await;

        assert_eq!(
            body["session_state"],
            json!({ "mode": "recommendation", "recommendationStep": 1, "preferences": {} })
        );
    }

    #[tokio::test]
    async fn test_clear_empties_history() {
        let router = test_router();

        call(
            &router,
            post_json("/api/assistant/c/messages", &json!({ "text": "hello" })),
        )
        .await;

        let (status, body) = call(
            &router,
            Request::post("/api/assistant/c/clear")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (_, body) = call(&router, get("/api/assistant/c")).await;
        assert_eq!(body["messages"], json!([]));
        assert_eq!(body["session_state"], json!({ "mode": "idle" }));
    }

    #[tokio::test]
    async fn test_invalid_client_id_is_rejected() {
        let router = test_router();

        let (status, body) = call(&router, get("/api/assistant/not%20valid")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Invalid client id"));
    }

    #[tokio::test]
    async fn test_overlong_message_is_rejected() {
        let router = test_router();

        let (status, _) = call(
            &router,
            post_json("/api/assistant/c/messages", &json!({ "text": "a".repeat(201) })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = call(&router, get("/api/assistant/c")).await;
        assert_eq!(body["messages"], json!([]));
    }

    #[test]
    fn test_validate_client_id() {
        assert!(validate_client_id("abc-DEF_123").is_ok());
        assert!(validate_client_id("").is_err());
        assert!(validate_client_id("a/b").is_err());
        assert!(validate_client_id(&"x".repeat(MAX_CLIENT_ID_LEN + 1)).is_err());
    }

    #[tokio::test]
    async fn test_runtime_errors_hide_storage_details() {
        let error = AppError::from(RuntimeError::Storage(
            "Database error: no such table: client_storage".to_string(),
        ));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
        assert!(!bytes.windows(5).any(|w| w == b"table"));
    }
}
