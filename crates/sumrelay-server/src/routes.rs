//! HTTP surface: `POST /summarize`.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tracing::{debug, warn};

use sumrelay_core::types::SummarizeResult;

use crate::dispatcher::Dispatcher;
use crate::error::RelayError;

/// Largest accepted request body. Larger bodies fail validation.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Shared handler state. Read-only for the life of the process.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}

/// Build the router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/summarize", post(summarize))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

/// A body that is not JSON (or lacks a JSON content type) is treated as
/// having no `text`, so it fails validation like any other bad input.
async fn summarize(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SummarizeResult>, RelayError> {
    let body = match body {
        Ok(Json(value)) => value,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            warn!(limit = MAX_BODY_BYTES, "Request body too large");
            Value::Null
        }
        Err(rejection) => {
            debug!(
                status = %rejection.status(),
                reason = %rejection.body_text(),
                "Unreadable request body"
            );
            Value::Null
        }
    };

    state.dispatcher.handle(&body).await.map(Json)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
