use axum::{extract::State, routing::post, Json, Router};
use tracing::instrument;

use crate::{app_state::AppState, domain::chat::ChatOutcome, routes::ApiError};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(chat))
}

#[instrument(name = "POST /chat", skip(app_state, body))]
async fn chat(
    State(app_state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ChatOutcome>, ApiError> {
    // Extracted by hand: a missing or non-string userMessage must be a 400,
    // not a deserialization rejection.
    let user_message = body
        .get("userMessage")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .ok_or_else(|| ApiError::bad_request("userMessage is required"))?;
    let full_context = body
        .get("fullContext")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    let chat = app_state
        .chat_service()
        .ok_or_else(|| ApiError::internal("Server AI key is not configured"))?;

    let library = app_state.library_snapshot().await;
    let outcome = chat.answer(&library, user_message, full_context).await?;

    tracing::debug!(
        finish_reason = ?outcome.finish_reason,
        context_chars = outcome.context_char_count,
        model = %outcome.model_used,
        "Chat answered"
    );

    Ok(Json(outcome))
}
