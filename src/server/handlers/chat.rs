use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::server::config::AppState;
use crate::server::services::store::ConversationTurn;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub history: Vec<ConversationTurn>,
}

/// Always answers 200 on a completed exchange; a generation failure is
/// surfaced as error text inside `response`, not as an HTTP error.
pub async fn get_response(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<serde_json::Value>)> {
    info!("Handling chat message");

    let outcome = state
        .conversation
        .respond(&request.message)
        .await
        .map_err(|e| {
            error!("Failed to load conversation store: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })?;

    Ok(Json(ChatResponse {
        response: outcome.response,
        history: outcome.history,
    }))
}
