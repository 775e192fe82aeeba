//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    infrastructure::dto::{http::RoomStateDto, websocket::MessageDto},
    ui::state::AppState,
    usecase::EngineError,
};

fn unavailable(error: EngineError) -> StatusCode {
    tracing::error!("Broadcast engine unavailable: {}", error);
    StatusCode::SERVICE_UNAVAILABLE
}

/// Liveness text for plain HTTP clients
pub async fn root() -> &'static str {
    "Chat server is operational"
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Recent message history, oldest first, in the same shape as `new-message`
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MessageDto>>, StatusCode> {
    let messages = state
        .engine
        .recent_history(state.init_history_len)
        .await
        .map_err(unavailable)?;

    // Domain Model から DTO への変換
    Ok(Json(messages.iter().map(MessageDto::from).collect()))
}

/// Debug endpoint to get current room state (for testing purposes)
pub async fn debug_room_state(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RoomStateDto>, StatusCode> {
    let snapshot = state.engine.snapshot().await.map_err(unavailable)?;
    Ok(Json(RoomStateDto::from(&snapshot)))
}
