use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::chat::{generate_reply, ChatRequest, ChatResponse};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/chat
///
/// A blank message is rejected before the AI capability is checked.
pub async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload?;
    request.message_text()?;
    let generator = state.generator.as_ref().ok_or(AppError::AiUnavailable)?;
    let response = generate_reply(generator.as_ref(), request).await?;
    Ok(Json(response))
}
