use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::errors::AppError;
use crate::feedback::{generate_feedback, FeedbackRequest, FeedbackResponse};
use crate::state::AppState;

/// POST /api/v1/cv/feedback
pub async fn handle_cv_feedback(
    State(state): State<AppState>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let Json(request) = payload?;
    let generator = state.generator.as_ref().ok_or(AppError::AiUnavailable)?;
    let response = generate_feedback(generator.as_ref(), state.cv_source.as_ref(), request).await?;
    Ok(Json(response))
}
