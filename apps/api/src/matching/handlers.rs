//! Axum route handlers for the Matching API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use crate::errors::AppError;
use crate::matching::models::{MatchRequest, MatchResult};
use crate::state::AppState;

/// POST /api/v1/matches
///
/// Scores the supplied jobs against the candidate and returns the ordered match list
/// plus the full score table. AI and CV extraction failures never fail the request.
pub async fn handle_match(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MatchResult>, AppError> {
    let Json(body) = payload?;
    // Parsed here rather than by the extractor so shape errors get the API error body.
    let request: MatchRequest = serde_json::from_value(body)
        .map_err(|e| AppError::Validation(format!("Invalid match request: {e}")))?;

    let result = state.matcher.match_jobs(request).await?;
    Ok(Json(result))
}
