pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers::handle_chat;
use crate::feedback::handlers::handle_cv_feedback;
use crate::matching::handlers::handle_match;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/matches", post(handle_match))
        // CV feedback API
        .route("/api/v1/cv/feedback", post(handle_cv_feedback))
        // Career-advisor chat
        .route("/api/v1/chat", post(handle_chat))
        .with_state(state)
}
