pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Screening conversation API
        .route("/api/v1/chat", post(handlers::handle_chat))
        .route("/api/v1/session/reset", post(handlers::handle_reset))
        .with_state(state)
}
