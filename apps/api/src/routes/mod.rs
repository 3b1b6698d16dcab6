pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/interpret", post(handlers::handle_interpret))
        .route("/api/v1/suggest", post(handlers::handle_suggest))
        .route("/api/v1/announce", post(handlers::handle_announce))
        .with_state(state)
}
