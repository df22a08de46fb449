use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/guess/:side", post(handlers::guess_form))
        .route("/flip/:times", post(handlers::flip_form))
        .route("/reset", post(handlers::reset_form))
        .route("/api/state", get(handlers::get_state))
        .route("/api/guess", post(handlers::guess))
        .route("/api/flip", post(handlers::flip))
        .route("/api/reset", post(handlers::reset))
        .with_state(state)
}
