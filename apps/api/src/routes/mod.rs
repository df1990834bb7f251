pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::export::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_request_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        // Export API
        .route("/api/v1/exports/pdf", post(handlers::handle_export_pdf))
        .route("/api/v1/exports/preview", post(handlers::handle_export_preview))
        .route("/api/v1/exports/save", post(handlers::handle_export_save))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
