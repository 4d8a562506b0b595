//! HTTP API module
//!
//! The host shell's command surface: timer commands, status queries and
//! display settings.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/start", post(start_handler))
        .route("/stop", post(stop_handler))
        .route("/reset", post(reset_handler))
        .route("/toggle", post(toggle_handler))
        .route("/status", get(status_handler))
        .route("/display", get(display_handler))
        .route("/settings", get(get_settings_handler).put(update_settings_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
