//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::{
    error::Result,
    format::{format_duration, FormatOptions},
    state::{AppState, TimerSnapshot},
};
use super::responses::{CommandResponse, HealthResponse, StatusResponse};

/// Turn the outcome of a timer command into an HTTP response
fn command_response(
    state: &AppState,
    command: &str,
    outcome: Result<TimerSnapshot>,
) -> std::result::Result<Json<CommandResponse>, StatusCode> {
    let snapshot = match outcome {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Failed to {} timer: {}", command, e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let options = match state.current_options() {
        Ok(options) => options,
        Err(e) => {
            error!("Failed to read display options: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    info!("{} endpoint called - timer {}", command,
          if snapshot.running { "running" } else { "stopped" });
    Ok(Json(CommandResponse::new(
        format!("Timer {}", command),
        snapshot,
        format_duration(snapshot.elapsed_ns, &options),
    )))
}

/// Handle POST /start - Start or resume the timer
pub async fn start_handler(State(state): State<Arc<AppState>>) -> std::result::Result<Json<CommandResponse>, StatusCode> {
    command_response(&state, "start", state.start())
}

/// Handle POST /stop - Pause the timer
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> std::result::Result<Json<CommandResponse>, StatusCode> {
    command_response(&state, "stop", state.stop())
}

/// Handle POST /reset - Stop and zero the timer
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> std::result::Result<Json<CommandResponse>, StatusCode> {
    command_response(&state, "reset", state.reset())
}

/// Handle POST /toggle - Start when stopped, stop when running
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> std::result::Result<Json<CommandResponse>, StatusCode> {
    command_response(&state, "toggle", state.toggle())
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> std::result::Result<Json<StatusResponse>, StatusCode> {
    let snapshot = match state.snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let options = match state.current_options() {
        Ok(o) => o,
        Err(e) => {
            error!("Failed to get display options: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        running: snapshot.running,
        elapsed_ns: snapshot.elapsed_ns,
        display: format_duration(snapshot.elapsed_ns, &options),
        options,
        uptime: state.get_uptime(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /display - Current display text, as the user would copy it
pub async fn display_handler(State(state): State<Arc<AppState>>) -> std::result::Result<String, StatusCode> {
    state.render().map_err(|e| {
        error!("Failed to render display: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle GET /settings - Current display options
pub async fn get_settings_handler(State(state): State<Arc<AppState>>) -> std::result::Result<Json<FormatOptions>, StatusCode> {
    state.current_options().map(Json).map_err(|e| {
        error!("Failed to get display options: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle PUT /settings - Replace display options
pub async fn update_settings_handler(
    State(state): State<Arc<AppState>>,
    Json(options): Json<FormatOptions>,
) -> std::result::Result<Json<FormatOptions>, StatusCode> {
    match state.update_options(options) {
        Ok(applied) => {
            info!("Settings endpoint called - display options updated");
            Ok(Json(applied))
        }
        Err(e) => {
            error!("Failed to update display options: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
