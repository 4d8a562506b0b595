//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{format::FormatOptions, state::TimerSnapshot};

/// Response for the start/stop/reset/toggle endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub elapsed_ns: u64,
    pub display: String,
}

impl CommandResponse {
    /// Build a response from the timer state right after a command
    pub fn new(message: String, snapshot: TimerSnapshot, display: String) -> Self {
        Self {
            status: if snapshot.running { "running" } else { "stopped" }.to_string(),
            message,
            timestamp: Utc::now(),
            elapsed_ns: snapshot.elapsed_ns,
            display,
        }
    }
}

/// Full status of the stopwatch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub running: bool,
    pub elapsed_ns: u64,
    pub display: String,
    pub options: FormatOptions,
    pub uptime: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
