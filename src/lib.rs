//! Nano Stopwatch - a nanosecond stopwatch with multi-scale display
//!
//! The library holds the timer state machine ([`state::TimerCore`]), the
//! duration formatter ([`format::format_duration`]) and a small HTTP host
//! shell that forwards start/stop/reset/toggle commands and serves the
//! rendered display.

pub mod config;
pub mod error;
pub mod format;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::StopwatchError;
pub use format::{format_duration, DisplayFormat, FormatOptions};
pub use state::{AppState, TimerCore};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
