//! Error types shared by the timer core, the formatter and the host shell

use thiserror::Error;

/// Errors surfaced by the stopwatch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StopwatchError {
    /// The monotonic clock could not be read. Fatal to the session.
    #[error("monotonic clock unavailable: {0}")]
    ClockUnavailable(String),

    /// A format option could not be honoured as given.
    #[error("invalid format options: {0}")]
    InvalidOptions(String),

    /// Shared host state could not be accessed (poisoned lock).
    #[error("stopwatch state unavailable: {0}")]
    StateUnavailable(String),
}

impl StopwatchError {
    /// Whether the session can keep running after this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, StopwatchError::ClockUnavailable(_) | StopwatchError::StateUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, StopwatchError>;
