//! State management module
//!
//! This module contains the timer state machine, its clock source and the
//! shared host state built around them.

pub mod clock;
pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use clock::{Clock, MonotonicClock};
pub use app_state::{AppState, HostTimer, TimerEvent};
pub use timer_state::{TimerCore, TimerSnapshot, TimerState};
