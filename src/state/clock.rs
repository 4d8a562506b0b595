//! Monotonic clock source for the timer core

use std::{fmt, sync::Arc};

use tokio::time::Instant;

use crate::error::Result;

/// Source of monotonic timestamps.
///
/// The timer core only ever compares readings taken from the same clock, so
/// implementations need to be monotonic but not tied to wall time.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Read the current instant
    fn now(&self) -> Result<Instant>;
}

/// Default clock backed by `tokio::time::Instant`.
///
/// Follows tokio's paused test clock, which keeps time-based tests
/// deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Result<Instant> {
        Ok(Instant::now())
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Result<Instant> {
        (**self).now()
    }
}
