//! Timer state and the start/stop/reset state machine

use serde::Serialize;
use tokio::time::Instant;
use tracing::debug;

use super::clock::{Clock, MonotonicClock};
use crate::error::Result;

/// Raw timer state: running flag, reference instant and frozen total
#[derive(Debug, Clone, Default)]
pub struct TimerState {
    pub running: bool,
    /// Clock reading taken at the last transition into running
    pub reference: Option<Instant>,
    /// Nanoseconds frozen at the last transition out of running
    pub accumulated_nanos: u64,
}

impl TimerState {
    /// Create a stopped timer with nothing accumulated
    pub fn new() -> Self {
        Self {
            running: false,
            reference: None,
            accumulated_nanos: 0,
        }
    }

    /// Effective elapsed nanoseconds as observed at `now`.
    ///
    /// A `now` earlier than the reference counts as zero progress.
    pub fn elapsed_at(&self, now: Instant) -> u64 {
        match (self.running, self.reference) {
            (true, Some(reference)) => {
                let delta = now.saturating_duration_since(reference).as_nanos();
                let delta = u64::try_from(delta).unwrap_or(u64::MAX);
                self.accumulated_nanos.saturating_add(delta)
            }
            _ => self.accumulated_nanos,
        }
    }
}

/// Point-in-time view of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub running: bool,
    pub elapsed_ns: u64,
}

/// Stopwatch state machine with two states, Stopped and Running
#[derive(Debug)]
pub struct TimerCore<C: Clock = MonotonicClock> {
    state: TimerState,
    clock: C,
}

impl TimerCore<MonotonicClock> {
    /// Create a stopped timer on the default monotonic clock
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock)
    }
}

impl Default for TimerCore<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TimerCore<C> {
    /// Create a stopped timer reading time from `clock`
    pub fn with_clock(clock: C) -> Self {
        Self {
            state: TimerState::new(),
            clock,
        }
    }

    /// Start or resume accumulation. No-op while running.
    pub fn start(&mut self) -> Result<()> {
        if self.state.running {
            return Ok(());
        }
        let now = self.clock.now()?;
        self.state.reference = Some(now);
        self.state.running = true;
        debug!("Timer started with {}ns carried over", self.state.accumulated_nanos);
        Ok(())
    }

    /// Freeze the elapsed total. No-op while stopped.
    pub fn stop(&mut self) -> Result<()> {
        if !self.state.running {
            return Ok(());
        }
        let now = self.clock.now()?;
        self.state.accumulated_nanos = self.state.elapsed_at(now);
        self.state.running = false;
        self.state.reference = None;
        debug!("Timer stopped at {}ns", self.state.accumulated_nanos);
        Ok(())
    }

    /// Return to Stopped with zero elapsed, whatever the prior state
    pub fn reset(&mut self) {
        self.state = TimerState::new();
        debug!("Timer reset");
    }

    /// Start when stopped, stop when running. Returns the new running flag.
    pub fn toggle(&mut self) -> Result<bool> {
        if self.state.running {
            self.stop()?;
        } else {
            self.start()?;
        }
        Ok(self.state.running)
    }

    /// Effective elapsed nanoseconds; never mutates state
    pub fn elapsed(&self) -> Result<u64> {
        if !self.state.running {
            return Ok(self.state.accumulated_nanos);
        }
        let now = self.clock.now()?;
        Ok(self.state.elapsed_at(now))
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn snapshot(&self) -> Result<TimerSnapshot> {
        Ok(TimerSnapshot {
            running: self.state.running,
            elapsed_ns: self.elapsed()?,
        })
    }

    /// Borrow the raw state
    pub fn state(&self) -> &TimerState {
        &self.state
    }
}
