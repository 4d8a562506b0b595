//! Host-side application state: the single timer, the active display
//! options and the channels that carry updates to the display ticker

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::{Clock, MonotonicClock, TimerCore, TimerSnapshot};
use crate::{
    error::{Result, StopwatchError},
    format::{format_duration, FormatOptions},
};

/// Timer core as held by the host, with its clock chosen at construction
pub type HostTimer = TimerCore<Arc<dyn Clock>>;

/// Notifications sent to background tasks after each command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerEvent {
    Started,
    Stopped,
    Reset,
    SettingsChanged,
}

/// Shared state owned by the host shell.
///
/// Every core call goes through the `timer` mutex, which serializes them onto
/// one context. The lock is never held across an await.
#[derive(Debug)]
pub struct AppState {
    pub timer: Arc<Mutex<HostTimer>>,
    pub options: Arc<Mutex<FormatOptions>>,
    /// Server metadata
    pub start_time: Instant,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Command notifications for the display ticker
    pub event_tx: broadcast::Sender<TimerEvent>,
    /// Latest rendered display text
    pub display_tx: watch::Sender<String>,
    /// Keep the receiver alive to prevent channel closure
    pub _display_rx: watch::Receiver<String>,
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>> {
    mutex
        .lock()
        .map_err(|e| StopwatchError::StateUnavailable(format!("failed to lock {}: {}", what, e)))
}

impl AppState {
    /// Create a stopped stopwatch rendering with `options`
    pub fn new(options: FormatOptions) -> Self {
        Self::with_clock(options, Arc::new(MonotonicClock))
    }

    /// Like [`AppState::new`], reading time from `clock`
    pub fn with_clock(options: FormatOptions, clock: Arc<dyn Clock>) -> Self {
        let options = options.sanitized();
        let (event_tx, _) = broadcast::channel(100);
        let (display_tx, display_rx) = watch::channel(format_duration(0, &options));

        Self {
            timer: Arc::new(Mutex::new(TimerCore::with_clock(clock))),
            options: Arc::new(Mutex::new(options)),
            start_time: Instant::now(),
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            event_tx,
            display_tx,
            _display_rx: display_rx,
        }
    }

    /// Apply a command to the timer, record it and notify listeners
    fn dispatch<F>(&self, action: &str, command: F) -> Result<TimerSnapshot>
    where
        F: FnOnce(&mut HostTimer) -> Result<TimerEvent>,
    {
        let mut timer = lock(&self.timer, "timer")?;
        let event = command(&mut *timer)?;
        let snapshot = timer.snapshot()?;
        drop(timer); // Release the lock early

        info!("{} -> {:?} at {}ns", action, event, snapshot.elapsed_ns);
        self.record_action(action);

        if let Err(e) = self.event_tx.send(event) {
            debug!("No listeners for timer event: {}", e);
        }

        self.publish(self.render_snapshot(&snapshot)?);
        Ok(snapshot)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    pub fn start(&self) -> Result<TimerSnapshot> {
        self.dispatch("start", |timer| timer.start().map(|_| TimerEvent::Started))
    }

    pub fn stop(&self) -> Result<TimerSnapshot> {
        self.dispatch("stop", |timer| timer.stop().map(|_| TimerEvent::Stopped))
    }

    pub fn reset(&self) -> Result<TimerSnapshot> {
        self.dispatch("reset", |timer| {
            timer.reset();
            Ok(TimerEvent::Reset)
        })
    }

    pub fn toggle(&self) -> Result<TimerSnapshot> {
        self.dispatch("toggle", |timer| {
            let running = timer.toggle()?;
            Ok(if running { TimerEvent::Started } else { TimerEvent::Stopped })
        })
    }

    /// Current running flag and elapsed nanoseconds
    pub fn snapshot(&self) -> Result<TimerSnapshot> {
        lock(&self.timer, "timer")?.snapshot()
    }

    pub fn elapsed(&self) -> Result<u64> {
        lock(&self.timer, "timer")?.elapsed()
    }

    pub fn current_options(&self) -> Result<FormatOptions> {
        lock(&self.options, "format options").map(|options| options.clone())
    }

    /// Replace the display options (settings changed) and re-render
    pub fn update_options(&self, options: FormatOptions) -> Result<FormatOptions> {
        let options = options.sanitized();
        *lock(&self.options, "format options")? = options.clone();

        info!("Display options updated: {:?}", options);
        self.record_action("settings");

        if let Err(e) = self.event_tx.send(TimerEvent::SettingsChanged) {
            debug!("No listeners for settings change: {}", e);
        }

        self.refresh_display()?;
        Ok(options)
    }

    fn render_snapshot(&self, snapshot: &TimerSnapshot) -> Result<String> {
        let options = self.current_options()?;
        Ok(format_duration(snapshot.elapsed_ns, &options))
    }

    /// Format the current elapsed time with the current options
    pub fn render(&self) -> Result<String> {
        let snapshot = self.snapshot()?;
        self.render_snapshot(&snapshot)
    }

    fn publish(&self, display: String) {
        if let Err(e) = self.display_tx.send(display) {
            warn!("Failed to publish display update: {}", e);
        }
    }

    /// Render and publish the display text, returning it
    pub fn refresh_display(&self) -> Result<String> {
        let display = self.render()?;
        self.publish(display.clone());
        Ok(display)
    }

    /// Last published display text
    pub fn current_display(&self) -> String {
        self.display_tx.borrow().clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    pub fn subscribe_display(&self) -> watch::Receiver<String> {
        self.display_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(FormatOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use tokio::time::advance;

    use super::*;
    use crate::format::DisplayFormat;

    #[tokio::test(start_paused = true)]
    async fn test_commands_publish_display() {
        let state = AppState::default();
        assert_eq!(state.current_display(), "00:00:00.000 000 000");

        state.start().unwrap();
        advance(Duration::from_millis(1_500)).await;
        let snapshot = state.stop().unwrap();

        assert!(!snapshot.running);
        assert_eq!(snapshot.elapsed_ns, 1_500_000_000);
        assert_eq!(state.current_display(), "00:00:01.500 000 000");
    }

    #[tokio::test(start_paused = true)]
    async fn test_commands_emit_events() {
        let state = AppState::default();
        let mut events = state.subscribe_events();

        state.toggle().unwrap();
        state.toggle().unwrap();
        state.reset().unwrap();

        assert_eq!(events.recv().await.unwrap(), TimerEvent::Started);
        assert_eq!(events.recv().await.unwrap(), TimerEvent::Stopped);
        assert_eq!(events.recv().await.unwrap(), TimerEvent::Reset);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_rerenders_while_stopped() {
        let state = AppState::default();
        state.start().unwrap();
        advance(Duration::from_secs(2)).await;
        state.stop().unwrap();
        assert_eq!(state.current_display(), "00:00:02.000 000 000");

        state.reset().unwrap();
        assert_eq!(state.current_display(), "00:00:00.000 000 000");
        assert_eq!(state.elapsed().unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_options_rerenders_and_sanitizes() {
        let state = AppState::default();
        state.start().unwrap();
        advance(Duration::from_millis(2)).await;
        state.stop().unwrap();

        let applied = state
            .update_options(FormatOptions {
                show_us: false,
                show_ns: false,
                display_format: DisplayFormat::Scientific,
                planck_digits: 200,
                ..FormatOptions::default()
            })
            .unwrap();

        assert_eq!(applied.planck_digits, 40);
        assert_eq!(state.current_display(), "00h 00m 00s 2ms");
        assert_eq!(state.get_last_action().0.as_deref(), Some("settings"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_records_last_action() {
        let state = AppState::default();
        assert_eq!(state.get_last_action(), (None, None));

        state.start().unwrap();
        let (action, at) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("start"));
        assert!(at.is_some());
    }
}
