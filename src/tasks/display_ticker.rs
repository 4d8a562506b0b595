//! Display refresh background task

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::broadcast::{self, error::RecvError},
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

use crate::state::{AppState, TimerEvent};

/// Re-render the display every `tick` while the timer runs.
///
/// Idle while stopped; wakes on timer events. Returns when the event channel
/// closes.
pub async fn display_ticker_task(state: Arc<AppState>, tick: Duration) {
    info!("Starting display ticker task ({:?} interval)", tick);

    let mut events = state.subscribe_events();

    loop {
        let running = match events.recv().await {
            Ok(TimerEvent::Started) => true,
            Ok(event) => {
                debug!("Display ticker received {:?} while idle", event);
                refresh(&state);
                false
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Display ticker lagged by {} events", skipped);
                resync(&state)
            }
            Err(RecvError::Closed) => {
                info!("Timer event channel closed, stopping display ticker");
                return;
            }
        };

        if running && !tick_while_running(&state, &mut events, tick).await {
            return;
        }
    }
}

/// Refresh on every tick until the timer halts. Returns false when the task
/// should exit.
async fn tick_while_running(
    state: &AppState,
    events: &mut broadcast::Receiver<TimerEvent>,
    tick: Duration,
) -> bool {
    debug!("Timer running, refreshing display every {:?}", tick);

    let mut ticker = interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = state.refresh_display() {
                    error!("Failed to refresh display: {}", e);
                    if e.is_fatal() {
                        return false;
                    }
                }
            }

            event = events.recv() => {
                match event {
                    Ok(TimerEvent::Stopped) | Ok(TimerEvent::Reset) => {
                        debug!("Timer halted, final display refresh");
                        refresh(state);
                        return true;
                    }
                    // Next tick picks these up
                    Ok(TimerEvent::Started) | Ok(TimerEvent::SettingsChanged) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Display ticker lagged by {} events", skipped);
                        if !resync(state) {
                            return true;
                        }
                    }
                    Err(RecvError::Closed) => return false,
                }
            }
        }
    }
}

fn refresh(state: &AppState) {
    if let Err(e) = state.refresh_display() {
        error!("Failed to refresh display: {}", e);
    }
}

/// Re-render after missed events. Returns whether the timer is running.
fn resync(state: &AppState) -> bool {
    refresh(state);
    match state.snapshot() {
        Ok(snapshot) => snapshot.running,
        Err(e) => {
            error!("Failed to read timer state: {}", e);
            false
        }
    }
}
