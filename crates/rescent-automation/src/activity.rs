//! Human-activity detection.
//!
//! Input events do not advance the last-activity timestamp immediately:
//! every event resets a debounce task, and only when the page has produced
//! events and then gone quiet for the debounce window does the timestamp
//! move. The cancel key skips the debounce entirely and latches the
//! stop-requested flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::page::InputEvent;

#[cfg(test)]
#[path = "activity_tests.rs"]
mod tests;

/// What recording an input event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The debounce timer was (re)started.
    Recorded,
    /// The cancel key was pressed; the caller must stop automation now.
    CancelRequested,
}

/// Tracks when the human last touched the page.
pub struct ActivityMonitor {
    debounce: Duration,
    cancel_key: char,
    last_activity: Mutex<(Instant, DateTime<Local>)>,
    pending: Mutex<Option<JoinHandle<()>>>,
    stop_requested: AtomicBool,
}

impl ActivityMonitor {
    /// Create a monitor with the last-activity timestamp set to now.
    pub fn new(debounce: Duration, cancel_key: char) -> Arc<Self> {
        Arc::new(Self {
            debounce,
            cancel_key,
            last_activity: Mutex::new((Instant::now(), Local::now())),
            pending: Mutex::new(None),
            stop_requested: AtomicBool::new(false),
        })
    }

    /// Record an input event.
    ///
    /// A cancel-key keydown (compared case-insensitively) latches the
    /// stop-requested flag and returns [`RecordOutcome::CancelRequested`]
    /// without touching the debounce. Every other event aborts the pending
    /// debounce task and starts a new one; the last-activity timestamp only
    /// advances when that task survives the full debounce window.
    pub fn record(self: &Arc<Self>, event: &InputEvent) -> RecordOutcome {
        if let InputEvent::KeyDown(key) = event {
            if key.eq_ignore_ascii_case(&self.cancel_key) {
                self.stop_requested.store(true, Ordering::SeqCst);
                debug!("Cancel key pressed, stop requested");
                return RecordOutcome::CancelRequested;
            }
        }

        let monitor = Arc::clone(self);
        let task = tokio::spawn(async move {
            tokio::time::sleep(monitor.debounce).await;
            *monitor.last_activity.lock().unwrap() = (Instant::now(), Local::now());
        });

        let mut pending = self.pending.lock().unwrap();
        if let Some(previous) = pending.replace(task) {
            previous.abort();
        }
        RecordOutcome::Recorded
    }

    /// Time elapsed since the last debounced activity.
    pub fn inactive_for(&self) -> Duration {
        self.last_activity.lock().unwrap().0.elapsed()
    }

    /// Wall-clock time of the last debounced activity, for display.
    pub fn last_activity_local(&self) -> DateTime<Local> {
        self.last_activity.lock().unwrap().1
    }

    /// Whether the cancel key has been pressed since the last reset.
    pub fn stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::SeqCst)
    }

    /// Reset for a fresh automation run: last activity becomes now, the
    /// stop-requested flag clears, any pending debounce is cancelled.
    pub fn reset(&self) {
        self.clear_pending();
        self.stop_requested.store(false, Ordering::SeqCst);
        *self.last_activity.lock().unwrap() = (Instant::now(), Local::now());
    }

    /// Cancel the pending debounce task, if any.
    pub fn clear_pending(&self) {
        if let Some(task) = self.pending.lock().unwrap().take() {
            task.abort();
        }
    }
}
