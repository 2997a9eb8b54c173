//! The automation controller.
//!
//! Owns the STOPPED -> RUNNING -> STOPPED state machine: `start` spawns the
//! input listener, the refresh loop, and a scroll task under one fresh
//! cancellation token; `stop` persists the inactive flag and tears them all
//! down. Stop conditions (stale activity or the cancel key) pause cycles and
//! emit a human-activity notification; only `stop` or the cancel key actually
//! end a run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::activity::{ActivityMonitor, RecordOutcome};
use crate::config::AutomationConfig;
use crate::error::AutomationResult;
use crate::page::Page;
use crate::scroll::ScrollAnimator;
use crate::settings::{keys, AutomationSettings};
use crate::storage::{SettingsStore, StorageScope};

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;

/// One-way notifications emitted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum AutomationEvent {
    /// A stop condition paused a reload or scroll iteration.
    HumanActivity,
}

/// Reply to the `status` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    /// Whether automation is running.
    pub is_active: bool,
    /// Localized time of the last debounced activity.
    pub last_activity: String,
    /// Seconds since the last debounced activity.
    pub inactive_seconds: f64,
}

/// Reply to the `scrollToBottom` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollOutcome {
    /// Whether the bottom of the document was reached.
    pub reached_bottom: bool,
    /// Scroll offset after the attempt.
    pub current_position: f64,
}

/// Handles for one automation run.
struct RunHandles {
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

/// Runs the refresh and scroll cycles against a [`Page`], pausing for human
/// activity.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct AutomationController {
    inner: Arc<Inner>,
}

struct Inner {
    page: Arc<dyn Page>,
    store: Arc<dyn SettingsStore>,
    config: AutomationConfig,
    animator: ScrollAnimator,
    activity: Arc<ActivityMonitor>,
    is_active: AtomicBool,
    run: tokio::sync::Mutex<Option<RunHandles>>,
    events: broadcast::Sender<AutomationEvent>,
}

impl AutomationController {
    /// Create a stopped controller.
    pub fn new(
        page: Arc<dyn Page>,
        store: Arc<dyn SettingsStore>,
        config: AutomationConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(16);
        let animator = ScrollAnimator::new(page.clone(), config.frame_interval());
        let activity = ActivityMonitor::new(config.activity_debounce(), config.cancel_key);
        Self {
            inner: Arc::new(Inner {
                page,
                store,
                config,
                animator,
                activity,
                is_active: AtomicBool::new(false),
                run: tokio::sync::Mutex::new(None),
                events,
            }),
        }
    }

    /// Whether automation is currently running.
    pub fn is_active(&self) -> bool {
        self.inner.is_active.load(Ordering::SeqCst)
    }

    /// Subscribe to controller notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<AutomationEvent> {
        self.inner.events.subscribe()
    }

    /// Start automation with the given settings.
    ///
    /// Restarting while running is allowed: the previous run is stopped
    /// first, so no timers or listeners are ever duplicated.
    pub async fn start(&self, settings: AutomationSettings) -> AutomationResult<()> {
        let inner = &self.inner;
        inner.stop().await?;

        inner.activity.reset();
        inner.is_active.store(true, Ordering::SeqCst);
        inner
            .store
            .set(StorageScope::Local, keys::IS_ACTIVE, json!(true))
            .await?;

        // Register the token before spawning anything, so a stop racing in
        // through the input listener can always cancel these tasks.
        let cancel = CancellationToken::new();
        *inner.run.lock().await = Some(RunHandles {
            cancel: cancel.clone(),
            tasks: Vec::new(),
        });

        let mut tasks = Vec::new();

        tasks.push(tokio::spawn(
            inner.clone().listen_for_input(cancel.clone()),
        ));

        if settings.refresh_time > 0 {
            tasks.push(tokio::spawn(inner.clone().refresh_loop(
                cancel.clone(),
                Duration::from_secs(settings.refresh_time),
            )));
        }

        if settings.continuous_scroll {
            tasks.push(tokio::spawn(
                inner.clone().scroll_cycle(cancel.clone(), settings.scroll_speed),
            ));
        } else {
            tasks.push(tokio::spawn(
                inner.clone().one_shot_scroll(cancel.clone(), settings.scroll_speed),
            ));
        }

        // A stop that raced through already took the handles and cancelled
        // the token; the tasks above shut themselves down in that case.
        if let Some(run) = inner.run.lock().await.as_mut() {
            run.tasks = tasks;
        }
        info!(
            "Automation started (refresh every {}s, speed {}, continuous: {})",
            settings.refresh_time, settings.scroll_speed, settings.continuous_scroll
        );
        Ok(())
    }

    /// Stop automation and cancel everything the last `start` installed.
    ///
    /// Idempotent: stopping a stopped controller only re-persists the
    /// inactive flag.
    pub async fn stop(&self) -> AutomationResult<()> {
        self.inner.stop().await
    }

    /// Resume a run that was active before the page reloaded.
    ///
    /// Only settings persisted to the store survive a reload; if they say
    /// automation was active, it starts again with the stored settings.
    pub async fn resume_from_store(&self) -> AutomationResult<bool> {
        let was_active = self
            .inner
            .store
            .get(StorageScope::Local, keys::IS_ACTIVE)
            .await?
            .and_then(|value| value.as_bool())
            .unwrap_or(false);
        if !was_active {
            return Ok(false);
        }

        let settings = AutomationSettings::load(self.inner.store.as_ref()).await?;
        debug!("Resuming automation from persisted state");
        self.start(settings).await?;
        Ok(true)
    }

    /// Current status for the `status` command.
    pub fn status(&self) -> StatusReport {
        StatusReport {
            is_active: self.is_active(),
            last_activity: self
                .inner
                .activity
                .last_activity_local()
                .format("%H:%M:%S")
                .to_string(),
            inactive_seconds: self.inner.activity.inactive_for().as_secs_f64(),
        }
    }

    /// Scroll to the bottom of the document at the given speed.
    ///
    /// Replies immediately when the page is already at the bottom. The
    /// animation shares the active flag, so it resolves early if automation
    /// stops mid-scroll.
    pub async fn scroll_to_bottom(&self, speed: u32) -> AutomationResult<ScrollOutcome> {
        let inner = &self.inner;
        let target = inner.page.max_scroll();
        if inner.page.scroll_position() >= target {
            return Ok(ScrollOutcome {
                reached_bottom: true,
                current_position: inner.page.scroll_position(),
            });
        }

        let position = inner
            .animator
            .animate_to(target, speed, &inner.is_active)
            .await;
        Ok(ScrollOutcome {
            reached_bottom: position >= target,
            current_position: position,
        })
    }
}

impl Inner {
    async fn stop(&self) -> AutomationResult<()> {
        self.is_active.store(false, Ordering::SeqCst);
        self.store
            .set(StorageScope::Local, keys::IS_ACTIVE, json!(false))
            .await?;
        self.activity.clear_pending();

        if let Some(run) = self.run.lock().await.take() {
            run.cancel.cancel();
            for task in run.tasks {
                task.abort();
            }
            info!("Automation stopped");
        }
        Ok(())
    }

    /// Stale activity or an explicit cancel request.
    fn should_pause(&self) -> bool {
        self.activity.inactive_for() > self.config.inactivity_threshold()
            || self.activity.stop_requested()
    }

    fn notify_human_activity(&self) {
        debug!("Stop condition met, pausing cycle");
        let _ = self.events.send(AutomationEvent::HumanActivity);
    }

    /// Forward page input to the activity monitor; the cancel key stops
    /// automation immediately.
    async fn listen_for_input(self: Arc<Self>, cancel: CancellationToken) {
        let mut inputs = self.page.input_events();
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return,
                event = inputs.recv() => match event {
                    Ok(event) => {
                        if self.activity.record(&event) == RecordOutcome::CancelRequested {
                            if let Err(err) = self.stop().await {
                                error!("Failed to stop on cancel key: {err}");
                            }
                            return;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!("Input listener lagged, skipped {skipped} events");
                    }
                    Err(broadcast::error::RecvError::Closed) => return,
                },
            }
        }
    }

    /// Reload the page on a fixed interval, skipping ticks while paused.
    ///
    /// A failed reload is retried once after the pause backoff; the timer
    /// itself keeps running either way.
    async fn refresh_loop(self: Arc<Self>, cancel: CancellationToken, period: Duration) {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = ticker.tick() => {}
            }

            if !self.is_active.load(Ordering::SeqCst) {
                return;
            }

            if self.should_pause() {
                self.notify_human_activity();
                continue;
            }

            if let Err(err) = self.page.reload().await {
                warn!(
                    "Page reload failed: {err}; retrying in {:?}",
                    self.config.pause_backoff()
                );
                tokio::select! {
                    _ = cancel.cancelled() => return,
                    _ = tokio::time::sleep(self.config.pause_backoff()) => {}
                }
                if let Err(err) = self.page.reload().await {
                    error!("Page reload failed after retry: {err}");
                }
            }
        }
    }

    /// Scroll bottom-to-top in a loop while active, backing off while a stop
    /// condition holds.
    async fn scroll_cycle(self: Arc<Self>, cancel: CancellationToken, speed: u32) {
        loop {
            if cancel.is_cancelled() || !self.is_active.load(Ordering::SeqCst) {
                return;
            }

            if self.should_pause() {
                self.notify_human_activity();
                tokio::select! {
                    _ = cancel.cancelled() => return,
                    _ = tokio::time::sleep(self.config.pause_backoff()) => {}
                }
                continue;
            }

            self.animator.to_bottom(speed, &self.is_active).await;
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(self.config.cycle_pause()) => {}
            }

            self.animator.to_top(speed, &self.is_active).await;
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(self.config.cycle_pause()) => {}
            }

            // Hand the scheduler a turn between cycles.
            tokio::task::yield_now().await;
        }
    }

    /// Single delayed scroll to the bottom, used when continuous scrolling
    /// is off.
    async fn one_shot_scroll(self: Arc<Self>, cancel: CancellationToken, speed: u32) {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(self.config.one_shot_scroll_delay()) => {}
        }
        self.animator.to_bottom(speed, &self.is_active).await;
    }
}
