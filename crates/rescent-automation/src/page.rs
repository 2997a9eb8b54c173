//! The hosted page seam.
//!
//! The automation engine never touches the DOM directly; it talks to a
//! [`Page`], which the browser glue implements over `window`/`document`.
//! [`SimulatedPage`] is the in-process implementation used by tests and the
//! simulation harness.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::{AutomationError, AutomationResult};

/// Input events the page reports, one per DOM event class the extension
/// listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MouseMove,
    MouseDown,
    KeyDown(char),
    TouchStart,
    Scroll,
}

/// A page the automation engine can scroll and reload.
#[async_trait]
pub trait Page: Send + Sync {
    /// Current vertical scroll offset.
    fn scroll_position(&self) -> f64;

    /// Height of the visible viewport.
    fn viewport_height(&self) -> f64;

    /// Total height of the document.
    fn document_height(&self) -> f64;

    /// Move the scroll offset to `y`.
    fn scroll_to(&self, y: f64);

    /// Trigger a full page reload.
    async fn reload(&self) -> AutomationResult<()>;

    /// Subscribe to the page's input events.
    fn input_events(&self) -> broadcast::Receiver<InputEvent>;

    /// Largest reachable scroll offset.
    fn max_scroll(&self) -> f64 {
        (self.document_height() - self.viewport_height()).max(0.0)
    }
}

/// In-memory [`Page`] for tests and dry runs.
///
/// Tracks reload counts and the highest scroll offset reached, and can be
/// told to fail the next reloads to exercise retry paths.
pub struct SimulatedPage {
    scroll_y: Mutex<f64>,
    peak_scroll: Mutex<f64>,
    viewport_height: f64,
    document_height: Mutex<f64>,
    reload_count: AtomicU32,
    failing_reloads: AtomicU32,
    events: broadcast::Sender<InputEvent>,
}

impl SimulatedPage {
    /// Create a page with the given viewport and document heights.
    pub fn new(viewport_height: f64, document_height: f64) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            scroll_y: Mutex::new(0.0),
            peak_scroll: Mutex::new(0.0),
            viewport_height,
            document_height: Mutex::new(document_height),
            reload_count: AtomicU32::new(0),
            failing_reloads: AtomicU32::new(0),
            events,
        }
    }

    /// Inject an input event, as if the user touched the page.
    pub fn emit(&self, event: InputEvent) {
        let _ = self.events.send(event);
    }

    /// How many times the page has been reloaded.
    pub fn reload_count(&self) -> u32 {
        self.reload_count.load(Ordering::SeqCst)
    }

    /// Highest scroll offset reached since the last reload.
    pub fn peak_scroll(&self) -> f64 {
        *self.peak_scroll.lock().unwrap()
    }

    /// Make the next `count` reload attempts fail.
    pub fn fail_next_reloads(&self, count: u32) {
        self.failing_reloads.store(count, Ordering::SeqCst);
    }

    /// Change the document height, as after dynamic content loads.
    pub fn set_document_height(&self, height: f64) {
        *self.document_height.lock().unwrap() = height;
    }
}

#[async_trait]
impl Page for SimulatedPage {
    fn scroll_position(&self) -> f64 {
        *self.scroll_y.lock().unwrap()
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn document_height(&self) -> f64 {
        *self.document_height.lock().unwrap()
    }

    fn scroll_to(&self, y: f64) {
        let clamped = y.clamp(0.0, self.max_scroll());
        *self.scroll_y.lock().unwrap() = clamped;
        let mut peak = self.peak_scroll.lock().unwrap();
        if clamped > *peak {
            *peak = clamped;
        }
    }

    async fn reload(&self) -> AutomationResult<()> {
        if self
            .failing_reloads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(AutomationError::Page("tab unreachable".to_string()));
        }

        self.reload_count.fetch_add(1, Ordering::SeqCst);
        *self.scroll_y.lock().unwrap() = 0.0;
        *self.peak_scroll.lock().unwrap() = 0.0;
        Ok(())
    }

    fn input_events(&self) -> broadcast::Receiver<InputEvent> {
        self.events.subscribe()
    }
}
