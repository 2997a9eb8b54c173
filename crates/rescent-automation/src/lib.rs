//! # ReScent Automation
//!
//! In-page automation engine for the ReScent extension.
//!
//! The engine keeps a page "fresh" by periodically reloading it and scrolling
//! through it, while giving a human user priority: input activity is
//! debounced into a last-activity timestamp, and once the page has been
//! touched recently (or the cancel key was pressed) every reload and scroll
//! iteration is skipped with a human-activity notification instead of firing.
//!
//! ## Architecture
//!
//! - [`Page`] and [`SettingsStore`] are the seams to the hosting browser
//!   (DOM and `chrome.storage`); [`SimulatedPage`] and the bundled stores
//!   stand in for them outside a browser.
//! - [`AutomationController`] owns the STOPPED -> RUNNING -> STOPPED state
//!   machine: `start` spawns the refresh and scroll tasks under one
//!   cancellation token, `stop` tears everything down. Both are idempotent.
//! - [`CommandHandle`] delivers the asynchronous start/stop/status/
//!   scrollToBottom command protocol; handler failures become structured
//!   error replies, never a crashed dispatcher.

pub mod activity;
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod page;
pub mod scroll;
pub mod settings;
pub mod storage;

pub use activity::{ActivityMonitor, RecordOutcome};
pub use command::{spawn_dispatcher, Command, CommandHandle, CommandResponse};
pub use config::AutomationConfig;
pub use controller::{AutomationController, AutomationEvent, ScrollOutcome, StatusReport};
pub use error::{AutomationError, AutomationResult};
pub use page::{InputEvent, Page, SimulatedPage};
pub use scroll::ScrollAnimator;
pub use settings::AutomationSettings;
pub use storage::{FileSettingsStore, MemorySettingsStore, SettingsStore, StorageScope};
