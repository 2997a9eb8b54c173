//! Automation engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tuning knobs for the automation controller.
///
/// The defaults match the behavior of the shipped extension; tests shrink
/// them for speed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationConfig {
    /// How long the page must be untouched before input counts as stale
    /// (in seconds).
    #[serde(default = "default_inactivity_threshold")]
    pub inactivity_threshold_secs: u64,

    /// Quiet window before a burst of input events advances the
    /// last-activity timestamp (in seconds).
    #[serde(default = "default_activity_debounce")]
    pub activity_debounce_secs: u64,

    /// Backoff applied when a stop condition pauses a cycle (in seconds).
    #[serde(default = "default_pause_backoff")]
    pub pause_backoff_secs: u64,

    /// Pause between the bottom and top halves of a scroll cycle
    /// (in milliseconds).
    #[serde(default = "default_cycle_pause")]
    pub cycle_pause_ms: u64,

    /// Delay before the one-shot scroll-to-bottom when continuous scrolling
    /// is off (in seconds).
    #[serde(default = "default_one_shot_delay")]
    pub one_shot_scroll_delay_secs: u64,

    /// Interval between scroll animation frames (in milliseconds).
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,

    /// Key that requests an immediate stop, compared case-insensitively.
    #[serde(default = "default_cancel_key")]
    pub cancel_key: char,
}

fn default_inactivity_threshold() -> u64 {
    30
}

fn default_activity_debounce() -> u64 {
    10
}

fn default_pause_backoff() -> u64 {
    5
}

fn default_cycle_pause() -> u64 {
    1000
}

fn default_one_shot_delay() -> u64 {
    2
}

fn default_frame_interval() -> u64 {
    16
}

fn default_cancel_key() -> char {
    'q'
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            inactivity_threshold_secs: default_inactivity_threshold(),
            activity_debounce_secs: default_activity_debounce(),
            pause_backoff_secs: default_pause_backoff(),
            cycle_pause_ms: default_cycle_pause(),
            one_shot_scroll_delay_secs: default_one_shot_delay(),
            frame_interval_ms: default_frame_interval(),
            cancel_key: default_cancel_key(),
        }
    }
}

impl AutomationConfig {
    /// Inactivity threshold as a [`Duration`].
    pub fn inactivity_threshold(&self) -> Duration {
        Duration::from_secs(self.inactivity_threshold_secs)
    }

    /// Activity debounce window as a [`Duration`].
    pub fn activity_debounce(&self) -> Duration {
        Duration::from_secs(self.activity_debounce_secs)
    }

    /// Pause backoff as a [`Duration`].
    pub fn pause_backoff(&self) -> Duration {
        Duration::from_secs(self.pause_backoff_secs)
    }

    /// Cycle pause as a [`Duration`].
    pub fn cycle_pause(&self) -> Duration {
        Duration::from_millis(self.cycle_pause_ms)
    }

    /// One-shot scroll delay as a [`Duration`].
    pub fn one_shot_scroll_delay(&self) -> Duration {
        Duration::from_secs(self.one_shot_scroll_delay_secs)
    }

    /// Animation frame interval as a [`Duration`].
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AutomationConfig::default();
        assert_eq!(config.inactivity_threshold(), Duration::from_secs(30));
        assert_eq!(config.activity_debounce(), Duration::from_secs(10));
        assert_eq!(config.pause_backoff(), Duration::from_secs(5));
        assert_eq!(config.cancel_key, 'q');
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let config: AutomationConfig =
            serde_json::from_str(r#"{"inactivity_threshold_secs": 60}"#).unwrap();
        assert_eq!(config.inactivity_threshold_secs, 60);
        assert_eq!(config.activity_debounce_secs, 10);
    }
}
