//! Smooth scroll animation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

use crate::page::Page;

#[cfg(test)]
#[path = "scroll_tests.rs"]
mod tests;

/// Divisor applied to the speed factor when deriving an animation duration:
/// a speed of 5 covers 100 px/ms.
const SPEED_SCALE: f64 = 20.0;

/// Animates the page's scroll offset towards a target.
///
/// The duration is proportional to the distance divided by the speed factor,
/// and the position is interpolated across fixed-interval frames. Every
/// frame re-reads the shared active flag, so an animation in flight observes
/// a stop at the next frame boundary and resolves at its current position.
pub struct ScrollAnimator {
    page: Arc<dyn Page>,
    frame_interval: Duration,
}

impl ScrollAnimator {
    /// Create an animator for `page`.
    pub fn new(page: Arc<dyn Page>, frame_interval: Duration) -> Self {
        Self {
            page,
            frame_interval,
        }
    }

    /// Animate from the current offset to `target` and return the final
    /// position.
    pub async fn animate_to(&self, target: f64, speed: u32, active: &AtomicBool) -> f64 {
        let start = self.page.scroll_position();
        let distance = target - start;
        if distance == 0.0 {
            return start;
        }

        let duration =
            Duration::from_millis((distance.abs() / (speed.max(1) as f64 * SPEED_SCALE)) as u64);
        if duration <= self.frame_interval {
            self.page.scroll_to(target);
            return self.page.scroll_position();
        }

        trace!("Animating scroll {start} -> {target} over {duration:?}");
        let started = Instant::now();
        loop {
            tokio::time::sleep(self.frame_interval).await;
            let progress =
                (started.elapsed().as_secs_f64() / duration.as_secs_f64()).min(1.0);
            self.page.scroll_to(start + distance * progress);

            if progress >= 1.0 || !active.load(Ordering::SeqCst) {
                break;
            }
        }
        self.page.scroll_position()
    }

    /// Animate to the bottom of the document.
    pub async fn to_bottom(&self, speed: u32, active: &AtomicBool) -> f64 {
        let target = self.page.max_scroll();
        self.animate_to(target, speed, active).await
    }

    /// Animate back to the top of the document.
    pub async fn to_top(&self, speed: u32, active: &AtomicBool) -> f64 {
        self.animate_to(0.0, speed, active).await
    }
}
