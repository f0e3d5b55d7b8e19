use tracing::trace;

use crate::animation::FrameClock;
use crate::error::ChartResult;
use crate::render::Renderer;

use super::ChartEngine;

/// Minimum spacing between throttled render passes.
pub const RENDER_THROTTLE_MS: f64 = 10.0;

/// Leading-edge plus trailing-edge rate limiter for render requests.
///
/// The first request in a quiet period runs immediately and opens a window;
/// requests inside the window collapse into one deferred run that `poll`
/// releases once the window has elapsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderThrottle {
    interval_ms: f64,
    window_end_ms: Option<f64>,
    deferred: bool,
}

impl Default for RenderThrottle {
    fn default() -> Self {
        Self::new(RENDER_THROTTLE_MS)
    }
}

impl RenderThrottle {
    #[must_use]
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(0.0),
            window_end_ms: None,
            deferred: false,
        }
    }

    /// Returns `true` when the caller should run now.
    pub fn request(&mut self, now_ms: f64) -> bool {
        if self.window_end_ms.is_some_and(|end| now_ms < end) {
            self.deferred = true;
            return false;
        }
        self.open_window(now_ms);
        true
    }

    /// Returns `true` when a deferred run is due at `now_ms`.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.window_end_ms {
            Some(end) if now_ms >= end => {
                self.window_end_ms = None;
                if self.deferred {
                    self.open_window(now_ms);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn has_deferred(&self) -> bool {
        self.deferred
    }

    fn open_window(&mut self, now_ms: f64) {
        self.window_end_ms = Some(now_ms + self.interval_ms);
        self.deferred = false;
    }
}

impl<R: Renderer, C: FrameClock> ChartEngine<R, C> {
    /// Renders now or defers to the next frame tick, at most once per window.
    pub fn request_render(&mut self) -> ChartResult<()> {
        let now = self.clock.now_ms();
        if self.throttle.request(now) {
            return self.render();
        }
        trace!(chart_id = %self.chart_id, now, "render deferred by throttle");
        Ok(())
    }

    /// Whether a throttled render is still waiting for its window to close.
    #[must_use]
    pub fn has_deferred_render(&self) -> bool {
        self.throttle.has_deferred()
    }
}
