use tracing::{debug, trace};

use crate::animation::FrameClock;
use crate::core::{LinearScale, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartEvent;
use crate::render::Renderer;

use super::ChartEngine;

const HANDLE_MIN: f64 = 0.0;
const HANDLE_MAX: f64 = 100.0;

/// Two zoom handles in percent plus the index window derived from them.
///
/// Handles are stored as given (clamped to `[0, 100]`, possibly unordered);
/// the window always comes from the sorted pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportController {
    handles: (f64, f64),
    index_count: usize,
    percent_to_index: LinearScale,
    viewport: Viewport,
}

impl ViewportController {
    /// Starts fully zoomed out over `index_count` x values.
    #[must_use]
    pub fn new(index_count: usize) -> Self {
        let last = index_count.saturating_sub(1) as f64;
        let mut controller = Self {
            handles: (HANDLE_MIN, HANDLE_MAX),
            index_count,
            percent_to_index: LinearScale::new((HANDLE_MIN, HANDLE_MAX), (0.0, last)),
            viewport: Viewport::full(index_count),
        };
        controller.recompute();
        controller
    }

    #[must_use]
    pub fn handles(&self) -> (f64, f64) {
        self.handles
    }

    /// Handles in ascending order.
    #[must_use]
    pub fn sorted_handles(&self) -> (f64, f64) {
        let (a, b) = self.handles;
        if a <= b { (a, b) } else { (b, a) }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Stores both handles and recomputes the window.
    ///
    /// Returns whether the index window changed.
    pub fn set_handles(&mut self, a: f64, b: f64) -> ChartResult<bool> {
        if !a.is_finite() || !b.is_finite() {
            return Err(ChartError::InvalidData(
                "viewport handles must be finite".to_owned(),
            ));
        }
        self.handles = (
            a.clamp(HANDLE_MIN, HANDLE_MAX),
            b.clamp(HANDLE_MIN, HANDLE_MAX),
        );
        Ok(self.recompute())
    }

    /// Moves both handles by `delta` percent, keeping the window width.
    ///
    /// A window already touching the edge it is pushed towards stays put;
    /// otherwise the shift is clamped so the window ends exactly at the edge.
    /// Returns whether the handles moved.
    pub fn shift_window(&mut self, delta: f64) -> bool {
        if !delta.is_finite() || delta == 0.0 {
            return false;
        }
        let (mut low, mut high) = self.sorted_handles();
        let blocked = (high >= HANDLE_MAX && delta > 0.0) || (low <= HANDLE_MIN && delta < 0.0);
        if blocked {
            return false;
        }

        if high + delta > HANDLE_MAX {
            low += HANDLE_MAX - high;
            high = HANDLE_MAX;
        } else if low + delta < HANDLE_MIN {
            high -= low;
            low = HANDLE_MIN;
        } else {
            low += delta;
            high += delta;
        }

        self.handles = (low, high);
        self.recompute();
        true
    }

    fn recompute(&mut self) -> bool {
        let (low, high) = self.sorted_handles();
        let last = self.index_count.saturating_sub(1);
        let to_index = |percent: f64| {
            let index = self.percent_to_index.convert(percent).floor();
            (index.max(0.0) as usize).min(last)
        };
        let mut left = to_index(low);
        let mut right = to_index(high);

        // Keep a window at least two indices wide so the x domain never
        // collapses.
        if left == right && last > 0 {
            if right < last {
                right += 1;
            } else {
                left -= 1;
            }
        }

        let next = Viewport::new(left, right);
        let changed = next != self.viewport;
        self.viewport = next;
        changed
    }
}

impl<R: Renderer, C: FrameClock> ChartEngine<R, C> {
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.model.viewport.viewport()
    }

    #[must_use]
    pub fn handles(&self) -> (f64, f64) {
        self.model.viewport.handles()
    }

    /// Sets both zoom handles (percent) and requests a throttled render.
    pub fn set_handles(&mut self, a: f64, b: f64) -> ChartResult<()> {
        let changed = self.model.viewport.set_handles(a, b)?;
        debug!(chart_id = %self.chart_id, a, b, changed, "viewport handles set");
        self.after_viewport_update(changed)
    }

    /// Starts dragging the whole window at overview pointer position `x`.
    pub fn begin_window_drag(&mut self, x: f64) {
        let track_width = self.model.layout.overview.width_f64();
        self.model.interaction.on_drag_start(x, track_width);
        trace!(chart_id = %self.chart_id, x, track_width, "window drag started");
    }

    /// Applies a drag step; returns whether the window moved.
    ///
    /// The pointer delta is measured from the last accepted step, so the
    /// window follows relative motion instead of jumping to the pointer.
    pub fn drag_window_to(&mut self, x: f64) -> ChartResult<bool> {
        let Some(origin) = self.model.interaction.drag_origin() else {
            return Ok(false);
        };
        let delta = origin.percent_delta(x);
        if delta.abs() < 1.0 {
            return Ok(false);
        }
        self.model.interaction.rebase_drag(x);
        if !self.model.viewport.shift_window(delta) {
            trace!(chart_id = %self.chart_id, delta, "window drag clamped at edge");
            return Ok(false);
        }
        self.after_viewport_update(true)?;
        Ok(true)
    }

    pub fn end_window_drag(&mut self) {
        self.model.interaction.on_drag_end();
    }

    fn after_viewport_update(&mut self, changed: bool) -> ChartResult<()> {
        if changed {
            let viewport = self.model.viewport.viewport();
            self.emit_event(ChartEvent::ViewportChanged {
                left: viewport.left(),
                right: viewport.right(),
            });
        }
        self.request_render()
    }
}
