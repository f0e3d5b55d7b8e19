use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::animation::FrameClock;
use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartEvent;
use crate::render::{Renderer, SurfaceTarget};

use super::ChartEngine;

/// Transition a series line still owes its next render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PendingTransition {
    #[default]
    None,
    ShowPending,
    HidePending,
}

/// Enabled flags plus per-target pending show/hide state for every series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesVisibilityController {
    enabled: Vec<bool>,
    main: Vec<PendingTransition>,
    overview: Vec<PendingTransition>,
}

impl SeriesVisibilityController {
    /// All series start enabled with nothing pending.
    #[must_use]
    pub fn new(series_count: usize) -> Self {
        Self {
            enabled: vec![true; series_count],
            main: vec![PendingTransition::None; series_count],
            overview: vec![PendingTransition::None; series_count],
        }
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.enabled.len()
    }

    /// Indexed like the dataset series.
    #[must_use]
    pub fn enabled_flags(&self) -> &[bool] {
        &self.enabled
    }

    #[must_use]
    pub fn enabled_count(&self) -> usize {
        self.enabled.iter().filter(|enabled| **enabled).count()
    }

    pub fn is_enabled(&self, series: usize) -> ChartResult<bool> {
        self.check_index(series)?;
        Ok(self.enabled[series])
    }

    /// Flips the series and returns its new enabled state.
    pub fn toggle(&mut self, series: usize) -> ChartResult<bool> {
        let enabled = !self.is_enabled(series)?;
        self.apply(series, enabled);
        Ok(enabled)
    }

    /// Sets the flag; returns `false` when it already had that value.
    pub fn set_enabled(&mut self, series: usize, enabled: bool) -> ChartResult<bool> {
        if self.is_enabled(series)? == enabled {
            return Ok(false);
        }
        self.apply(series, enabled);
        Ok(true)
    }

    pub fn pending(&self, target: SurfaceTarget, series: usize) -> ChartResult<PendingTransition> {
        self.check_index(series)?;
        Ok(self.slots(target)[series])
    }

    /// Hands the pending transition to the render pass and clears it.
    pub fn take_pending(
        &mut self,
        target: SurfaceTarget,
        series: usize,
    ) -> ChartResult<PendingTransition> {
        self.check_index(series)?;
        Ok(std::mem::take(&mut self.slots_mut(target)[series]))
    }

    fn apply(&mut self, series: usize, enabled: bool) {
        self.enabled[series] = enabled;
        for slots in [&mut self.main, &mut self.overview] {
            let slot = &mut slots[series];
            // A flip back before the render pass ran cancels the queued one,
            // so a re-toggle never double-queues a transition.
            *slot = match (enabled, *slot) {
                (true, PendingTransition::HidePending) => PendingTransition::None,
                (true, _) => PendingTransition::ShowPending,
                (false, PendingTransition::ShowPending) => PendingTransition::None,
                (false, _) => PendingTransition::HidePending,
            };
        }
    }

    fn slots(&self, target: SurfaceTarget) -> &[PendingTransition] {
        match target {
            SurfaceTarget::Main => &self.main,
            SurfaceTarget::Overview => &self.overview,
        }
    }

    fn slots_mut(&mut self, target: SurfaceTarget) -> &mut [PendingTransition] {
        match target {
            SurfaceTarget::Main => &mut self.main,
            SurfaceTarget::Overview => &mut self.overview,
        }
    }

    fn check_index(&self, series: usize) -> ChartResult<()> {
        if series >= self.enabled.len() {
            return Err(ChartError::SeriesIndexOutOfRange {
                index: series,
                len: self.enabled.len(),
            });
        }
        Ok(())
    }
}

impl<R: Renderer, C: FrameClock> ChartEngine<R, C> {
    /// Flips series `series` and renders; returns the new enabled state.
    pub fn toggle_series(&mut self, series: usize) -> ChartResult<bool> {
        let enabled = self.model.visibility.toggle(series)?;
        debug!(chart_id = %self.chart_id, series, enabled, "series toggled");
        self.emit_event(ChartEvent::SeriesToggled { series, enabled });
        self.render()?;
        Ok(enabled)
    }

    /// Enables or disables a series; renders only when the flag changed.
    pub fn set_series_enabled(&mut self, series: usize, enabled: bool) -> ChartResult<()> {
        if self.model.visibility.is_enabled(series)? != enabled {
            self.toggle_series(series)?;
        }
        Ok(())
    }

    pub fn is_series_enabled(&self, series: usize) -> ChartResult<bool> {
        self.model.visibility.is_enabled(series)
    }

    #[must_use]
    pub fn visibility(&self) -> &SeriesVisibilityController {
        &self.model.visibility
    }
}

#[cfg(test)]
mod tests {
    use super::{PendingTransition, SeriesVisibilityController};
    use crate::render::SurfaceTarget;

    #[test]
    fn retoggle_before_render_cancels_pending() {
        let mut controller = SeriesVisibilityController::new(2);
        controller.toggle(1).expect("toggle");
        assert_eq!(
            controller.pending(SurfaceTarget::Main, 1).expect("pending"),
            PendingTransition::HidePending
        );
        controller.toggle(1).expect("toggle");
        assert_eq!(
            controller.pending(SurfaceTarget::Overview, 1).expect("pending"),
            PendingTransition::None
        );
        assert_eq!(controller.enabled_flags(), &[true, true]);
    }

    #[test]
    fn take_pending_consumes_state() {
        let mut controller = SeriesVisibilityController::new(1);
        controller.toggle(0).expect("toggle");
        assert_eq!(
            controller.take_pending(SurfaceTarget::Main, 0).expect("take"),
            PendingTransition::HidePending
        );
        assert_eq!(
            controller.take_pending(SurfaceTarget::Main, 0).expect("take"),
            PendingTransition::None
        );
    }
}
