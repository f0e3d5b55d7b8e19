use std::rc::Rc;

use tracing::{debug, trace};

use crate::animation::{AnimationScheduler, FrameClock, SystemFrameClock};
use crate::core::{ChartLayout, Dataset, ScaleState};
use crate::error::ChartResult;
use crate::extensions::ChartObserver;
use crate::interaction::SelectionState;
use crate::render::{RenderFrame, Renderer};

use super::{
    ChartConfig, ChartConfigPatch, ChartStage, RenderThrottle, ScaleSet, TooltipFormatter,
    chart_model::ChartModel,
};

#[cfg(feature = "cairo-backend")]
use crate::render::{CairoContextRenderer, SurfaceTarget};

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the dataset, the viewport and visibility state, the
/// animated scales and surfaces, and hands every composed frame to `R`.
/// Time comes from `C` so hosts and tests control the frame clock.
pub struct ChartEngine<R: Renderer, C: FrameClock = SystemFrameClock> {
    pub(super) renderer: R,
    pub(super) clock: C,
    pub(super) chart_id: String,
    pub(super) model: ChartModel,
    pub(super) stage: ChartStage,
    pub(super) scheduler: AnimationScheduler<ChartStage>,
    pub(super) throttle: RenderThrottle,
    pub(super) observers: Vec<Box<dyn ChartObserver>>,
    pub(super) tooltip_formatter: TooltipFormatter,
    /// Next pass snaps every surface instead of animating.
    pub(super) force_redraw: bool,
}

impl<R: Renderer, C: FrameClock> ChartEngine<R, C> {
    /// Advances running animations and releases throttled renders.
    ///
    /// Hosts call this once per display frame. Returns `true` while more
    /// frames are needed.
    pub fn tick(&mut self) -> ChartResult<bool> {
        let now = self.clock.now_ms();
        if self.throttle.poll(now) {
            trace!(chart_id = %self.chart_id, now, "throttled render released");
            self.render()?;
        } else if !self.scheduler.is_idle() {
            self.scheduler.tick(now, &mut self.stage);
            self.present()?;
        }
        Ok(self.is_animating())
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.scheduler.is_idle() || self.throttle.has_deferred()
    }

    /// Composes the current surfaces into an ordered frame.
    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        self.stage.surfaces.compose(self.model.layout)
    }

    pub(super) fn present(&mut self) -> ChartResult<()> {
        let frame = self.frame();
        self.renderer.render(&frame)
    }

    /// Applies a partial config and redraws everything without animation.
    ///
    /// A patch whose merged result is invalid is rejected and leaves the
    /// current config untouched.
    pub fn set_config(&mut self, patch: &ChartConfigPatch) -> ChartResult<()> {
        let next = self.model.config.merged(patch);
        next.validate()?;
        self.model.config = next;
        debug!(chart_id = %self.chart_id, "config updated");
        self.force_redraw = true;
        self.render()
    }

    /// Resizes every surface and redraws from scratch.
    pub fn resize(&mut self, layout: ChartLayout) -> ChartResult<()> {
        self.model.layout = layout;
        self.stage.surfaces.resize(layout);
        self.stage.scales.reset();
        debug!(
            chart_id = %self.chart_id,
            width = layout.main.width,
            height = layout.main.height,
            "chart resized"
        );
        self.force_redraw = true;
        self.render()
    }

    #[must_use]
    pub fn chart_id(&self) -> &str {
        &self.chart_id
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.model.dataset
    }

    /// Shared handle to the dataset, as captured by running animations.
    #[must_use]
    pub fn dataset_handle(&self) -> Rc<Dataset> {
        Rc::clone(&self.model.dataset)
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.model.config
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        self.model.layout
    }

    #[must_use]
    pub fn scales(&self) -> ScaleSet {
        self.stage.scales
    }

    #[must_use]
    pub fn main_y_scale(&self) -> ScaleState {
        self.stage.scales.y
    }

    #[must_use]
    pub fn stage(&self) -> &ChartStage {
        &self.stage
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        self.model.interaction.selection()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Renders the current frame into an external cairo context.
    ///
    /// This path is used by GTK draw callbacks while keeping the renderer
    /// implementation decoupled from GTK-specific APIs.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(
        &mut self,
        context: &cairo::Context,
        target: SurfaceTarget,
    ) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.frame();
        self.renderer
            .render_on_cairo_context(context, &frame, target)
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
