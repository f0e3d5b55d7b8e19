use std::rc::Rc;

use tracing::info;

use crate::animation::{AnimationScheduler, FrameClock, SystemFrameClock};
use crate::core::{ChartLayout, Dataset};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::{
    ChartConfig, ChartEngine, ChartStage, RenderThrottle, chart_model::ChartModel,
    default_tooltip_formatter,
};

impl<R: Renderer, C: FrameClock> ChartEngine<R, C> {
    /// Creates an engine driven by `clock` and renders the first frame.
    ///
    /// The initial pass snaps every surface; nothing animates until the
    /// first state change.
    pub fn create(
        renderer: R,
        clock: C,
        dataset: Dataset,
        chart_id: impl Into<String>,
        config: ChartConfig,
        layout: ChartLayout,
    ) -> ChartResult<Self> {
        config.validate()?;

        let series_count = dataset.series_count();
        let mut engine = Self {
            renderer,
            clock,
            chart_id: chart_id.into(),
            model: ChartModel::new(dataset, config, layout),
            stage: ChartStage::new(layout, series_count),
            scheduler: AnimationScheduler::new(),
            throttle: RenderThrottle::default(),
            observers: Vec::new(),
            tooltip_formatter: Rc::new(default_tooltip_formatter),
            force_redraw: false,
        };
        info!(
            chart_id = %engine.chart_id,
            points = engine.model.dataset.len(),
            series = series_count,
            "chart engine created"
        );
        engine.render()?;
        Ok(engine)
    }
}

impl<R: Renderer> ChartEngine<R, SystemFrameClock> {
    /// Creates an engine on the monotonic system clock.
    pub fn new(
        renderer: R,
        dataset: Dataset,
        chart_id: impl Into<String>,
        config: ChartConfig,
        layout: ChartLayout,
    ) -> ChartResult<Self> {
        Self::create(
            renderer,
            SystemFrameClock::default(),
            dataset,
            chart_id,
            config,
            layout,
        )
    }
}
