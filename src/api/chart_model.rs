use std::rc::Rc;

use crate::core::{ChartLayout, Dataset};
use crate::interaction::InteractionState;

use super::{ChartConfig, SeriesVisibilityController, ViewportController};

/// Data and user-facing state of one chart, independent of any surface.
pub(super) struct ChartModel {
    pub(super) dataset: Rc<Dataset>,
    pub(super) config: ChartConfig,
    pub(super) layout: ChartLayout,
    pub(super) viewport: ViewportController,
    pub(super) visibility: SeriesVisibilityController,
    pub(super) interaction: InteractionState,
}

impl ChartModel {
    pub(super) fn new(dataset: Dataset, config: ChartConfig, layout: ChartLayout) -> Self {
        let viewport = ViewportController::new(dataset.len());
        let visibility = SeriesVisibilityController::new(dataset.series_count());
        Self {
            dataset: Rc::new(dataset),
            config,
            layout,
            viewport,
            visibility,
            interaction: InteractionState::default(),
        }
    }
}
