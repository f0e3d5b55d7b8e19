use std::rc::Rc;

use crate::animation::FrameClock;
use crate::interaction::SelectionState;
use crate::render::Renderer;

use super::axis_label_format::{format_date_label, format_value_label};
use super::{ChartConfig, ChartEngine};

/// Pixel offset of the tooltip anchor from the selection guide and pointer.
pub const TOOLTIP_OFFSET_PX: f64 = 25.0;

/// Builds the tooltip text for a selection.
pub type TooltipFormatter = Rc<dyn Fn(&SelectionState, &ChartConfig) -> String>;

/// Date header in the x-axis label pattern, then one `value name` line per
/// enabled series.
#[must_use]
pub fn default_tooltip_formatter(selection: &SelectionState, config: &ChartConfig) -> String {
    let Some(x) = selection.x() else {
        return String::new();
    };
    let mut lines = Vec::with_capacity(selection.points().len() + 1);
    lines.push(format_date_label(x, &config.axis.x.labels.format));
    lines.extend(
        selection
            .points()
            .iter()
            .map(|point| format!("{} {}", format_value_label(point.y), point.name)),
    );
    lines.join("\n")
}

impl<R: Renderer, C: FrameClock> ChartEngine<R, C> {
    pub fn set_tooltip_formatter(
        &mut self,
        formatter: impl Fn(&SelectionState, &ChartConfig) -> String + 'static,
    ) {
        self.tooltip_formatter = Rc::new(formatter);
    }

    pub fn reset_tooltip_formatter(&mut self) {
        self.tooltip_formatter = Rc::new(default_tooltip_formatter);
    }
}
