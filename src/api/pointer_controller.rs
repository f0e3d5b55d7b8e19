use tracing::trace;

use crate::animation::FrameClock;
use crate::core::{LinearScale, nearest_index};
use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartEvent;
use crate::interaction::{SelectedPoint, SelectionState};
use crate::render::{CirclePrimitive, Color, DrawCommand, LinePrimitive, Renderer, Surface};

use super::ChartEngine;
use super::tooltip::TOOLTIP_OFFSET_PX;

pub const GUIDE_LINE_WIDTH: f64 = 2.0;
pub const MARKER_RADIUS: f64 = 5.0;
pub const MARKER_STROKE_WIDTH: f64 = 5.0;

/// Colors the pointer overlay is drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub guide: Color,
    pub marker_fill: Color,
}

/// Replaces the overlay with a vertical guide at the selected x and one
/// marker per selected point. An empty selection leaves it blank.
pub fn draw_pointer_overlay(
    surface: &mut Surface,
    selection: &SelectionState,
    x_scale: LinearScale,
    y_scale: LinearScale,
    style: OverlayStyle,
) {
    surface.clear();
    let Some(x_value) = selection.x() else {
        return;
    };
    let x = x_scale.convert(x_value);
    let (bottom, top) = y_scale.range();
    surface.push(DrawCommand::Line(LinePrimitive::new(
        x,
        bottom,
        x,
        top,
        GUIDE_LINE_WIDTH,
        style.guide,
    )));
    for point in selection.points() {
        surface.push(DrawCommand::Circle(CirclePrimitive {
            cx: x,
            cy: y_scale.convert(point.y),
            radius: MARKER_RADIUS,
            stroke_width: MARKER_STROKE_WIDTH,
            stroke_color: point.color,
            fill_color: style.marker_fill,
        }));
    }
}

impl<R: Renderer, C: FrameClock> ChartEngine<R, C> {
    /// Resolves the pointer to the nearest visible index and shows its
    /// tooltip.
    ///
    /// `x`/`y` are main-surface coordinates. Nothing is selected when every
    /// series is disabled.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<()> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ChartError::InvalidData(
                "pointer position must be finite".to_owned(),
            ));
        }
        self.model.interaction.on_pointer_move(x, y);
        let Some(x_scale) = self.stage.scales.x.current() else {
            return Ok(());
        };

        let viewport = self.model.viewport.viewport();
        let query = x_scale.invert(x);
        let Some(index) = nearest_index(
            self.model.dataset.x_values(),
            |value| *value,
            query,
            viewport.left(),
            viewport.right(),
        ) else {
            return Ok(());
        };
        trace!(chart_id = %self.chart_id, x, query, index, "pointer resolved");

        let selection = self.resolve_selection(index);
        let had_selection = !self.model.interaction.selection().is_empty();
        self.model.interaction.set_selection(selection.clone());
        match selection.x() {
            Some(x_value) => {
                let content = (self.tooltip_formatter)(&selection, &self.model.config);
                self.emit_event(ChartEvent::TooltipShow {
                    content,
                    anchor_x: x_scale.convert(x_value) + TOOLTIP_OFFSET_PX,
                    anchor_y: y + TOOLTIP_OFFSET_PX,
                    selection,
                });
            }
            None if had_selection => self.emit_event(ChartEvent::TooltipHide),
            None => {}
        }
        self.redraw_pointer_overlay();
        self.present()
    }

    /// Clears the selection and hides the tooltip.
    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        self.model.interaction.on_pointer_leave();
        self.emit_event(ChartEvent::TooltipHide);
        self.redraw_pointer_overlay();
        self.present()
    }

    /// Points of every enabled series at `index`.
    pub(super) fn resolve_selection(&self, index: usize) -> SelectionState {
        let dataset = &self.model.dataset;
        let Some(&x) = dataset.x_values().get(index) else {
            return SelectionState::default();
        };
        let points = dataset
            .series()
            .iter()
            .enumerate()
            .filter(|(series, _)| self.model.visibility.is_enabled(*series).unwrap_or(false))
            .filter_map(|(series, data)| {
                data.values.get(index).map(|&y| SelectedPoint {
                    series,
                    x,
                    y,
                    color: data.color,
                    name: data.name.clone(),
                })
            })
            .collect();
        SelectionState::new(index, points)
    }

    /// Re-resolves the stored selection against the current enabled set.
    ///
    /// A selection outside the viewport is dropped and its tooltip hidden.
    pub(super) fn refresh_selection(&mut self) {
        let Some(index) = self.model.interaction.selection().index() else {
            return;
        };
        let selection = if self.model.viewport.viewport().contains(index) {
            self.resolve_selection(index)
        } else {
            SelectionState::default()
        };
        if selection.is_empty() {
            self.emit_event(ChartEvent::TooltipHide);
        }
        self.model.interaction.set_selection(selection);
    }

    pub(super) fn redraw_pointer_overlay(&mut self) {
        let overlay = &mut self.stage.surfaces.overlay;
        let (Some(x_scale), Some(y_scale)) =
            (self.stage.scales.x.current(), self.stage.scales.y.current())
        else {
            overlay.clear();
            return;
        };
        let style = OverlayStyle {
            guide: self.model.config.axis.y.stroke,
            marker_fill: self.model.config.chart.fill,
        };
        draw_pointer_overlay(
            overlay,
            self.model.interaction.selection(),
            x_scale,
            y_scale,
            style,
        );
    }
}
