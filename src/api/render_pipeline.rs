use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::animation::{
    AnimationGroup, AnimationOutcome, AnimationSpec, FrameClock, LINE_TRANSITION_MS,
    X_AXIS_TRANSITION_MS, Y_AXIS_TRANSITION_MS,
};
use crate::core::{Dataset, LinearScale, find_extent};
use crate::error::ChartResult;
use crate::extensions::ChartEvent;
use crate::render::{Renderer, Surface, SurfaceKind, SurfaceTarget};

use super::axis_renderer::{
    draw_x_axis, draw_y_axis, x_incoming_style, x_outgoing_style, y_incoming_style,
    y_outgoing_style,
};
use super::line_renderer::{LineGeometry, draw_line, hide_style, rescale_factor, show_style};
use super::{ChartEngine, PendingTransition};

/// What one render pass does to a single series line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineAction {
    /// Leave the surface and any running transition alone.
    Skip,
    /// Redraw with the current scales, fully visible.
    Snap,
    /// Redraw with the current scales and fade in.
    Show { dy: f64 },
    /// Redraw every frame from the `from` y scale towards the current one.
    Rescale { from: LinearScale, dy: f64 },
    /// Fade out, then hide.
    Hide { max_drop: f64 },
    HideNow,
}

/// Decides how a line reacts to the current pass.
///
/// Overview lines skip passes that leave their y domain untouched unless a
/// show is queued; a forced pass snaps everything.
#[must_use]
pub fn plan_line(
    enabled: bool,
    pending: PendingTransition,
    target: SurfaceTarget,
    previous_y: Option<LinearScale>,
    current_y: LinearScale,
    forced: bool,
) -> LineAction {
    if !enabled {
        return match (pending, previous_y) {
            _ if forced => LineAction::HideNow,
            (PendingTransition::HidePending, Some(previous)) => LineAction::Hide {
                max_drop: previous.domain_max() - current_y.domain_max(),
            },
            (PendingTransition::HidePending, None) => LineAction::HideNow,
            _ => LineAction::Skip,
        };
    }

    let previous = match previous_y {
        Some(previous) if !forced => previous,
        _ => return LineAction::Snap,
    };
    let unchanged = previous.domain_max() == current_y.domain_max();
    let show = pending == PendingTransition::ShowPending;

    if target == SurfaceTarget::Overview && unchanged && !show {
        return LineAction::Skip;
    }
    if show {
        return LineAction::Show {
            dy: max_ratio(previous, current_y).unwrap_or(1.0),
        };
    }
    if unchanged || previous.is_degenerate() {
        return LineAction::Snap;
    }
    match max_ratio(previous, current_y) {
        Some(dy) => LineAction::Rescale { from: previous, dy },
        None => LineAction::Snap,
    }
}

/// `previous_max / current_max`, when finite.
fn max_ratio(previous: LinearScale, current: LinearScale) -> Option<f64> {
    let ratio = previous.domain_max() / current.domain_max();
    ratio.is_finite().then_some(ratio)
}

fn draw_series(
    surface: &mut Surface,
    dataset: &Dataset,
    series: usize,
    geometry: LineGeometry,
) -> ChartResult<()> {
    let data = dataset.series_at(series)?;
    draw_line(surface, dataset.x_values(), &data.values, data.color, geometry);
    Ok(())
}

impl<R: Renderer, C: FrameClock> ChartEngine<R, C> {
    /// Runs one render pass and presents the resulting frame.
    ///
    /// Scales are recomputed from the viewport and enabled series; axes and
    /// lines either snap, stay, or start transitions that later `tick` calls
    /// advance.
    pub fn render(&mut self) -> ChartResult<()> {
        let now = self.clock.now_ms();
        let forced = std::mem::take(&mut self.force_redraw);
        self.update_scales();

        if forced {
            self.scheduler.begin_group(AnimationGroup::XAxis);
            self.scheduler.begin_group(AnimationGroup::YAxis);
            self.stage.surfaces.clear_staged();
        }
        self.redraw_x_axis(now, forced);
        self.redraw_y_axis(now, forced);
        self.redraw_lines(SurfaceTarget::Main, now, forced)?;
        self.redraw_lines(SurfaceTarget::Overview, now, forced)?;
        self.refresh_selection();
        self.redraw_pointer_overlay();

        let live = self.scheduler.tick(now, &mut self.stage);
        trace!(chart_id = %self.chart_id, now, forced, live, "render pass finished");
        self.present()?;
        self.emit_event(ChartEvent::Rendered);
        Ok(())
    }

    fn update_scales(&mut self) {
        let dataset = &self.model.dataset;
        let config = &self.model.config;
        let layout = self.model.layout;
        let viewport = self.model.viewport.viewport();
        let enabled = self.model.visibility.enabled_flags();
        let padding = config.chart.padding;
        let x_values = dataset.x_values();
        let x_at = |index: usize| x_values.get(index).copied().unwrap_or_default();

        let y_top =
            find_extent(dataset, enabled, Some(viewport)).tick_aligned_max(config.axis.y.ticks);
        let y = LinearScale::new(
            (0.0, y_top),
            (layout.main.height_f64() - padding.bottom, padding.top),
        );
        let x = LinearScale::new(
            (x_at(viewport.left()), x_at(viewport.right())),
            (padding.left, layout.main.width_f64() - padding.right),
        );
        let overview_y = LinearScale::new(
            (0.0, find_extent(dataset, enabled, None).max),
            (layout.overview.height_f64(), 0.0),
        );
        let overview_x = LinearScale::new(
            (x_at(0), x_at(dataset.len().saturating_sub(1))),
            (0.0, layout.overview.width_f64()),
        );

        let scales = &mut self.stage.scales;
        scales.x.advance(x);
        scales.y.advance(y);
        scales.overview_x.advance(overview_x);
        scales.overview_y.advance(overview_y);
    }

    fn redraw_x_axis(&mut self, now: f64, forced: bool) {
        let state = self.stage.scales.x;
        let Some(current) = state.current() else {
            return;
        };
        let previous = match state.previous() {
            Some(previous) if !forced => previous,
            _ => {
                let axis = &mut self.stage.surfaces.x_axis;
                draw_x_axis(axis, current, &self.model.config.axis.x);
                axis.reset_compositing();
                trace!(chart_id = %self.chart_id, "x axis snapped");
                return;
            }
        };
        if previous.domain() == current.domain() {
            return;
        }

        let shrank = previous.domain_max() > current.domain_max();
        debug!(
            chart_id = %self.chart_id,
            from = ?previous.domain(),
            to = ?current.domain(),
            "x axis transition"
        );
        self.scheduler.begin_group(AnimationGroup::XAxis);
        let mut staged = Surface::new(SurfaceKind::StagedXAxis, self.model.layout.main);
        draw_x_axis(&mut staged, current, &self.model.config.axis.x);
        let (opacity, transform) = x_incoming_style(0.0, shrank);
        staged.set_opacity(opacity);
        staged.set_transform(transform);
        let key = self.stage.surfaces.stage_x(staged);

        let spec = AnimationSpec::new(X_AXIS_TRANSITION_MS);
        self.scheduler
            .animate_in(AnimationGroup::XAxis, now, spec, move |stage, progress| {
                let (opacity, transform) = x_outgoing_style(progress.fraction(), shrank);
                stage.surfaces.x_axis.set_opacity(opacity);
                stage.surfaces.x_axis.set_transform(transform);
                Ok(())
            });
        let incoming =
            self.scheduler
                .animate_in(AnimationGroup::XAxis, now, spec, move |stage, progress| {
                    if let Some(surface) = stage.surfaces.staged_x.get_mut(&key) {
                        let (opacity, transform) = x_incoming_style(progress.fraction(), shrank);
                        surface.set_opacity(opacity);
                        surface.set_transform(transform);
                    }
                    Ok(())
                });
        self.scheduler.on_end(incoming, move |stage, outcome| {
            stage.surfaces.commit_staged_x(key);
            if outcome == AnimationOutcome::Completed {
                stage.scales.x.settle();
            }
        });
    }

    fn redraw_y_axis(&mut self, now: f64, forced: bool) {
        let state = self.stage.scales.y;
        let Some(current) = state.current() else {
            return;
        };
        let padding = self.model.config.chart.padding;
        let previous = match state.previous() {
            Some(previous) if !forced => previous,
            _ => {
                let axis = &mut self.stage.surfaces.y_axis;
                draw_y_axis(axis, current, &self.model.config.axis.y, padding);
                axis.reset_compositing();
                trace!(chart_id = %self.chart_id, "y axis snapped");
                return;
            }
        };
        if previous.domain_max() == current.domain_max() {
            return;
        }

        let grew = previous.domain_max() < current.domain_max();
        debug!(
            chart_id = %self.chart_id,
            from = previous.domain_max(),
            to = current.domain_max(),
            "y axis transition"
        );
        self.scheduler.begin_group(AnimationGroup::YAxis);
        let mut staged = Surface::new(SurfaceKind::StagedYAxis, self.model.layout.main);
        draw_y_axis(&mut staged, current, &self.model.config.axis.y, padding);
        let (opacity, transform) = y_incoming_style(0.0, grew);
        staged.set_opacity(opacity);
        staged.set_transform(transform);
        let key = self.stage.surfaces.stage_y(staged);

        let spec = AnimationSpec::new(Y_AXIS_TRANSITION_MS);
        self.scheduler
            .animate_in(AnimationGroup::YAxis, now, spec, move |stage, progress| {
                let (opacity, transform) = y_outgoing_style(progress.fraction(), grew);
                stage.surfaces.y_axis.set_opacity(opacity);
                stage.surfaces.y_axis.set_transform(transform);
                Ok(())
            });
        let incoming =
            self.scheduler
                .animate_in(AnimationGroup::YAxis, now, spec, move |stage, progress| {
                    if let Some(surface) = stage.surfaces.staged_y.get_mut(&key) {
                        let (opacity, transform) = y_incoming_style(progress.fraction(), grew);
                        surface.set_opacity(opacity);
                        surface.set_transform(transform);
                    }
                    Ok(())
                });
        self.scheduler.on_end(incoming, move |stage, outcome| {
            stage.surfaces.commit_staged_y(key);
            if outcome == AnimationOutcome::Completed {
                stage.scales.y.settle();
            }
        });
    }

    fn redraw_lines(&mut self, target: SurfaceTarget, now: f64, forced: bool) -> ChartResult<()> {
        let scales = self.stage.scales;
        let (x_state, y_state) = match target {
            SurfaceTarget::Main => (scales.x, scales.y),
            SurfaceTarget::Overview => (scales.overview_x, scales.overview_y),
        };
        let (Some(x_scale), Some(y_scale)) = (x_state.current(), y_state.current()) else {
            return Ok(());
        };
        let (left, right) = match target {
            SurfaceTarget::Main => {
                let viewport = self.model.viewport.viewport();
                (viewport.left(), viewport.right())
            }
            SurfaceTarget::Overview => (0, self.model.dataset.len().saturating_sub(1)),
        };
        let geometry = LineGeometry {
            left,
            right,
            x_scale,
            y_scale,
            y_factor: 1.0,
        };

        for series in 0..self.model.visibility.series_count() {
            let pending = self.model.visibility.take_pending(target, series)?;
            let enabled = self.model.visibility.is_enabled(series)?;
            let action = plan_line(enabled, pending, target, y_state.previous(), y_scale, forced);
            if action != LineAction::Skip {
                trace!(chart_id = %self.chart_id, ?target, series, ?action, "line redraw");
                self.apply_line_action(target, series, action, geometry, now)?;
            }
        }
        Ok(())
    }

    fn apply_line_action(
        &mut self,
        target: SurfaceTarget,
        series: usize,
        action: LineAction,
        geometry: LineGeometry,
        now: f64,
    ) -> ChartResult<()> {
        let group = AnimationGroup::Line { target, series };
        self.scheduler.begin_group(group);
        let dataset = Rc::clone(&self.model.dataset);
        let surface = self.stage.surfaces.line_mut(target, series)?;
        surface.reset_compositing();
        let spec = AnimationSpec::new(LINE_TRANSITION_MS);

        match action {
            LineAction::Skip => {}
            LineAction::Snap => {
                surface.set_visible(true);
                draw_series(surface, &dataset, series, geometry)?;
            }
            LineAction::HideNow => surface.set_visible(false),
            LineAction::Show { dy } => {
                surface.set_visible(true);
                draw_series(surface, &dataset, series, geometry)?;
                let (opacity, transform) = show_style(0.0, dy);
                surface.set_opacity(opacity);
                surface.set_transform(transform);

                let handle = self.scheduler.animate_in(group, now, spec, move |stage, progress| {
                    let surface = stage.surfaces.line_mut(target, series)?;
                    let (opacity, transform) = show_style(progress.fraction(), dy);
                    surface.set_opacity(opacity);
                    surface.set_transform(transform);
                    Ok(())
                });
                self.scheduler.on_end(handle, move |stage, outcome| {
                    if outcome != AnimationOutcome::Completed {
                        return;
                    }
                    if let Ok(surface) = stage.surfaces.line_mut(target, series) {
                        surface.reset_compositing();
                        surface.set_visible(true);
                    }
                });
            }
            LineAction::Rescale { from, dy } => {
                surface.set_visible(true);
                let start = LineGeometry {
                    y_scale: from,
                    ..geometry
                };
                draw_series(surface, &dataset, series, start)?;

                let frames = Rc::clone(&dataset);
                let handle = self.scheduler.animate_in(group, now, spec, move |stage, progress| {
                    let surface = stage.surfaces.line_mut(target, series)?;
                    let frame = LineGeometry {
                        y_factor: rescale_factor(progress.fraction(), dy),
                        ..start
                    };
                    draw_series(surface, &frames, series, frame)
                });
                self.scheduler.on_end(handle, move |stage, outcome| {
                    if outcome != AnimationOutcome::Completed {
                        return;
                    }
                    let settled = stage
                        .surfaces
                        .line_mut(target, series)
                        .and_then(|surface| draw_series(surface, &dataset, series, geometry));
                    if let Err(err) = settled {
                        warn!(series, error = %err, "final rescale frame failed");
                    }
                });
            }
            LineAction::Hide { max_drop } => {
                let handle = self.scheduler.animate_in(group, now, spec, move |stage, progress| {
                    let surface = stage.surfaces.line_mut(target, series)?;
                    let (opacity, transform) = hide_style(progress.fraction(), max_drop);
                    surface.set_opacity(opacity);
                    surface.set_transform(transform);
                    Ok(())
                });
                self.scheduler.on_end(handle, move |stage, outcome| {
                    if outcome != AnimationOutcome::Completed {
                        return;
                    }
                    if let Ok(surface) = stage.surfaces.line_mut(target, series) {
                        surface.set_visible(false);
                        surface.reset_compositing();
                    }
                });
            }
        }
        Ok(())
    }
}
