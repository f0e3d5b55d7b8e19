use crate::core::LinearScale;
use crate::render::{
    DrawCommand, LinePrimitive, Surface, SurfaceTransform, TextHAlign, TextPrimitive,
};

use super::axis_label_format::{format_date_label, format_value_label};
use super::engine_config::{Padding, XAxisConfig, YAxisConfig};

pub const AXIS_LABEL_FONT_PX: f64 = 14.0;
pub const GRIDLINE_WIDTH: f64 = 1.0;
/// Gap between a gridline and the label sitting on it.
const Y_LABEL_LIFT_PX: f64 = 5.0;
/// Distance of x labels' baseline from the bottom edge.
const X_LABEL_BASELINE_PX: f64 = 30.0;

/// Replaces the surface content with `ticks + 1` gridlines and their labels.
///
/// Gridlines sit on whole multiples of `ceil(domain_max / ticks)`.
pub fn draw_y_axis(
    surface: &mut Surface,
    scale: LinearScale,
    config: &YAxisConfig,
    padding: Padding,
) {
    surface.clear();
    let ticks = config.ticks.max(1);
    let step = (scale.domain_max() / f64::from(ticks)).ceil();
    let right = surface.size().width_f64() - padding.right;

    for i in 0..=ticks {
        let value = step * f64::from(i);
        let y = scale.convert(value);
        surface.push(DrawCommand::Line(LinePrimitive::new(
            0.0,
            y,
            right,
            y,
            GRIDLINE_WIDTH,
            config.stroke,
        )));
        surface.push(DrawCommand::Text(TextPrimitive::new(
            format_value_label(value),
            0.0,
            y - Y_LABEL_LIFT_PX,
            AXIS_LABEL_FONT_PX,
            config.labels.color,
            TextHAlign::Left,
        )));
    }
}

/// Replaces the surface content with `ticks - 1` centred date labels.
///
/// Labels sit at `start + ceil((end - start) / ticks) * i` for `i` in
/// `1..ticks`, where `[start, end]` is the scale domain.
pub fn draw_x_axis(surface: &mut Surface, scale: LinearScale, config: &XAxisConfig) {
    surface.clear();
    let ticks = config.ticks.max(1);
    let (start, end) = scale.domain();
    let step = ((end - start) / f64::from(ticks)).ceil();
    let baseline = surface.size().height_f64() - X_LABEL_BASELINE_PX;

    for i in 1..ticks {
        let value = start + step * f64::from(i);
        let text = format_date_label(value, &config.labels.format);
        if text.is_empty() {
            continue;
        }
        surface.push(DrawCommand::Text(TextPrimitive::new(
            text,
            scale.convert(value),
            baseline,
            AXIS_LABEL_FONT_PX,
            config.labels.color,
            TextHAlign::Center,
        )));
    }
}

/// Outgoing y axis: fades out, slides away and collapses vertically.
#[must_use]
pub fn y_outgoing_style(fraction: f64, grew: bool) -> (f64, SurfaceTransform) {
    let translate = (if grew { 40.0 } else { -40.0 }) * fraction;
    (
        1.0 - fraction,
        SurfaceTransform::vertical(translate, 1.0 - fraction),
    )
}

/// Incoming y axis: fades in and grows from above (`grew`) or below.
#[must_use]
pub fn y_incoming_style(fraction: f64, grew: bool) -> (f64, SurfaceTransform) {
    let translate = if grew {
        -50.0 + 50.0 * fraction
    } else {
        40.0 - 40.0 * fraction
    };
    (fraction, SurfaceTransform::vertical(translate, fraction))
}

/// Outgoing x axis: starts dimmed at 0.3 and collapses horizontally.
#[must_use]
pub fn x_outgoing_style(fraction: f64, shrank: bool) -> (f64, SurfaceTransform) {
    let translate = (if shrank { 40.0 } else { -40.0 }) * fraction;
    (
        0.3 - 0.3 * fraction,
        SurfaceTransform::horizontal(translate, 1.0 - fraction),
    )
}

#[must_use]
pub fn x_incoming_style(fraction: f64, shrank: bool) -> (f64, SurfaceTransform) {
    let translate = if shrank {
        -50.0 + 50.0 * fraction
    } else {
        40.0 - 40.0 * fraction
    };
    (fraction, SurfaceTransform::horizontal(translate, fraction))
}

#[cfg(test)]
mod tests {
    use super::{draw_x_axis, draw_y_axis, y_incoming_style, y_outgoing_style};
    use crate::api::engine_config::{Padding, XAxisConfig, YAxisConfig};
    use crate::core::{LinearScale, SurfaceSize};
    use crate::render::{DrawCommand, Surface, SurfaceKind};

    #[test]
    fn y_axis_draws_tick_plus_one_gridlines() {
        let mut surface = Surface::new(SurfaceKind::YAxis, SurfaceSize::new(300, 200));
        let scale = LinearScale::new((0.0, 40.0), (150.0, 50.0));
        draw_y_axis(&mut surface, scale, &YAxisConfig::default(), Padding::default());

        let labels: Vec<&str> = surface
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text(text) => Some(text.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["0", "8", "16", "24", "32", "40"]);
    }

    #[test]
    fn x_axis_skips_window_edges() {
        let mut surface = Surface::new(SurfaceKind::XAxis, SurfaceSize::new(600, 200));
        let day = 86_400_000.0;
        let scale = LinearScale::new((0.0, 6.0 * day), (0.0, 600.0));
        draw_x_axis(&mut surface, scale, &XAxisConfig::default());
        assert_eq!(surface.commands().len(), 5);
    }

    #[test]
    fn axis_styles_meet_at_identity() {
        assert!(y_incoming_style(1.0, true).1.is_identity());
        assert_eq!(y_outgoing_style(0.0, false).0, 1.0);
        assert!(y_outgoing_style(0.0, true).1.is_identity());
    }
}
