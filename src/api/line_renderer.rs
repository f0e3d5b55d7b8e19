use crate::core::LinearScale;
use crate::render::{Color, DrawCommand, PolylinePrimitive, Surface, SurfaceTransform};

pub const LINE_STROKE_WIDTH: f64 = 1.0;

/// Index range and scales one series line is drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineGeometry {
    pub left: usize,
    pub right: usize,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    /// Multiplier applied to every value before the y conversion; `1.0`
    /// outside rescale transitions.
    pub y_factor: f64,
}

/// Decimated device-pixel vertices for `values[left..=right]`.
///
/// Points are truncated to whole pixels; a point closer than one pixel on
/// both axes to the last emitted vertex is skipped.
#[must_use]
pub fn build_polyline(x_values: &[f64], values: &[f64], geometry: LineGeometry) -> Vec<(f64, f64)> {
    let last = x_values.len().min(values.len());
    if last == 0 || geometry.left > geometry.right {
        return Vec::new();
    }
    let right = geometry.right.min(last - 1);
    let left = geometry.left.min(right);

    let mut points: Vec<(f64, f64)> = Vec::with_capacity(right - left + 1);
    for index in left..=right {
        let point = (
            geometry.x_scale.convert(x_values[index]).trunc(),
            geometry
                .y_scale
                .convert(values[index] * geometry.y_factor)
                .trunc(),
        );
        match points.last() {
            Some(previous)
                if (point.0 - previous.0).abs() < 1.0 && (point.1 - previous.1).abs() < 1.0 => {}
            _ => points.push(point),
        }
    }
    points
}

/// Replaces the surface content with one stroked series polyline.
pub fn draw_line(
    surface: &mut Surface,
    x_values: &[f64],
    values: &[f64],
    color: Color,
    geometry: LineGeometry,
) {
    surface.clear();
    let points = build_polyline(x_values, values, geometry);
    if points.is_empty() {
        return;
    }
    surface.push(DrawCommand::Polyline(PolylinePrimitive::new(
        points,
        LINE_STROKE_WIDTH,
        color,
    )));
}

/// Opacity and transform of a line fading in at `fraction`.
///
/// `dy` is `previous_max / current_max`; a growing domain (`dy < 1`) slides
/// the line down from above, otherwise it rises from below.
#[must_use]
pub fn show_style(fraction: f64, dy: f64) -> (f64, SurfaceTransform) {
    let translate = if dy < 1.0 {
        -50.0 + 50.0 * fraction
    } else {
        40.0 - 40.0 * fraction
    };
    (fraction, SurfaceTransform::vertical(translate, fraction))
}

/// Opacity and transform of a line fading out at `fraction`.
///
/// `max_drop` is `previous_max - current_max`.
#[must_use]
pub fn hide_style(fraction: f64, max_drop: f64) -> (f64, SurfaceTransform) {
    let translate = if max_drop <= 0.0 {
        40.0 * fraction
    } else {
        -40.0 * fraction
    };
    (
        1.0 - fraction,
        SurfaceTransform::vertical(translate, 1.0 - 0.9 * fraction),
    )
}

/// Vertical factor of a rescale frame: `1` at the start, `dy` at the end.
#[must_use]
pub fn rescale_factor(fraction: f64, dy: f64) -> f64 {
    1.0 + (dy - 1.0) * fraction
}
