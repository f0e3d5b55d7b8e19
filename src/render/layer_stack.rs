use crate::render::SurfaceKind;

/// Canonical back-to-front compositing order for a chart with `series_count`
/// series.
///
/// Axes sit under the series lines, staged axes sit on top of the axis they
/// replace and the pointer overlay is always topmost. Overview lines follow
/// as their own target.
#[must_use]
pub fn canonical_layer_order(series_count: usize) -> Vec<SurfaceKind> {
    let mut order = Vec::with_capacity(series_count * 2 + 5);
    order.extend([
        SurfaceKind::XAxis,
        SurfaceKind::StagedXAxis,
        SurfaceKind::YAxis,
        SurfaceKind::StagedYAxis,
    ]);
    order.extend((0..series_count).map(|series| SurfaceKind::Line { series }));
    order.push(SurfaceKind::PointerOverlay);
    order.extend((0..series_count).map(|series| SurfaceKind::OverviewLine { series }));
    order
}
