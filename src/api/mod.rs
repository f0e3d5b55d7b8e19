mod axis_label_format;
mod axis_renderer;
mod chart_model;
mod chart_stage;
mod engine;
mod engine_config;
mod engine_init;
mod line_renderer;
mod observer_registry;
mod pointer_controller;
mod render_pipeline;
mod render_throttle;
mod tooltip;
mod viewport_controller;
mod visibility_controller;

pub use axis_label_format::{format_date_label, format_value_label, validate_date_pattern};
pub use axis_renderer::{
    AXIS_LABEL_FONT_PX, GRIDLINE_WIDTH, draw_x_axis, draw_y_axis, x_incoming_style,
    x_outgoing_style, y_incoming_style, y_outgoing_style,
};
pub use chart_stage::{ChartStage, ScaleSet, SurfaceSet};
pub use engine::ChartEngine;
pub use engine_config::{
    AxisSection, AxisSectionPatch, ChartConfig, ChartConfigPatch, ChartSection,
    ChartSectionPatch, Padding, PaddingPatch, XAxisConfig, XAxisLabels, XAxisLabelsPatch,
    XAxisPatch, YAxisConfig, YAxisLabels, YAxisLabelsPatch, YAxisPatch,
};
pub use line_renderer::{
    LINE_STROKE_WIDTH, LineGeometry, build_polyline, draw_line, hide_style, rescale_factor,
    show_style,
};
pub use pointer_controller::{
    GUIDE_LINE_WIDTH, MARKER_RADIUS, MARKER_STROKE_WIDTH, OverlayStyle, draw_pointer_overlay,
};
pub use render_pipeline::{LineAction, plan_line};
pub use render_throttle::{RENDER_THROTTLE_MS, RenderThrottle};
pub use tooltip::{TOOLTIP_OFFSET_PX, TooltipFormatter, default_tooltip_formatter};
pub use viewport_controller::ViewportController;
pub use visibility_controller::{PendingTransition, SeriesVisibilityController};
