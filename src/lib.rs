//! linechart-rs: scaling, transition and hit-testing engine for interactive
//! time-series line charts.
//!
//! The engine keeps a zoomable main plot and a full-range overview strip in
//! sync, animates axes and series lines between states on a host-driven frame
//! clock, and hands retained draw commands to a pluggable renderer.

pub mod animation;
pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{ChartConfig, ChartConfigPatch, ChartEngine};
pub use error::{ChartError, ChartResult};
