mod frame;
mod layer_stack;
mod null_renderer;
mod primitives;
mod surface;

pub use frame::RenderFrame;
pub use layer_stack::canonical_layer_order;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, PolylinePrimitive, TextHAlign, TextPrimitive,
};
pub use surface::{DrawCommand, Surface, SurfaceKind, SurfaceTarget, SurfaceTransform};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` after every render
/// pass and every animation tick, so drawing code stays isolated from scale,
/// transition and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
