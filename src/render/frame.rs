use crate::core::ChartLayout;
use crate::error::ChartResult;
use crate::render::{DrawCommand, Surface, SurfaceTarget};

/// Backend-agnostic snapshot of every surface for one presentation.
///
/// Layers are ordered back to front; each keeps its own opacity, transform
/// and visibility so backends can composite transitions.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub layout: ChartLayout,
    pub layers: Vec<Surface>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(layout: ChartLayout) -> Self {
        Self {
            layout,
            layers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_layer(mut self, layer: Surface) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        for layer in &self.layers {
            layer.validate()?;
        }
        Ok(())
    }

    /// Visible layers of one target, back to front.
    pub fn visible_layers(&self, target: SurfaceTarget) -> impl Iterator<Item = &Surface> {
        self.layers
            .iter()
            .filter(move |layer| layer.target() == target && layer.is_visible())
    }

    #[must_use]
    pub fn command_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.commands().len()).sum()
    }

    #[must_use]
    pub fn polyline_count(&self) -> usize {
        self.layers
            .iter()
            .filter(|layer| layer.is_visible())
            .flat_map(|layer| layer.commands())
            .filter(|command| matches!(command, DrawCommand::Polyline(_)))
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(Surface::is_blank)
    }
}
