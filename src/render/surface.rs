use serde::{Deserialize, Serialize};

use crate::core::SurfaceSize;
use crate::error::{ChartError, ChartResult};
use crate::render::{CirclePrimitive, LinePrimitive, PolylinePrimitive, TextPrimitive};

/// Which surface group a layer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceTarget {
    /// Zoomed plot area driven by the viewport.
    Main,
    /// Full-range strip under the zoom handles.
    Overview,
}

/// Logical owner of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceKind {
    XAxis,
    YAxis,
    /// Off-screen axis being faded in on top of the visible one.
    StagedXAxis,
    StagedYAxis,
    Line { series: usize },
    OverviewLine { series: usize },
    PointerOverlay,
}

impl SurfaceKind {
    #[must_use]
    pub fn target(self) -> SurfaceTarget {
        match self {
            Self::OverviewLine { .. } => SurfaceTarget::Overview,
            _ => SurfaceTarget::Main,
        }
    }
}

/// Compositing transform applied to a whole surface.
///
/// Translation is expressed in percent of the surface size and scaling
/// happens around the surface centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceTransform {
    pub translate_x_pct: f64,
    pub translate_y_pct: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for SurfaceTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl SurfaceTransform {
    pub const IDENTITY: Self = Self {
        translate_x_pct: 0.0,
        translate_y_pct: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    #[must_use]
    pub const fn vertical(translate_y_pct: f64, scale_y: f64) -> Self {
        Self {
            translate_x_pct: 0.0,
            translate_y_pct,
            scale_x: 1.0,
            scale_y,
        }
    }

    #[must_use]
    pub const fn horizontal(translate_x_pct: f64, scale_x: f64) -> Self {
        Self {
            translate_x_pct,
            translate_y_pct: 0.0,
            scale_x,
            scale_y: 1.0,
        }
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// Maps a surface-local point to its composited position.
    #[must_use]
    pub fn apply(self, point: (f64, f64), size: SurfaceSize) -> (f64, f64) {
        let (width, height) = (size.width_f64(), size.height_f64());
        let (cx, cy) = (width / 2.0, height / 2.0);
        (
            cx + (point.0 - cx) * self.scale_x + width * self.translate_x_pct / 100.0,
            cy + (point.1 - cy) * self.scale_y + height * self.translate_y_pct / 100.0,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line(LinePrimitive),
    Polyline(PolylinePrimitive),
    Text(TextPrimitive),
    Circle(CirclePrimitive),
}

impl DrawCommand {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Line(line) => line.validate(),
            Self::Polyline(polyline) => polyline.validate(),
            Self::Text(text) => text.validate(),
            Self::Circle(circle) => circle.validate(),
        }
    }
}

/// Retained drawing surface: a command list plus compositing state.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    kind: SurfaceKind,
    size: SurfaceSize,
    commands: Vec<DrawCommand>,
    opacity: f64,
    transform: SurfaceTransform,
    visible: bool,
}

impl Surface {
    #[must_use]
    pub fn new(kind: SurfaceKind, size: SurfaceSize) -> Self {
        Self {
            kind,
            size,
            commands: Vec::new(),
            opacity: 1.0,
            transform: SurfaceTransform::IDENTITY,
            visible: true,
        }
    }

    #[must_use]
    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    #[must_use]
    pub fn target(&self) -> SurfaceTarget {
        self.kind.target()
    }

    #[must_use]
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    #[must_use]
    pub fn transform(&self) -> SurfaceTransform {
        self.transform
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drops every draw command; compositing state is kept.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn set_transform(&mut self, transform: SurfaceTransform) {
        self.transform = transform;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Clears opacity and transform overrides.
    pub fn reset_compositing(&mut self) {
        self.opacity = 1.0;
        self.transform = SurfaceTransform::IDENTITY;
    }

    /// Takes over the commands of `other`, keeping this surface's identity.
    pub fn commit_from(&mut self, other: Surface) {
        self.commands = other.commands;
        self.reset_compositing();
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.opacity.is_finite() {
            return Err(ChartError::InvalidData(
                "surface opacity must be finite".to_owned(),
            ));
        }
        let transform = self.transform;
        if ![
            transform.translate_x_pct,
            transform.translate_y_pct,
            transform.scale_x,
            transform.scale_y,
        ]
        .iter()
        .all(|value| value.is_finite())
        {
            return Err(ChartError::InvalidData(
                "surface transform must be finite".to_owned(),
            ));
        }
        for command in &self.commands {
            command.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{SurfaceKind, SurfaceTarget, SurfaceTransform};
    use crate::core::SurfaceSize;

    #[test]
    fn transform_scales_around_centre() {
        let size = SurfaceSize::new(200, 100);
        let collapse = SurfaceTransform::vertical(0.0, 0.0);
        assert_eq!(collapse.apply((10.0, 0.0), size), (10.0, 50.0));

        let slide = SurfaceTransform::vertical(40.0, 1.0);
        assert_eq!(slide.apply((10.0, 0.0), size), (10.0, 40.0));
    }

    #[test]
    fn overview_lines_target_overview() {
        assert_eq!(
            SurfaceKind::OverviewLine { series: 2 }.target(),
            SurfaceTarget::Overview
        );
        assert_eq!(SurfaceKind::StagedYAxis.target(), SurfaceTarget::Main);
    }
}
