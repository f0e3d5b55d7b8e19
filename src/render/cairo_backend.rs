use cairo::{Context, Format, ImageSurface, LineJoin};
use pango::FontDescription;
use std::f64::consts::TAU;

use crate::core::SurfaceSize;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, DrawCommand, RenderFrame, Renderer, Surface, SurfaceTarget, TextHAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub layers_composited: usize,
    pub lines_drawn: usize,
    pub polylines_drawn: usize,
    pub texts_drawn: usize,
    pub circles_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
        target: SurfaceTarget,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Offscreen rendering through `Renderer::render` fills one image surface per
/// target (main plot and overview strip). Each layer is painted through its
/// own group so opacity and transform apply to the layer as a whole.
#[derive(Debug)]
pub struct CairoRenderer {
    main: ImageSurface,
    overview: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(main: SurfaceSize, overview: SurfaceSize) -> ChartResult<Self> {
        Ok(Self {
            main: create_image_surface(main)?,
            overview: create_image_surface(overview)?,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self, target: SurfaceTarget) -> &ImageSurface {
        match target {
            SurfaceTarget::Main => &self.main,
            SurfaceTarget::Overview => &self.overview,
        }
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
        target: SurfaceTarget,
    ) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for layer in frame.visible_layers(target) {
            composite_layer(context, layer, &mut stats)?;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        if !surface_matches(&self.main, frame.layout.main) {
            self.main = create_image_surface(frame.layout.main)?;
        }
        if !surface_matches(&self.overview, frame.layout.overview) {
            self.overview = create_image_surface(frame.layout.overview)?;
        }

        let main = Context::new(&self.main)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&main, frame, SurfaceTarget::Main)?;
        let overview = Context::new(&self.overview)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&overview, frame, SurfaceTarget::Overview)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
        target: SurfaceTarget,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame, target)
    }
}

fn composite_layer(
    context: &Context,
    layer: &Surface,
    stats: &mut CairoRenderStats,
) -> ChartResult<()> {
    let transform = layer.transform();
    // A collapsed axis makes the matrix singular and draws nothing anyway.
    if layer.opacity() <= 0.0 || transform.scale_x == 0.0 || transform.scale_y == 0.0 {
        return Ok(());
    }

    let size = layer.size();
    let (cx, cy) = (size.width_f64() / 2.0, size.height_f64() / 2.0);

    context.push_group();
    context
        .save()
        .map_err(|err| map_backend_error("failed to save state", err))?;
    context.translate(
        cx + size.width_f64() * transform.translate_x_pct / 100.0,
        cy + size.height_f64() * transform.translate_y_pct / 100.0,
    );
    context.scale(transform.scale_x, transform.scale_y);
    context.translate(-cx, -cy);
    for command in layer.commands() {
        draw_command(context, command, stats)?;
    }
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore state", err))?;
    context
        .pop_group_to_source()
        .map_err(|err| map_backend_error("failed to pop layer group", err))?;
    context
        .paint_with_alpha(layer.opacity())
        .map_err(|err| map_backend_error("failed to composite layer", err))?;

    stats.layers_composited += 1;
    Ok(())
}

fn draw_command(
    context: &Context,
    command: &DrawCommand,
    stats: &mut CairoRenderStats,
) -> ChartResult<()> {
    match command {
        DrawCommand::Line(line) => {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }
        DrawCommand::Polyline(polyline) => {
            let Some((first, rest)) = polyline.points.split_first() else {
                return Ok(());
            };
            apply_color(context, polyline.color);
            context.set_line_width(polyline.stroke_width);
            context.set_line_join(LineJoin::Round);
            context.move_to(first.0, first.1);
            for (x, y) in rest {
                context.line_to(*x, *y);
            }
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke polyline", err))?;
            stats.polylines_drawn += 1;
        }
        DrawCommand::Text(text) => {
            let layout = pangocairo::functions::create_layout(context);
            let font_description =
                FontDescription::from_string(&format!("Sans {}", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, text_height) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                TextHAlign::Right => text.x - f64::from(text_width),
            };

            apply_color(context, text.color);
            // Labels are anchored on their baseline like canvas `fillText`.
            context.move_to(x, text.y - f64::from(text_height));
            pangocairo::functions::show_layout(context, &layout);
            stats.texts_drawn += 1;
        }
        DrawCommand::Circle(circle) => {
            context.new_sub_path();
            context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
            apply_color(context, circle.stroke_color);
            context.set_line_width(circle.stroke_width);
            context
                .stroke_preserve()
                .map_err(|err| map_backend_error("failed to stroke marker", err))?;
            apply_color(context, circle.fill_color);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill marker", err))?;
            stats.circles_drawn += 1;
        }
    }
    Ok(())
}

// Cairo rejects zero-sized image surfaces; an unsized target keeps 1x1.
fn backing_dimensions(size: SurfaceSize) -> (i32, i32) {
    (size.width.max(1) as i32, size.height.max(1) as i32)
}

fn surface_matches(surface: &ImageSurface, size: SurfaceSize) -> bool {
    (surface.width(), surface.height()) == backing_dimensions(size)
}

fn create_image_surface(size: SurfaceSize) -> ChartResult<ImageSurface> {
    let (width, height) = backing_dimensions(size);
    ImageSurface::create(Format::ARgb32, width, height)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
