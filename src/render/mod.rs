//! Render pipeline: draws marks into the plotting rectangle and turns the
//! result into pixels (or an SVG document).
//!
//! - Vector marks go through plotters' bitmap backend into a buffer the size
//!   of the plotting rectangle, which clips them, and are then copied into
//!   the canvas bitmap.
//! - Marks bound to the [`AcceleratedRenderer`] are composited straight into
//!   the canvas bitmap afterwards, clipped to the same rectangle.
//! - The title is drawn above the plot in both outputs, with the bundled
//!   DejaVu Sans face in bitmaps.
//! - The SVG path draws every mark as a vector element.
//!
//! Rasterizing reads the marks' current style. Updates still queued on the
//! figure's animation queue are not waited for.

pub mod animation;
pub mod marks;
pub mod raster;

use std::sync::Once;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontFamily, FontStyle};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use serde::{Deserialize, Serialize};

use crate::error::{FigureError, Result};
use crate::models::{Canvas, FigureGeometry, FigureModel};
use crate::style::{Rgba, parse_color};

pub use animation::{AnimationQueue, MarkId};
pub use marks::{MarkKind, MarkerShape, Scatter, ScatterSpec, StyleUpdate};
pub use raster::Bitmap;

/// Point count from which a plain scatter is handed to the accelerated renderer.
pub const DEFAULT_ACCELERATION_THRESHOLD: usize = 100_000;

/// How a mark is drawn; fixed when the mark is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Vector,
    Accelerated,
}

/// Decide from a mark's static properties whether it needs the accelerated renderer.
pub fn choose_mode(spec: &ScatterSpec, threshold: usize) -> RenderMode {
    if spec.kind == MarkKind::ScatterGl || spec.len() >= threshold {
        RenderMode::Accelerated
    } else {
        RenderMode::Vector
    }
}

/// Handle to the accelerated renderer. Present on a figure only once a mark
/// needed it.
#[derive(Debug)]
pub struct AcceleratedRenderer {
    threshold: usize,
    marks: usize,
}

impl AcceleratedRenderer {
    pub(crate) fn new(threshold: usize) -> Self {
        log::info!("creating accelerated renderer (threshold {threshold} points)");
        Self {
            threshold,
            marks: 0,
        }
    }

    pub(crate) fn bind(&mut self) {
        self.marks += 1;
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Number of marks drawn by this renderer.
    pub fn mark_count(&self) -> usize {
        self.marks
    }

    /// Composite `mark` into `bitmap`, clipped to `rect`.
    pub fn draw(&self, bitmap: &mut Bitmap, mark: &Scatter, rect: PixelRect) {
        let r = mark.radius();
        let (left, top) = (rect.x as f64, rect.y as f64);
        let (right, bottom) = (rect.right() as f64, rect.bottom() as f64);
        for (i, px, py) in mark.pixel_points(rect.width as f64, rect.height as f64) {
            let color = mark.color_at(i);
            let (cx, cy) = (left + px, top + py);
            let x0 = (cx - r).floor().max(left) as u32;
            let x1 = (cx + r).ceil().min(right) as u32;
            let y0 = (cy - r).floor().max(top) as u32;
            let y1 = (cy + r).ceil().min(bottom) as u32;
            for y in y0..y1 {
                for x in x0..x1 {
                    let dx = x as f64 + 0.5 - cx;
                    let dy = y as f64 + 0.5 - cy;
                    if mark.marker.contains(dx, dy, r) {
                        bitmap.blend_pixel(x, y, color);
                    }
                }
            }
        }
    }
}

/// Plotting rectangle snapped to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Round `geometry` to pixels, keeping it inside a `canvas_w` × `canvas_h` surface.
    pub fn from_geometry(geometry: &FigureGeometry, (canvas_w, canvas_h): (u32, u32)) -> Self {
        let x = (geometry.x.round().max(0.0) as u32).min(canvas_w);
        let y = (geometry.y.round().max(0.0) as u32).min(canvas_h);
        let width = (geometry.width.round().max(0.0) as u32).min(canvas_w - x);
        let height = (geometry.height.round().max(0.0) as u32).min(canvas_h - y);
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Everything one drawing pass needs.
pub struct Scene<'a> {
    pub canvas: &'a Canvas,
    pub model: &'a FigureModel,
    pub geometry: FigureGeometry,
    pub marks: &'a [Scatter],
    pub modes: &'a [RenderMode],
    pub renderer: Option<&'a AcceleratedRenderer>,
}

impl Scene<'_> {
    fn background(&self) -> Result<Rgba> {
        Ok(parse_color(&self.model.background)?.over_white())
    }

    fn marks_in(&self, mode: RenderMode) -> impl Iterator<Item = &Scatter> {
        self.marks
            .iter()
            .zip(self.modes)
            .filter(move |(_, m)| **m == mode)
            .map(|(s, _)| s)
    }
}

/// One-time registration of the "sans-serif" face for the `ab_glyph` text path,
/// which does not discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        if plotters::style::register_font(
            "sans-serif",
            FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        )
        .is_err()
        {
            log::warn!("bundled title font could not be registered");
        }
    });
}

fn render_err<E: std::fmt::Debug>(e: E) -> FigureError {
    FigureError::Render(format!("{e:?}"))
}

fn draw_marker<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    c: (i32, i32),
    s: i32,
    color: RGBAColor,
    shape: MarkerShape,
) -> Result<()> {
    let style = color.filled();
    match shape {
        MarkerShape::Circle => area.draw(&Circle::new(c, s, style)),
        MarkerShape::Square => area.draw(&Rectangle::new(
            [(c.0 - s, c.1 - s), (c.0 + s, c.1 + s)],
            style,
        )),
        MarkerShape::Diamond => area.draw(&Polygon::new(
            vec![(c.0, c.1 - s), (c.0 - s, c.1), (c.0, c.1 + s), (c.0 + s, c.1)],
            style,
        )),
        MarkerShape::Triangle => area.draw(&Polygon::new(
            vec![(c.0, c.1 - s), (c.0 - s, c.1 + s), (c.0 + s, c.1 + s)],
            style,
        )),
    }
    .map_err(render_err)
}

fn draw_title<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    model: &FigureModel,
    canvas_w: u32,
) -> Result<()> {
    let title = model.title.trim();
    if title.is_empty() {
        return Ok(());
    }
    let style = TextStyle::from((FontFamily::SansSerif, model.title_font_size))
        .pos(Pos::new(HPos::Center, VPos::Top));
    let top = model.fig_margin.top.round() as i32;
    area.draw(&Text::new(title, (canvas_w as i32 / 2, top), style))
        .map_err(render_err)
}

fn draw_scatter<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    mark: &Scatter,
    width: f64,
    height: f64,
) -> Result<()> {
    // a marker centred inside the plot covers all of it at this size
    let s = mark.radius().min(width + height).round() as i32;
    if s == 0 {
        return Ok(());
    }
    for (i, px, py) in mark.pixel_points(width, height) {
        let c = (px.round() as i32, py.round() as i32);
        draw_marker(area, c, s, mark.color_at(i).to_plotters(), mark.marker)?;
    }
    Ok(())
}

/// Rasterize the scene into an RGBA bitmap of the canvas size.
pub fn rasterize(scene: &Scene<'_>) -> Result<Bitmap> {
    let canvas_px = scene.canvas.pixel_size();
    let bg = scene.background()?;
    let mut bitmap = if scene.model.title.trim().is_empty() {
        Bitmap::filled(canvas_px.0, canvas_px.1, bg)
    } else {
        ensure_fonts_registered();
        let mut rgb = vec![0u8; canvas_px.0 as usize * canvas_px.1 as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut rgb, canvas_px).into_drawing_area();
            root.fill(&bg.to_plotters()).map_err(render_err)?;
            draw_title(&root, scene.model, canvas_px.0)?;
            root.present().map_err(render_err)?;
        }
        Bitmap::from_rgb(canvas_px.0, canvas_px.1, rgb)?
    };

    let rect = PixelRect::from_geometry(&scene.geometry, canvas_px);
    if rect.is_empty() {
        return Ok(bitmap);
    }

    let mut plot_rgb = vec![0u8; rect.width as usize * rect.height as usize * 3];
    {
        let area = BitMapBackend::with_buffer(&mut plot_rgb, (rect.width, rect.height))
            .into_drawing_area();
        area.fill(&bg.to_plotters()).map_err(render_err)?;
        for mark in scene.marks_in(RenderMode::Vector) {
            draw_scatter(&area, mark, rect.width as f64, rect.height as f64)?;
        }
        area.present().map_err(render_err)?;
    }
    let plot = Bitmap::from_rgb(rect.width, rect.height, plot_rgb)?;
    bitmap.overlay(&plot, rect.x, rect.y);

    if let Some(renderer) = scene.renderer {
        for mark in scene.marks_in(RenderMode::Accelerated) {
            renderer.draw(&mut bitmap, mark, rect);
        }
    }
    Ok(bitmap)
}

/// Render the scene as an SVG document.
pub fn render_svg(scene: &Scene<'_>) -> Result<String> {
    let (w, h) = scene.canvas.pixel_size();
    let bg = scene.background()?;
    let rect = PixelRect::from_geometry(&scene.geometry, (w, h));

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (w, h)).into_drawing_area();
        root.fill(&bg.to_plotters()).map_err(render_err)?;

        draw_title(&root, scene.model, w)?;

        if !rect.is_empty() {
            let plot = root
                .clone()
                .shrink((rect.x, rect.y), (rect.width, rect.height));
            for mark in scene.marks {
                draw_scatter(&plot, mark, rect.width as f64, rect.height as f64)?;
            }
        }
        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_gl_marks_are_accelerated() {
        let spec = ScatterSpec::new(vec![0.0], vec![0.0]).accelerated();
        assert_eq!(choose_mode(&spec, 1000), RenderMode::Accelerated);
    }

    #[test]
    fn threshold_is_inclusive() {
        let spec = ScatterSpec::new(vec![0.0; 10], vec![0.0; 10]);
        assert_eq!(choose_mode(&spec, 11), RenderMode::Vector);
        assert_eq!(choose_mode(&spec, 10), RenderMode::Accelerated);
    }

    #[test]
    fn pixel_rect_rounds_and_clamps() {
        let g = FigureGeometry {
            width: 250.4,
            height: 600.0,
            x: 74.6,
            y: 0.0,
        };
        let r = PixelRect::from_geometry(&g, (400, 500));
        assert_eq!(
            r,
            PixelRect {
                x: 75,
                y: 0,
                width: 250,
                height: 500
            }
        );
    }

    #[test]
    fn accelerated_draw_stays_inside_rect() {
        let mut spec = ScatterSpec::new(vec![0.0], vec![0.0]);
        spec.default_size = 1e6;
        spec.colors = vec!["red".into()];
        let mark = Scatter::from_spec(&spec, 0).unwrap();
        let mut bitmap = Bitmap::filled(20, 20, Rgba::rgb(255, 255, 255));
        let rect = PixelRect {
            x: 5,
            y: 5,
            width: 10,
            height: 10,
        };
        AcceleratedRenderer::new(1).draw(&mut bitmap, &mark, rect);
        assert_eq!(bitmap.pixel(10, 10), Some([255, 0, 0, 255]));
        assert_eq!(bitmap.pixel(4, 10), Some([255, 255, 255, 255]));
        assert_eq!(bitmap.count_color([255, 0, 0, 255]), 100);
    }
}
