//! A figure: canvas, model properties, decorators and marks.
//!
//! `Figure` owns its state but derives nothing from it ahead of time. The
//! geometry is solved again on every [`Figure::figure_size`] call, so a
//! property change or a decorator push is visible on the next read.

use serde_json::Value;

use crate::error::{FigureError, Result};
use crate::layout::{self, Decorators, HeuristicTextMeasurer, Layout, Padding, TextMeasurer};
use crate::models::{Canvas, FigureGeometry, FigureModel};
use crate::render::{
    self, AcceleratedRenderer, AnimationQueue, Bitmap, DEFAULT_ACCELERATION_THRESHOLD, MarkId,
    RenderMode, Scatter, ScatterSpec, Scene, StyleUpdate,
};

pub struct Figure {
    canvas: Canvas,
    model: FigureModel,
    decorators: Decorators,
    measurer: Box<dyn TextMeasurer>,
    marks: Vec<Scatter>,
    modes: Vec<RenderMode>,
    renderer: Option<AcceleratedRenderer>,
    animations: AnimationQueue,
    acceleration_threshold: usize,
}

impl std::fmt::Debug for Figure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Figure")
            .field("canvas", &self.canvas)
            .field("model", &self.model)
            .field("decorators", &self.decorators)
            .field("marks", &self.marks.len())
            .field("renderer", &self.renderer)
            .field("pending", &self.animations.len())
            .finish()
    }
}

impl Figure {
    pub fn new(canvas: Canvas) -> Self {
        Self::with_model(canvas, FigureModel::default())
    }

    pub fn with_model(canvas: Canvas, model: FigureModel) -> Self {
        Self {
            canvas,
            model,
            decorators: Decorators::new(),
            measurer: Box::new(HeuristicTextMeasurer),
            marks: Vec::new(),
            modes: Vec::new(),
            renderer: None,
            animations: AnimationQueue::new(),
            acceleration_threshold: DEFAULT_ACCELERATION_THRESHOLD,
        }
    }

    /// Replace the title measurer (e.g. with real glyph metrics).
    pub fn with_measurer<M: TextMeasurer + 'static>(mut self, measurer: M) -> Self {
        self.measurer = Box::new(measurer);
        self
    }

    /// Point count from which new scatter marks use the accelerated renderer.
    /// Marks already added keep their renderer.
    pub fn set_acceleration_threshold(&mut self, threshold: usize) {
        self.acceleration_threshold = threshold;
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn width(&self) -> f64 {
        self.canvas.width
    }

    pub fn height(&self) -> f64 {
        self.canvas.height
    }

    pub fn model(&self) -> &FigureModel {
        &self.model
    }

    /// Set a named model property.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.model.set(name, value.into())
    }

    pub fn get(&self, name: &str) -> Result<Value> {
        self.model.get(name)
    }

    pub fn decorators(&self) -> &Decorators {
        &self.decorators
    }

    pub fn decorators_mut(&mut self) -> &mut Decorators {
        &mut self.decorators
    }

    /// Bounding-box height the current title occupies.
    pub fn title_height(&self) -> f64 {
        layout::Title {
            text: &self.model.title,
            font_px: self.model.title_font_size,
            measurer: self.measurer.as_ref(),
        }
        .padding()
    }

    pub fn layout(&self) -> Result<Layout> {
        layout::solve(
            &self.canvas,
            &self.model,
            self.measurer.as_ref(),
            &self.decorators,
        )
    }

    /// Plotting rectangle for the current properties.
    pub fn figure_size(&self) -> Result<FigureGeometry> {
        self.layout().map(|l| l.geometry)
    }

    /// Add a scatter mark. Whether it is drawn by the accelerated renderer is
    /// decided here, once; the renderer is created by the first mark needing it.
    pub fn add_mark(&mut self, spec: &ScatterSpec) -> Result<MarkId> {
        let mark = Scatter::from_spec(spec, self.marks.len())?;
        let mode = render::choose_mode(spec, self.acceleration_threshold);
        if mode == RenderMode::Accelerated {
            let threshold = self.acceleration_threshold;
            self.renderer
                .get_or_insert_with(|| AcceleratedRenderer::new(threshold))
                .bind();
        }
        let id = MarkId(self.marks.len());
        log::debug!("mark {} added ({} points, {:?})", id.0, mark.len(), mode);
        self.marks.push(mark);
        self.modes.push(mode);
        Ok(id)
    }

    /// The accelerated renderer, if any mark needed one.
    pub fn renderer(&self) -> Option<&AcceleratedRenderer> {
        self.renderer.as_ref()
    }

    pub fn mark(&self, id: MarkId) -> Option<&Scatter> {
        self.marks.get(id.0)
    }

    pub fn render_mode(&self, id: MarkId) -> Option<RenderMode> {
        self.modes.get(id.0).copied()
    }

    pub fn marks(&self) -> &[Scatter] {
        &self.marks
    }

    /// Queue a style change; it shows after [`Figure::flush_animations`].
    pub fn update_mark(&mut self, id: MarkId, update: StyleUpdate) -> Result<()> {
        if id.0 >= self.marks.len() {
            return Err(FigureError::InvalidMark(format!("no mark with id {}", id.0)));
        }
        self.animations.schedule(id, update);
        Ok(())
    }

    pub fn set_mark_colors<S: AsRef<str>>(&mut self, id: MarkId, colors: &[S]) -> Result<()> {
        self.update_mark(id, StyleUpdate::colors(colors)?)
    }

    pub fn set_mark_size(&mut self, id: MarkId, default_size: f64) -> Result<()> {
        self.update_mark(id, StyleUpdate::default_size(default_size)?)
    }

    pub fn set_mark_opacity(&mut self, id: MarkId, opacity: f64) -> Result<()> {
        self.update_mark(id, StyleUpdate::opacity(opacity)?)
    }

    /// Apply every pending visual update. Returns how many were applied.
    pub fn flush_animations(&mut self) -> usize {
        self.animations.flush(&mut self.marks)
    }

    pub fn is_settled(&self) -> bool {
        self.animations.is_settled()
    }

    fn scene(&self) -> Result<Scene<'_>> {
        Ok(Scene {
            canvas: &self.canvas,
            model: &self.model,
            geometry: self.figure_size()?,
            marks: &self.marks,
            modes: &self.modes,
            renderer: self.renderer.as_ref(),
        })
    }

    /// Pixels of the current drawing. Pending updates are not applied; call
    /// [`Figure::flush_animations`] first.
    pub fn rasterize(&self) -> Result<Bitmap> {
        if !self.is_settled() {
            log::debug!(
                "rasterizing with {} unflushed update(s)",
                self.animations.len()
            );
        }
        render::rasterize(&self.scene()?)
    }

    pub fn render_svg(&self) -> Result<String> {
        render::render_svg(&self.scene()?)
    }
}
