//! Scatter marks: data, scales and style.

use serde::{Deserialize, Serialize};

use crate::error::{FigureError, Result};
use crate::style::{Rgba, palette_color, parse_color};

/// Default marker area in px².
pub const DEFAULT_MARKER_SIZE: f64 = 64.0;

/// Which renderer a mark was declared for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkKind {
    /// Drawn through the vector path unless it is large.
    #[default]
    Scatter,
    /// Always drawn by the accelerated renderer.
    ScatterGl,
}

/// Marker glyph for scatter points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    #[default]
    Circle,
    Square,
    Diamond,
    Triangle,
}

impl MarkerShape {
    /// Whether an offset `(dx, dy)` from the marker centre lies inside a marker of radius `r`.
    pub fn contains(&self, dx: f64, dy: f64, r: f64) -> bool {
        match self {
            MarkerShape::Circle => dx * dx + dy * dy <= r * r,
            MarkerShape::Square => dx.abs() <= r && dy.abs() <= r,
            MarkerShape::Diamond => dx.abs() + dy.abs() <= r,
            // apex up, base at +r
            MarkerShape::Triangle => dy >= -r && dy <= r && dx.abs() <= (dy + r) / 2.0,
        }
    }
}

/// Serializable description of a scatter mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterSpec {
    pub kind: MarkKind,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub colors: Vec<String>,
    pub default_size: f64,
    pub opacity: f64,
    pub marker: MarkerShape,
}

impl Default for ScatterSpec {
    fn default() -> Self {
        Self {
            kind: MarkKind::Scatter,
            x: Vec::new(),
            y: Vec::new(),
            colors: Vec::new(),
            default_size: DEFAULT_MARKER_SIZE,
            opacity: 1.0,
            marker: MarkerShape::Circle,
        }
    }
}

impl ScatterSpec {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    pub fn accelerated(mut self) -> Self {
        self.kind = MarkKind::ScatterGl;
        self
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Maps a data interval linearly onto a pixel interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub lo: f64,
    pub hi: f64,
}

impl LinearScale {
    /// Domain covering the finite values; a single value `v` gets `v-1..v+1`.
    pub fn fit(values: &[f64]) -> Self {
        let (lo, hi) = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if !lo.is_finite() {
            return Self { lo: 0.0, hi: 1.0 };
        }
        if (hi - lo).abs() < f64::EPSILON {
            return Self {
                lo: lo - 1.0,
                hi: hi + 1.0,
            };
        }
        Self { lo, hi }
    }

    pub fn map(&self, v: f64, start: f64, end: f64) -> f64 {
        start + (v - self.lo) / (self.hi - self.lo) * (end - start)
    }
}

/// Style properties that can change after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkStyle {
    pub colors: Vec<Rgba>,
    pub default_size: f64,
    pub opacity: f64,
}

/// A validated change to a mark's style.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleUpdate {
    Colors(Vec<Rgba>),
    DefaultSize(f64),
    Opacity(f64),
}

impl StyleUpdate {
    pub fn colors<S: AsRef<str>>(colors: &[S]) -> Result<Self> {
        let parsed = colors
            .iter()
            .map(|c| parse_color(c.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(StyleUpdate::Colors(parsed))
    }

    pub fn default_size(size: f64) -> Result<Self> {
        check_size(size)?;
        Ok(StyleUpdate::DefaultSize(size))
    }

    pub fn opacity(opacity: f64) -> Result<Self> {
        check_opacity(opacity)?;
        Ok(StyleUpdate::Opacity(opacity))
    }
}

fn check_size(size: f64) -> Result<()> {
    if !size.is_finite() || size < 0.0 {
        return Err(FigureError::InvalidMark(format!(
            "default_size must be a non-negative number, got {size}"
        )));
    }
    Ok(())
}

fn check_opacity(opacity: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&opacity) {
        return Err(FigureError::InvalidMark(format!(
            "opacity must lie in 0..=1, got {opacity}"
        )));
    }
    Ok(())
}

/// A scatter mark ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Scatter {
    pub kind: MarkKind,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub marker: MarkerShape,
    pub style: MarkStyle,
    x_scale: LinearScale,
    y_scale: LinearScale,
}

impl Scatter {
    /// Validate a spec. Marks without colors take palette entry `index`.
    pub fn from_spec(spec: &ScatterSpec, index: usize) -> Result<Self> {
        if spec.x.len() != spec.y.len() {
            return Err(FigureError::InvalidMark(format!(
                "x has {} values but y has {}",
                spec.x.len(),
                spec.y.len()
            )));
        }
        check_size(spec.default_size)?;
        check_opacity(spec.opacity)?;
        let colors = match StyleUpdate::colors(spec.colors.as_slice())? {
            StyleUpdate::Colors(c) if !c.is_empty() => c,
            _ => vec![palette_color(index)],
        };
        Ok(Self {
            kind: spec.kind,
            x: spec.x.clone(),
            y: spec.y.clone(),
            marker: spec.marker,
            style: MarkStyle {
                colors,
                default_size: spec.default_size,
                opacity: spec.opacity,
            },
            x_scale: LinearScale::fit(&spec.x),
            y_scale: LinearScale::fit(&spec.y),
        })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn apply(&mut self, update: StyleUpdate) {
        match update {
            StyleUpdate::Colors(c) if !c.is_empty() => self.style.colors = c,
            StyleUpdate::Colors(_) => {}
            StyleUpdate::DefaultSize(s) => self.style.default_size = s,
            StyleUpdate::Opacity(o) => self.style.opacity = o,
        }
    }

    /// Marker radius in pixels; `default_size` is the marker's area.
    pub fn radius(&self) -> f64 {
        (self.style.default_size / std::f64::consts::PI).sqrt()
    }

    pub fn color_at(&self, i: usize) -> Rgba {
        let c = self.style.colors[i % self.style.colors.len()];
        c.with_opacity(self.style.opacity)
    }

    /// Pixel positions of the finite points inside a `width` × `height` plot,
    /// relative to its top-left corner. Y grows upward in data space.
    pub fn pixel_points(&self, width: f64, height: f64) -> Vec<(usize, f64, f64)> {
        self.x
            .iter()
            .zip(&self.y)
            .enumerate()
            .filter(|(_, (x, y))| x.is_finite() && y.is_finite())
            .map(|(i, (x, y))| {
                (
                    i,
                    self.x_scale.map(*x, 0.0, width),
                    self.y_scale.map(*y, height, 0.0),
                )
            })
            .collect()
    }
}
