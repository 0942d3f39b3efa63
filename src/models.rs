use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FigureError, Result};

/// Default title font size in pixels.
pub const DEFAULT_TITLE_FONT_PX: f64 = 16.0;

/// Side of the figure a decorator is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outer drawing surface, fixed by the host at mount time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(FigureError::InvalidCanvas { width, height });
        }
        Ok(Self { width, height })
    }

    /// Pixel dimensions for raster backends (rounded to the nearest pixel).
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width.round() as u32, self.height.round() as u32)
    }
}

/// Target aspect-ratio band; `None` leaves that side unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AspectBand {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl AspectBand {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Reject bounds that are not finite positive numbers and bands with `min > max`.
    pub fn validate(&self) -> Result<()> {
        let bad = |v: Option<f64>| v.is_some_and(|v| !v.is_finite() || v <= 0.0);
        if bad(self.min) || bad(self.max) {
            return Err(FigureError::InvalidAspectBand {
                min: self.min,
                max: self.max,
            });
        }
        if let (Some(min), Some(max)) = (self.min, self.max)
            && min > max
        {
            return Err(FigureError::InvalidAspectBand {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Fixed per-side figure margin in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Margin {
    pub fn uniform(px: f64) -> Self {
        Self {
            top: px,
            bottom: px,
            left: px,
            right: px,
        }
    }

    pub fn get(&self, side: Side) -> f64 {
        match side {
            Side::Top => self.top,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Resolved plotting rectangle inside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureGeometry {
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
}

impl FigureGeometry {
    /// True when the rectangle lies inside a canvas of the given size.
    pub fn fits_within(&self, canvas: &Canvas) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.width <= canvas.width
            && self.y + self.height <= canvas.height
    }
}

/// Snapshot of the figure properties that drive layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureModel {
    pub title: String,
    pub min_aspect_ratio: Option<f64>,
    pub max_aspect_ratio: Option<f64>,
    pub title_font_size: f64,
    pub fig_margin: Margin,
    pub background: String,
}

impl Default for FigureModel {
    fn default() -> Self {
        Self {
            title: String::new(),
            min_aspect_ratio: None,
            max_aspect_ratio: None,
            title_font_size: DEFAULT_TITLE_FONT_PX,
            fig_margin: Margin::default(),
            background: "white".to_string(),
        }
    }
}

impl FigureModel {
    pub fn aspect_band(&self) -> AspectBand {
        AspectBand::new(self.min_aspect_ratio, self.max_aspect_ratio)
    }

    /// Read a named property.
    pub fn get(&self, name: &str) -> Result<Value> {
        let v = match name {
            "title" => Value::from(self.title.clone()),
            "min_aspect_ratio" => Value::from(self.min_aspect_ratio),
            "max_aspect_ratio" => Value::from(self.max_aspect_ratio),
            "title_font_size" => Value::from(self.title_font_size),
            "fig_margin" => serde_json::to_value(self.fig_margin)?,
            "background" => Value::from(self.background.clone()),
            other => return Err(FigureError::UnknownProperty(other.to_string())),
        };
        Ok(v)
    }

    /// Write a named property. `null` unsets an aspect bound.
    ///
    /// Aspect bounds are not cross-checked here; a band is validated when a
    /// layout is computed, so a sequence of sets may pass through `min > max`.
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        match name {
            "title" => {
                self.title = value
                    .as_str()
                    .ok_or_else(|| FigureError::invalid_property(name, "expected a string"))?
                    .to_string();
            }
            "min_aspect_ratio" => self.min_aspect_ratio = optional_number(name, &value)?,
            "max_aspect_ratio" => self.max_aspect_ratio = optional_number(name, &value)?,
            "title_font_size" => {
                let px = value
                    .as_f64()
                    .ok_or_else(|| FigureError::invalid_property(name, "expected a number"))?;
                if !px.is_finite() || px < 0.0 {
                    return Err(FigureError::invalid_property(
                        name,
                        "font size must be a non-negative number",
                    ));
                }
                self.title_font_size = px;
            }
            "fig_margin" => {
                self.fig_margin = serde_json::from_value(value)
                    .map_err(|e| FigureError::invalid_property(name, e.to_string()))?;
            }
            "background" => {
                let s = value
                    .as_str()
                    .ok_or_else(|| FigureError::invalid_property(name, "expected a color string"))?;
                crate::style::parse_color(s)?;
                self.background = s.to_string();
            }
            other => return Err(FigureError::UnknownProperty(other.to_string())),
        }
        Ok(())
    }
}

fn optional_number(name: &str, value: &Value) -> Result<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| FigureError::invalid_property(name, "number out of range")),
        _ => Err(FigureError::invalid_property(name, "expected a number or null")),
    }
}
