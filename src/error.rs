//! Error types for layout computation and rendering.

use thiserror::Error;

use crate::models::Side;

/// Result type alias for figure operations.
pub type Result<T> = std::result::Result<T, FigureError>;

/// Which canvas axis a layout failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Horizontal => write!(f, "horizontal"),
            Axis::Vertical => write!(f, "vertical"),
        }
    }
}

/// Errors that can occur while laying out or rendering a figure.
#[derive(Error, Debug)]
pub enum FigureError {
    /// Aspect band is inconsistent (min > max) or holds a non-positive bound.
    #[error("invalid aspect band: min={min:?} max={max:?}")]
    InvalidAspectBand { min: Option<f64>, max: Option<f64> },

    /// A decorator reported negative (or non-finite) space.
    #[error("decorator #{index} on {side} side reported invalid padding {padding}")]
    NegativePadding {
        side: Side,
        index: usize,
        padding: f64,
    },

    /// Decorators claim the whole canvas (or more) on one axis.
    #[error("decorators over-claim the {axis} axis: reserved {reserved}px of {canvas}px")]
    OverClaimed {
        axis: Axis,
        canvas: f64,
        reserved: f64,
    },

    /// Canvas dimensions are not usable.
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },

    /// Unknown model property name.
    #[error("unknown property: {0}")]
    UnknownProperty(String),

    /// Property value has the wrong shape.
    #[error("invalid value for property `{name}`: {reason}")]
    InvalidProperty { name: String, reason: String },

    /// Mark data or style is inconsistent.
    #[error("invalid mark: {0}")]
    InvalidMark(String),

    /// Drawing backend failure.
    #[error("rendering failed: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl FigureError {
    pub(crate) fn invalid_property(name: &str, reason: impl Into<String>) -> Self {
        FigureError::InvalidProperty {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
