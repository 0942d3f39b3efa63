//! Decorator registry and the per-side space accumulator.
//!
//! A decorator is anything that reserves pixels along one side of the figure
//! before the plotting area is sized: the title, legends, axis label blocks,
//! or ad-hoc paddings. Each side holds an ordered list; paddings on the same
//! side add up.

use crate::error::{Axis, FigureError, Result};
use crate::models::{Canvas, FigureModel, Side};

use super::text::TextMeasurer;

/// Capability shared by everything that reserves space along a side.
pub trait Padding {
    /// Pixels this decorator claims. Must be finite and non-negative.
    fn padding(&self) -> f64;
}

impl<F> Padding for F
where
    F: Fn() -> f64,
{
    fn padding(&self) -> f64 {
        self()
    }
}

/// A decorator that always reserves the same amount of space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPadding(pub f64);

impl Padding for FixedPadding {
    fn padding(&self) -> f64 {
        self.0
    }
}

/// The figure title, an implicit top decorator.
///
/// Reserves the height of the rendered title's bounding box, or nothing when
/// the title is blank.
pub struct Title<'a> {
    pub text: &'a str,
    pub font_px: f64,
    pub measurer: &'a dyn TextMeasurer,
}

impl Padding for Title<'_> {
    fn padding(&self) -> f64 {
        if self.text.trim().is_empty() {
            return 0.0;
        }
        self.measurer.measure(self.text, self.font_px).1
    }
}

/// Ordered decorator lists, one per side.
#[derive(Default)]
pub struct Decorators {
    top: Vec<Box<dyn Padding>>,
    bottom: Vec<Box<dyn Padding>>,
    left: Vec<Box<dyn Padding>>,
    right: Vec<Box<dyn Padding>>,
}

impl std::fmt::Debug for Decorators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decorators")
            .field("top", &self.top.len())
            .field("bottom", &self.bottom.len())
            .field("left", &self.left.len())
            .field("right", &self.right.len())
            .finish()
    }
}

impl Decorators {
    pub fn new() -> Self {
        Self::default()
    }

    fn side(&self, side: Side) -> &Vec<Box<dyn Padding>> {
        match side {
            Side::Top => &self.top,
            Side::Bottom => &self.bottom,
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut Vec<Box<dyn Padding>> {
        match side {
            Side::Top => &mut self.top,
            Side::Bottom => &mut self.bottom,
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Register a decorator at the end of `side`'s list.
    pub fn push<P>(&mut self, side: Side, decorator: P)
    where
        P: Padding + 'static,
    {
        self.side_mut(side).push(Box::new(decorator));
    }

    pub fn pop(&mut self, side: Side) -> Option<Box<dyn Padding>> {
        self.side_mut(side).pop()
    }

    pub fn remove(&mut self, side: Side, index: usize) -> Option<Box<dyn Padding>> {
        let list = self.side_mut(side);
        (index < list.len()).then(|| list.remove(index))
    }

    pub fn clear(&mut self, side: Side) {
        self.side_mut(side).clear();
    }

    pub fn len(&self, side: Side) -> usize {
        self.side(side).len()
    }

    pub fn is_empty(&self) -> bool {
        Side::ALL.iter().all(|s| self.side(*s).is_empty())
    }

    pub fn iter(&self, side: Side) -> impl Iterator<Item = &dyn Padding> {
        self.side(side).iter().map(|d| d.as_ref())
    }

    /// Sum of paddings registered on `side`, in registration order.
    ///
    /// A negative or non-finite padding is reported, not clamped.
    pub fn reserved_space(&self, side: Side) -> Result<f64> {
        let mut total = 0.0;
        for (index, d) in self.iter(side).enumerate() {
            let padding = d.padding();
            if !padding.is_finite() || padding < 0.0 {
                return Err(FigureError::NegativePadding {
                    side,
                    index,
                    padding,
                });
            }
            total += padding;
        }
        Ok(total)
    }
}

/// Space claimed on each side of the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReservedSpace {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl ReservedSpace {
    /// Top-left corner of the rectangle left over for the plot.
    pub fn origin(&self) -> (f64, f64) {
        (self.left, self.top)
    }

    /// Width and height left over for the plot; fails when either is not positive.
    pub fn available(&self, canvas: &Canvas) -> Result<(f64, f64)> {
        let width = canvas.width - self.left - self.right;
        let height = canvas.height - self.top - self.bottom;
        if width <= 0.0 {
            return Err(FigureError::OverClaimed {
                axis: Axis::Horizontal,
                canvas: canvas.width,
                reserved: self.left + self.right,
            });
        }
        if height <= 0.0 {
            return Err(FigureError::OverClaimed {
                axis: Axis::Vertical,
                canvas: canvas.height,
                reserved: self.top + self.bottom,
            });
        }
        Ok((width, height))
    }
}

/// Accumulate reserved space for every side: figure margin, then the title
/// (top only), then registered decorators.
pub fn accumulate(
    model: &FigureModel,
    measurer: &dyn TextMeasurer,
    decorators: &Decorators,
) -> Result<ReservedSpace> {
    let title = Title {
        text: &model.title,
        font_px: model.title_font_size,
        measurer,
    };
    let title_px = title.padding();
    if !title_px.is_finite() || title_px < 0.0 {
        return Err(FigureError::invalid_property(
            "title",
            format!("measured title height {title_px} is not usable"),
        ));
    }

    let mut reserved = ReservedSpace::default();
    for side in Side::ALL {
        let margin = model.fig_margin.get(side);
        if !margin.is_finite() || margin < 0.0 {
            return Err(FigureError::invalid_property(
                "fig_margin",
                format!("{side} margin {margin} must be non-negative"),
            ));
        }
        let mut px = margin;
        if side == Side::Top {
            px += title_px;
        }
        px += decorators.reserved_space(side)?;
        match side {
            Side::Top => reserved.top = px,
            Side::Bottom => reserved.bottom = px,
            Side::Left => reserved.left = px,
            Side::Right => reserved.right = px,
        }
    }
    log::debug!("reserved space: {reserved:?}");
    Ok(reserved)
}
