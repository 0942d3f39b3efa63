//! figlayout
//!
//! Layout and rendering core for chart figures: decides where the plotting
//! rectangle goes inside a fixed canvas and draws scatter marks into it.
//!
//! ### Features
//! - Aspect-ratio band (`min_aspect_ratio` / `max_aspect_ratio`) honoured by
//!   shrinking and centring the plot area
//! - Title, legends, axes and ad-hoc paddings reserve space per side before the
//!   aspect constraint is applied
//! - Scatter marks drawn through plotters, with an accelerated path for large marks
//! - Rasterization to RGBA bitmaps (PNG export) and SVG output
//!
//! ### Example
//! ```no_run
//! use figlayout::{Canvas, Figure, FixedPadding, ScatterSpec, Side};
//!
//! let mut figure = Figure::new(Canvas::new(400.0, 500.0)?);
//! figure.set("max_aspect_ratio", 0.5)?;
//! figure.set("title", "Measurements")?;
//! figure.decorators_mut().push(Side::Bottom, FixedPadding(11.0));
//! let geometry = figure.figure_size()?;
//! println!("{geometry:?}");
//!
//! let mark = figure.add_mark(&ScatterSpec::new(vec![0.5, 0.5], vec![2.0, 2.5]))?;
//! figure.set_mark_colors(mark, &["red"])?;
//! figure.flush_animations();
//! figure.rasterize()?.save_png("figure.png")?;
//! # Ok::<(), figlayout::FigureError>(())
//! ```

pub mod config;
pub mod error;
pub mod figure;
pub mod layout;
pub mod models;
pub mod render;
pub mod storage;
pub mod style;

pub use config::FigureConfig;
pub use error::{FigureError, Result};
pub use figure::Figure;
pub use layout::{
    AxisDecorator, Decorators, FixedPadding, LayoutReport, LegendDecorator, Padding,
    TextMeasurer, compute_layout,
};
pub use models::{AspectBand, Canvas, FigureGeometry, FigureModel, Margin, Side};
pub use render::{Bitmap, MarkId, RenderMode, ScatterSpec};
