//! Figure layout: where the plotting rectangle goes inside the canvas.
//!
//! Layout is a pure function of the canvas, a snapshot of the figure model and
//! the registered decorators. Nothing is cached; callers recompute after any
//! change to the title, the aspect band or the decorator lists.
//!
//! 1. Every side's reserved space is accumulated (margin, title, decorators).
//! 2. The rest of the canvas is the available rectangle.
//! 3. The available rectangle is fitted to the aspect band.
//! 4. The fitted size is kept; its offset is shifted by the available origin.

pub mod aspect;
pub mod decorators;
pub mod guides;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Canvas, FigureGeometry, FigureModel};

pub use aspect::{Fit, fit};
pub use decorators::{Decorators, FixedPadding, Padding, ReservedSpace, Title, accumulate};
pub use guides::{AxisDecorator, LegendDecorator};
pub use text::{HeuristicTextMeasurer, TextMeasurer};

/// Geometry plus the intermediate values it was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub reserved: ReservedSpace,
    pub available: (f64, f64),
    pub geometry: FigureGeometry,
}

/// Solve the layout for one model snapshot.
pub fn solve(
    canvas: &Canvas,
    model: &FigureModel,
    measurer: &dyn TextMeasurer,
    decorators: &Decorators,
) -> Result<Layout> {
    let band = model.aspect_band();
    band.validate()?;

    let reserved = accumulate(model, measurer, decorators)?;
    let (avail_w, avail_h) = reserved.available(canvas)?;
    let (origin_x, origin_y) = reserved.origin();

    let f = fit(avail_w, avail_h, &band);
    let geometry = FigureGeometry {
        width: f.width,
        height: f.height,
        x: origin_x + f.offset_x,
        y: origin_y + f.offset_y,
    };
    log::debug!(
        "layout {}x{} band={:?} -> {:?}",
        canvas.width,
        canvas.height,
        band,
        geometry
    );
    Ok(Layout {
        reserved,
        available: (avail_w, avail_h),
        geometry,
    })
}

/// Plotting rectangle for one model snapshot.
pub fn compute_layout(
    canvas: &Canvas,
    model: &FigureModel,
    measurer: &dyn TextMeasurer,
    decorators: &Decorators,
) -> Result<FigureGeometry> {
    solve(canvas, model, measurer, decorators).map(|l| l.geometry)
}

/// Flat record of a solved layout, as written by [`crate::storage`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutReport {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub title: String,
    pub min_aspect_ratio: Option<f64>,
    pub max_aspect_ratio: Option<f64>,
    pub reserved_top: f64,
    pub reserved_bottom: f64,
    pub reserved_left: f64,
    pub reserved_right: f64,
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
}

impl LayoutReport {
    pub fn new(canvas: &Canvas, model: &FigureModel, layout: &Layout) -> Self {
        Self {
            canvas_width: canvas.width,
            canvas_height: canvas.height,
            title: model.title.clone(),
            min_aspect_ratio: model.min_aspect_ratio,
            max_aspect_ratio: model.max_aspect_ratio,
            reserved_top: layout.reserved.top,
            reserved_bottom: layout.reserved.bottom,
            reserved_left: layout.reserved.left,
            reserved_right: layout.reserved.right,
            width: layout.geometry.width,
            height: layout.geometry.height,
            x: layout.geometry.x,
            y: layout.geometry.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FigureError;
    use crate::models::Side;

    fn canvas() -> Canvas {
        Canvas::new(400.0, 500.0).unwrap()
    }

    #[test]
    fn unconstrained_band_uses_whole_available_rect() {
        let mut d = Decorators::new();
        d.push(Side::Left, FixedPadding(20.0));
        d.push(Side::Top, FixedPadding(5.0));
        let g = compute_layout(
            &canvas(),
            &FigureModel::default(),
            &HeuristicTextMeasurer,
            &d,
        )
        .unwrap();
        assert_eq!(
            g,
            FigureGeometry {
                width: 380.0,
                height: 495.0,
                x: 20.0,
                y: 5.0
            }
        );
    }

    #[test]
    fn offsets_combine_origin_and_fit() {
        let mut d = Decorators::new();
        d.push(Side::Left, FixedPadding(50.0));
        let model = FigureModel {
            max_aspect_ratio: Some(0.5),
            ..Default::default()
        };
        let l = solve(&canvas(), &model, &HeuristicTextMeasurer, &d).unwrap();
        assert_eq!(l.available, (350.0, 500.0));
        // 250 wide plot centred in 350: 50 + 50
        assert_eq!(l.geometry.x, 100.0);
        assert_eq!(l.geometry.width, 250.0);
    }

    #[test]
    fn inverted_band_is_rejected() {
        let model = FigureModel {
            min_aspect_ratio: Some(2.0),
            max_aspect_ratio: Some(1.0),
            ..Default::default()
        };
        let err = compute_layout(&canvas(), &model, &HeuristicTextMeasurer, &Decorators::new());
        assert!(matches!(err, Err(FigureError::InvalidAspectBand { .. })));
    }

    #[test]
    fn over_claiming_decorators_fail() {
        let mut d = Decorators::new();
        d.push(Side::Left, FixedPadding(200.0));
        d.push(Side::Right, FixedPadding(200.0));
        let err = compute_layout(&canvas(), &FigureModel::default(), &HeuristicTextMeasurer, &d);
        assert!(matches!(err, Err(FigureError::OverClaimed { .. })));
    }

    #[test]
    fn report_mirrors_layout() {
        let model = FigureModel {
            title: "T".into(),
            ..Default::default()
        };
        let l = solve(&canvas(), &model, &HeuristicTextMeasurer, &Decorators::new()).unwrap();
        let r = LayoutReport::new(&canvas(), &model, &l);
        assert_eq!(r.reserved_top, 20.0);
        assert_eq!(r.y, 20.0);
        assert_eq!(r.height, 480.0);
    }
}
