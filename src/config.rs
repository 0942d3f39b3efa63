//! JSON figure configuration.
//!
//! ```json
//! {
//!   "width": 400, "height": 500,
//!   "title": "Scatter", "min_aspect_ratio": 0.5,
//!   "decorators": [{"side": "bottom", "padding": 11}],
//!   "axes": [{"side": "left", "label": "value"}],
//!   "legend": {"side": "bottom", "labels": ["a", "b"]},
//!   "marks": [{"x": [0.5, 0.5], "y": [2.0, 2.5], "colors": ["red"]}]
//! }
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{FigureError, Result};
use crate::figure::Figure;
use crate::layout::{AxisDecorator, FixedPadding, LegendDecorator};
use crate::models::{Canvas, FigureModel, Side};
use crate::render::DEFAULT_ACCELERATION_THRESHOLD;
use crate::render::marks::{LinearScale, ScatterSpec};

/// A fixed padding registered on one side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoratorConfig {
    pub side: Side,
    pub padding: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendConfig {
    #[serde(default = "default_legend_side")]
    pub side: Side,
    pub labels: Vec<String>,
    #[serde(default)]
    pub title: Option<String>,
}

fn default_legend_side() -> Side {
    Side::Bottom
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub side: Side,
    /// Data range of the tick labels; taken from the marks when omitted.
    #[serde(default)]
    pub domain: Option<(f64, f64)>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub ticks: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub width: f64,
    pub height: f64,
    #[serde(flatten)]
    pub model: FigureModel,
    pub decorators: Vec<DecoratorConfig>,
    pub axes: Vec<AxisConfig>,
    pub legend: Option<LegendConfig>,
    pub marks: Vec<ScatterSpec>,
    pub acceleration_threshold: usize,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            model: FigureModel::default(),
            decorators: Vec::new(),
            axes: Vec::new(),
            legend: None,
            marks: Vec::new(),
            acceleration_threshold: DEFAULT_ACCELERATION_THRESHOLD,
        }
    }
}

impl FigureConfig {
    /// Load a configuration from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading figure config {}", path.display()))?;
        let cfg = serde_json::from_str(&text)
            .with_context(|| format!("parsing figure config {}", path.display()))?;
        Ok(cfg)
    }

    fn data_domain(&self, side: Side) -> (f64, f64) {
        let values: Vec<f64> = self
            .marks
            .iter()
            .flat_map(|m| match side {
                Side::Left | Side::Right => m.y.iter(),
                Side::Top | Side::Bottom => m.x.iter(),
            })
            .copied()
            .collect();
        let s = LinearScale::fit(&values);
        (s.lo, s.hi)
    }

    /// Build a figure: fixed decorators first, then axes, then the legend.
    pub fn build(&self) -> Result<Figure> {
        let canvas = Canvas::new(self.width, self.height)?;
        let mut figure = Figure::with_model(canvas, self.model.clone());
        figure.set_acceleration_threshold(self.acceleration_threshold);

        for d in &self.decorators {
            figure.decorators_mut().push(d.side, FixedPadding(d.padding));
        }
        for a in &self.axes {
            let domain = a.domain.unwrap_or_else(|| self.data_domain(a.side));
            let mut axis = AxisDecorator::new(a.side, domain);
            if let Some(label) = &a.label {
                axis = axis.with_label(label.clone());
            }
            if let Some(ticks) = a.ticks {
                axis.ticks = ticks;
            }
            figure.decorators_mut().push(a.side, axis);
        }
        if let Some(l) = &self.legend {
            if !matches!(l.side, Side::Top | Side::Bottom) {
                return Err(FigureError::invalid_property(
                    "legend",
                    format!("legend bands go on top or bottom, not {}", l.side),
                ));
            }
            let mut legend = LegendDecorator::new(l.labels.clone(), self.width);
            if let Some(t) = &l.title {
                legend = legend.with_title(t.clone());
            }
            figure.decorators_mut().push(l.side, legend);
        }
        for spec in &self.marks {
            figure.add_mark(spec)?;
        }
        Ok(figure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattened_model_fields_parse() {
        let cfg: FigureConfig = serde_json::from_str(
            r#"{"width": 400, "height": 500, "title": "T", "max_aspect_ratio": 0.5,
                "decorators": [{"side": "bottom", "padding": 11}]}"#,
        )
        .unwrap();
        assert_eq!(cfg.model.title, "T");
        assert_eq!(cfg.model.max_aspect_ratio, Some(0.5));
        assert_eq!(cfg.model.title_font_size, 16.0);
        assert_eq!(cfg.decorators[0].side, Side::Bottom);
        assert_eq!(cfg.acceleration_threshold, DEFAULT_ACCELERATION_THRESHOLD);
    }

    #[test]
    fn build_registers_decorators_and_marks() {
        let cfg: FigureConfig = serde_json::from_str(
            r#"{"width": 400, "height": 500,
                "decorators": [{"side": "bottom", "padding": 11}],
                "axes": [{"side": "left", "domain": [0, 1]}],
                "marks": [{"x": [1, 2], "y": [3, 4]}, {"kind": "scatter_gl", "x": [1], "y": [1]}]}"#,
        )
        .unwrap();
        let fig = cfg.build().unwrap();
        let g = fig.figure_size().unwrap();
        assert_eq!(g.height, 489.0);
        assert_eq!(g.x, 48.0);
        assert_eq!(fig.marks().len(), 2);
        assert!(fig.renderer().is_some());
    }

    #[test]
    fn legend_on_the_left_is_rejected() {
        let cfg = FigureConfig {
            legend: Some(LegendConfig {
                side: Side::Left,
                labels: vec!["a".into()],
                title: None,
            }),
            ..Default::default()
        };
        assert!(cfg.build().is_err());
    }

    #[test]
    fn axis_domain_defaults_to_mark_data() {
        let cfg = FigureConfig {
            marks: vec![ScatterSpec::new(vec![0.0, 10.0], vec![-5.0, 5.0])],
            ..Default::default()
        };
        assert_eq!(cfg.data_domain(Side::Bottom), (0.0, 10.0));
        assert_eq!(cfg.data_domain(Side::Left), (-5.0, 5.0));
    }
}
