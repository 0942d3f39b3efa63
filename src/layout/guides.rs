//! Legend and axis decorators.
//!
//! Both estimate how much space they need from their labels without drawing
//! anything, so they can take part in layout before the plot is sized.

use super::decorators::Padding;
use super::text::{LINE_HEIGHT_EM, estimate_text_width_px, wrap_text_to_width};
use crate::models::Side;

// Legend band metrics.
const LEGEND_FONT_PX: u32 = 14;
const LEGEND_TITLE_FONT_PX: u32 = 16;
const ROW_GAP: i32 = 4;
const PAD_SMALL: i32 = 6;
const PAD_BAND: i32 = 8;
const MARKER_RADIUS: i32 = 4;
const MARKER_TO_TEXT_GAP: i32 = 12;
const TRAILING_GAP: i32 = 12;
const MIN_SLOT: i32 = 60;

/// Horizontal legend band laid out as a table: entries flow into rows,
/// columns align across rows, long labels wrap.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendDecorator {
    pub labels: Vec<String>,
    /// Width of the band (normally the canvas width).
    pub band_width: f64,
    /// Where the first column starts, measured from the band's left edge.
    pub start_x: f64,
    pub title: Option<String>,
    pub font_px: u32,
}

impl LegendDecorator {
    pub fn new(labels: Vec<String>, band_width: f64) -> Self {
        Self {
            labels,
            band_width,
            start_x: 0.0,
            title: None,
            font_px: LEGEND_FONT_PX,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_start_x(mut self, start_x: f64) -> Self {
        self.start_x = start_x;
        self
    }

    fn block_width(&self, label: &str, cap_px: i32) -> i32 {
        let cap = cap_px.max(40) as u32;
        let widest = wrap_text_to_width(label, self.font_px, cap)
            .iter()
            .map(|s| estimate_text_width_px(s, self.font_px) as i32)
            .max()
            .unwrap_or(0);
        MARKER_TO_TEXT_GAP + MARKER_RADIUS + widest + TRAILING_GAP
    }

    /// Greedy row packing; returns label indices per row.
    fn pack_rows(&self, usable_w: i32, start_x: i32) -> Vec<Vec<usize>> {
        let chrome = MARKER_TO_TEXT_GAP + MARKER_RADIUS + TRAILING_GAP;
        let per_item_cap = (((usable_w - start_x) as f32) * 0.35).max(140.0) as i32;

        let mut rows: Vec<Vec<usize>> = Vec::new();
        let mut cur: Vec<usize> = Vec::new();
        let mut x = start_x;
        for (i, label) in self.labels.iter().enumerate() {
            let cap_now = ((usable_w - x).max(40) - chrome).min(per_item_cap);
            let mut block_w = self.block_width(label, cap_now);
            if x + block_w > usable_w && !cur.is_empty() {
                rows.push(std::mem::take(&mut cur));
                x = start_x;
                let fresh_cap = ((usable_w - start_x) - chrome).min(per_item_cap);
                block_w = self.block_width(label, fresh_cap);
            }
            x += block_w;
            cur.push(i);
        }
        if !cur.is_empty() {
            rows.push(cur);
        }
        rows
    }

    /// Height of the band in whole pixels.
    pub fn band_height_px(&self) -> i32 {
        if self.labels.is_empty() {
            return 0;
        }
        let line_h = self.font_px as i32 + 2;
        let start_x = self.start_x.round() as i32;
        let usable_w = self.band_width.round() as i32 - PAD_SMALL;

        let mut height = match self.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => PAD_BAND + LEGEND_TITLE_FONT_PX as i32 + 8,
            _ => PAD_BAND + 8,
        };

        let rows = self.pack_rows(usable_w, start_x);
        let k_cols = rows.iter().map(Vec::len).max().unwrap_or(1);

        // Preferred column widths from the longest single-line label per column;
        // uniform slots (and wrapping) when those do not fit.
        let mut col_w = vec![MIN_SLOT; k_cols];
        for row in &rows {
            for (ci, &li) in row.iter().enumerate() {
                let text_w = estimate_text_width_px(&self.labels[li], self.font_px) as i32;
                col_w[ci] = col_w[ci].max(MARKER_TO_TEXT_GAP + MARKER_RADIUS + text_w + TRAILING_GAP);
            }
        }
        if start_x + col_w.iter().sum::<i32>() > usable_w {
            let uniform = ((usable_w - start_x) / k_cols as i32).max(MIN_SLOT);
            col_w = vec![uniform; k_cols];
        }
        let caps: Vec<u32> = col_w
            .iter()
            .map(|w| (w - (MARKER_TO_TEXT_GAP + MARKER_RADIUS + TRAILING_GAP)).max(40) as u32)
            .collect();

        for (ri, row) in rows.iter().enumerate() {
            let row_h = row
                .iter()
                .enumerate()
                .map(|(ci, &li)| {
                    let lines = wrap_text_to_width(&self.labels[li], self.font_px, caps[ci]);
                    lines.len().max(1) as i32 * line_h
                })
                .fold(line_h, i32::max);
            height += row_h;
            if ri + 1 < rows.len() {
                height += ROW_GAP;
            }
        }
        height + PAD_BAND
    }
}

impl Padding for LegendDecorator {
    fn padding(&self) -> f64 {
        self.band_height_px() as f64
    }
}

/// Space for an axis: tick labels, tick marks and an optional axis label.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisDecorator {
    pub side: Side,
    pub domain: (f64, f64),
    pub ticks: usize,
    pub font_px: u32,
    pub label: Option<String>,
}

impl AxisDecorator {
    pub fn new(side: Side, domain: (f64, f64)) -> Self {
        Self {
            side,
            domain,
            ticks: 10,
            font_px: 12,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn line_height(&self) -> f64 {
        (self.font_px as f64 * LINE_HEIGHT_EM).ceil()
    }

    fn label_px(&self) -> f64 {
        match self.label.as_deref() {
            Some(l) if !l.trim().is_empty() => self.line_height(),
            _ => 0.0,
        }
    }
}

/// Tick label text as drawn on a linear axis.
pub fn format_tick(v: f64) -> String {
    let a = v.abs();
    let prec = if a >= 100.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    };
    format!("{:.*}", prec, v)
}

/// Width for a vertical axis' tick labels, clamped to a sensible range.
pub fn tick_label_area_px(lo: f64, hi: f64, ticks: usize, font_px: u32) -> u32 {
    let widest = (0..=ticks)
        .map(|i| {
            let t = if ticks == 0 {
                0.0
            } else {
                i as f64 / ticks as f64
            };
            estimate_text_width_px(&format_tick(lo + (hi - lo) * t), font_px)
        })
        .max()
        .unwrap_or(0);
    // tick marks and breathing room
    widest.saturating_add(18).clamp(48, 140)
}

impl Padding for AxisDecorator {
    fn padding(&self) -> f64 {
        let (lo, hi) = self.domain;
        match self.side {
            Side::Left | Side::Right => {
                tick_label_area_px(lo, hi, self.ticks, self.font_px) as f64 + self.label_px()
            }
            Side::Top | Side::Bottom => self.line_height() + 8.0 + self.label_px(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_legend_takes_no_space() {
        assert_eq!(LegendDecorator::new(vec![], 400.0).padding(), 0.0);
    }

    #[test]
    fn short_labels_fit_one_row() {
        let legend = LegendDecorator::new(vec!["a".into(), "b".into()], 400.0);
        // band pad + gap + one 16px row + band pad
        assert_eq!(legend.band_height_px(), 8 + 8 + 16 + 8);
    }

    #[test]
    fn more_labels_never_shrink_the_band() {
        let few = LegendDecorator::new(vec!["Germany".into(); 2], 300.0);
        let many = LegendDecorator::new(vec!["Germany".into(); 12], 300.0);
        assert!(many.band_height_px() > few.band_height_px());
    }

    #[test]
    fn legend_title_adds_height() {
        let plain = LegendDecorator::new(vec!["x".into()], 400.0);
        let titled = plain.clone().with_title("Series");
        assert_eq!(titled.band_height_px() - plain.band_height_px(), 16);
    }

    #[test]
    fn vertical_axis_width_is_clamped() {
        assert_eq!(tick_label_area_px(0.0, 1.0, 5, 12), 48);
        assert_eq!(tick_label_area_px(0.0, 1e30, 5, 40), 140);
    }

    #[test]
    fn horizontal_axis_uses_line_height() {
        let axis = AxisDecorator::new(Side::Bottom, (0.0, 1.0));
        assert_eq!(axis.padding(), 15.0 + 8.0);
        assert_eq!(axis.with_label("x").padding(), 15.0 + 8.0 + 15.0);
    }
}
