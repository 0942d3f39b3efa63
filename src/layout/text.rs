//! Text measurement, truncation, and wrapping utilities.
//!
//! Plotters has no text measuring on its SVG path, so layout works from
//! font-size based estimates. Callers that can measure real glyph boxes plug
//! in their own [`TextMeasurer`].

/// Average glyph advance as a fraction of the font size.
pub const GLYPH_WIDTH_EM: f64 = 0.60;

/// Bounding-box height of one text line as a fraction of the font size.
pub const LINE_HEIGHT_EM: f64 = 1.25;

/// Returns the `(width, height)` of the bounding box `text` renders to.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_px: f64) -> (f64, f64);
}

/// Font-size driven estimate: `0.6em` per glyph, `1.25em` per line.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_px: f64) -> (f64, f64) {
        let lines: Vec<&str> = text.lines().collect();
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let width = widest as f64 * font_px * GLYPH_WIDTH_EM;
        let height = lines.len() as f64 * font_px * LINE_HEIGHT_EM;
        (width, height)
    }
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, f64) -> (f64, f64),
{
    fn measure(&self, text: &str, font_px: f64) -> (f64, f64) {
        self(text, font_px)
    }
}

/// Heuristic: estimate pixel width of text in whole pixels.
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f64) * (font_px as f64) * GLYPH_WIDTH_EM).ceil() as u32
}

/// Truncate to fit `max_px` and add a single ellipsis if needed.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        let next = format!("{out}{ch}");
        if estimate_text_width_px(&next, font_px) > max_px {
            if !out.is_empty() {
                if estimate_text_width_px(&(out.clone() + "…"), font_px) <= max_px {
                    out.push('…');
                } else if out.chars().count() > 1 {
                    out.pop();
                    out.push('…');
                }
            }
            return out;
        }
        out = next;
    }
    out
}

/// Wrap text to fit within a maximum pixel width, breaking on word boundaries where possible.
pub fn wrap_text_to_width(text: &str, font_px: u32, max_px: u32) -> Vec<String> {
    if max_px <= 12 {
        return vec![truncate_to_width(text, font_px, max_px)];
    }
    let mut lines: Vec<String> = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        let candidate = if cur.is_empty() {
            word.to_string()
        } else {
            format!("{cur} {word}")
        };
        if estimate_text_width_px(&candidate, font_px) <= max_px {
            cur = candidate;
        } else if cur.is_empty() {
            // Single long word: hard-break by characters
            let mut buf = String::new();
            for ch in word.chars() {
                let cand = format!("{buf}{ch}");
                if estimate_text_width_px(&cand, font_px) > max_px && !buf.is_empty() {
                    lines.push(buf);
                    buf = ch.to_string();
                } else {
                    buf = cand;
                }
            }
            if !buf.is_empty() {
                cur = buf;
            }
        } else {
            lines.push(cur);
            cur = word.to_string();
        }
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    lines
}
