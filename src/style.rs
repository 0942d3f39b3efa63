//! Color handling for marks and figure backgrounds.
//!
//! Colors are given as strings the way a figure model carries them:
//! CSS named colors (`"red"`), `#rrggbb`, `#rrggbbaa` or short `#rgb`.
//! Marks without explicit colors cycle through the Office series palette.

use plotters::style::RGBAColor;
use serde::{Deserialize, Serialize};

use crate::error::{FigureError, Result};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Scale alpha by an opacity in `0..=1`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = (self.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Composite over opaque white.
    pub fn over_white(self) -> Self {
        let a = self.a as u32;
        let mix = |c: u8| ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8;
        Self::rgb(mix(self.r), mix(self.g), mix(self.b))
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn to_plotters(self) -> RGBAColor {
        RGBAColor(self.r, self.g, self.b, self.a as f64 / 255.0)
    }

    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Microsoft Office (2013+) chart series palette.
const OFFICE10: [(u8, u8, u8); 10] = [
    (68, 114, 196),  // blue      (#4472C4)
    (237, 125, 49),  // orange    (#ED7D31)
    (165, 165, 165), // gray      (#A5A5A5)
    (255, 192, 0),   // gold      (#FFC000)
    (91, 155, 213),  // light blue(#5B9BD5)
    (112, 173, 71),  // green     (#70AD47)
    (38, 68, 120),   // dark blue (#264478)
    (158, 72, 14),   // dark org. (#9E480E)
    (99, 99, 99),    // dark gray (#636363)
    (153, 115, 0),   // brownish  (#997300)
];

/// Get a color from the series palette.
#[inline]
pub fn palette_color(idx: usize) -> Rgba {
    let (r, g, b) = OFFICE10[idx % OFFICE10.len()];
    Rgba::rgb(r, g, b)
}

const NAMED: [(&str, (u8, u8, u8)); 18] = [
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("lime", (0, 255, 0)),
    ("blue", (0, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("cyan", (0, 255, 255)),
    ("magenta", (255, 0, 255)),
    ("orange", (255, 165, 0)),
    ("purple", (128, 0, 128)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("lightgray", (211, 211, 211)),
    ("darkgray", (169, 169, 169)),
    ("steelblue", (70, 130, 180)),
    ("navy", (0, 0, 128)),
    ("brown", (165, 42, 42)),
];

/// Parse a color string (named, `#rgb`, `#rrggbb`, `#rrggbbaa`, or `transparent`).
pub fn parse_color(s: &str) -> Result<Rgba> {
    let t = s.trim().to_ascii_lowercase();
    if t == "transparent" || t == "none" {
        return Ok(Rgba::new(0, 0, 0, 0));
    }
    if let Some(hex) = t.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| bad_color(s));
    }
    NAMED
        .iter()
        .find(|(name, _)| *name == t)
        .map(|(_, (r, g, b))| Rgba::rgb(*r, *g, *b))
        .ok_or_else(|| bad_color(s))
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let nib = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(Rgba::rgb(nib(0)?, nib(1)?, nib(2)?))
        }
        6 => Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn bad_color(s: &str) -> FigureError {
    FigureError::invalid_property("color", format!("unrecognized color `{s}`"))
}
