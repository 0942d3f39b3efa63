//! Fit a rectangle into an aspect-ratio band.
//!
//! The resolver only ever shrinks: a too-wide rectangle loses width, a
//! too-tall one loses height, and the shrunk side is centred in the space it
//! came from. No rounding happens here.

use crate::models::AspectBand;

/// Result of fitting an available rectangle to a band. Offsets are relative
/// to the available rectangle's own origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Largest rectangle inside `available_width` × `available_height` whose
/// aspect honours `band`.
///
/// `max` is checked before `min`, so for a degenerate band (min > max) the
/// max bound wins. Layout validates bands before calling this.
pub fn fit(available_width: f64, available_height: f64, band: &AspectBand) -> Fit {
    let aspect = available_width / available_height;

    if let Some(max) = band.max
        && aspect > max
    {
        let width = available_height * max;
        return Fit {
            width,
            height: available_height,
            offset_x: (available_width - width) / 2.0,
            offset_y: 0.0,
        };
    }

    if let Some(min) = band.min
        && aspect < min
    {
        let height = available_width / min;
        return Fit {
            width: available_width,
            height,
            offset_x: 0.0,
            offset_y: (available_height - height) / 2.0,
        };
    }

    Fit {
        width: available_width,
        height: available_height,
        offset_x: 0.0,
        offset_y: 0.0,
    }
}
