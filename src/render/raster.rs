//! RGBA pixel buffers produced by rasterization.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, Pixel, RgbImage, RgbaImage, imageops};

use crate::error::{FigureError, Result};
use crate::style::Rgba;

/// RGBA8 image of a rendered figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    image: RgbaImage,
}

impl Bitmap {
    /// A bitmap filled with one color.
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, image::Rgba(color.to_array())),
        }
    }

    /// Wrap an RGB8 buffer (as written by the plotters bitmap backend) as opaque RGBA.
    pub fn from_rgb(width: u32, height: u32, rgb: Vec<u8>) -> Result<Self> {
        let len = rgb.len();
        let rgb = RgbImage::from_raw(width, height, rgb).ok_or_else(|| {
            FigureError::Render(format!(
                "RGB buffer of {len} bytes does not match {width}x{height}"
            ))
        })?;
        Ok(Self {
            image: DynamicImage::ImageRgb8(rgb).to_rgba8(),
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Channels `[r, g, b, a]` at `(x, y)`, or `None` outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Copy of a rectangular region, or `None` if it leaves the bitmap.
    pub fn region(&self, x: u32, y: u32, width: u32, height: u32) -> Option<Bitmap> {
        if x.checked_add(width)? > self.width() || y.checked_add(height)? > self.height() {
            return None;
        }
        Some(Bitmap {
            image: imageops::crop_imm(&self.image, x, y, width, height).to_image(),
        })
    }

    /// Source-over composite of `color` onto the pixel at `(x, y)`.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(p) = self.image.get_pixel_mut_checked(x, y) {
            p.blend(&image::Rgba(color.to_array()));
        }
    }

    /// Composite `top` onto this bitmap with its top-left corner at `(x, y)`.
    pub fn overlay(&mut self, top: &Bitmap, x: u32, y: u32) {
        imageops::overlay(&mut self.image, &top.image, x as i64, y as i64);
    }

    /// Number of pixels exactly equal to `color`.
    pub fn count_color(&self, color: [u8; 4]) -> usize {
        self.image.pixels().filter(|p| p.0 == color).count()
    }

    /// Encode as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        self.image.write_to(&mut out, ImageFormat::Png)?;
        Ok(out.into_inner())
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_lookup_and_bounds() {
        let b = Bitmap::filled(4, 3, Rgba::rgb(1, 2, 3));
        assert_eq!(b.pixel(3, 2), Some([1, 2, 3, 255]));
        assert_eq!(b.pixel(4, 0), None);
        assert_eq!(b.as_raw().len(), 4 * 3 * 4);
    }

    #[test]
    fn region_copies_rows() {
        let mut b = Bitmap::filled(4, 4, Rgba::rgb(0, 0, 0));
        b.blend_pixel(2, 1, Rgba::rgb(255, 0, 0));
        let r = b.region(1, 1, 2, 2).unwrap();
        assert_eq!((r.width(), r.height()), (2, 2));
        assert_eq!(r.pixel(1, 0), Some([255, 0, 0, 255]));
        assert!(b.region(3, 3, 2, 2).is_none());
    }

    #[test]
    fn half_transparent_blend() {
        let mut b = Bitmap::filled(1, 1, Rgba::rgb(0, 0, 0));
        b.blend_pixel(0, 0, Rgba::new(255, 255, 255, 128));
        let [r, g, bl, a] = b.pixel(0, 0).unwrap();
        assert!((127..=128).contains(&r), "{r}");
        assert_eq!((r, r), (g, bl));
        assert_eq!(a, 255);
    }

    #[test]
    fn rgb_buffers_become_opaque() {
        let b = Bitmap::from_rgb(2, 1, vec![10, 20, 30, 40, 50, 60]).unwrap();
        assert_eq!(b.pixel(1, 0), Some([40, 50, 60, 255]));
        assert!(Bitmap::from_rgb(2, 2, vec![0; 3]).is_err());
    }

    #[test]
    fn overlay_places_block_and_clips() {
        let mut base = Bitmap::filled(4, 4, Rgba::rgb(255, 255, 255));
        let block = Bitmap::filled(3, 3, Rgba::rgb(0, 0, 255));
        base.overlay(&block, 2, 2);
        assert_eq!(base.pixel(3, 3), Some([0, 0, 255, 255]));
        assert_eq!(base.pixel(1, 1), Some([255, 255, 255, 255]));
        assert_eq!(base.count_color([0, 0, 255, 255]), 4);
    }

    #[test]
    fn png_roundtrip_keeps_size() {
        let b = Bitmap::filled(5, 7, Rgba::rgb(9, 9, 9));
        let png = b.to_png().unwrap();
        let img = image::load_from_memory(&png).unwrap();
        assert_eq!((img.width(), img.height()), (5, 7));
    }
}
