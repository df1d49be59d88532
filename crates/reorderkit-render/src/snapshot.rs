//! Row snapshots.
//!
//! A [`RowSnapshot`] is the rendered bitmap of a single row, captured by the
//! rendering surface when a drag begins. The floating proxy draws this bitmap
//! instead of the live row, so the row itself can be hidden while it is being
//! dragged.

use image::RgbaImage;

use crate::error::{RenderError, RenderResult};
use crate::types::Size;

/// The rendered bitmap of a row plus its logical (unscaled) size.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSnapshot {
    image: RgbaImage,
    logical_size: Size,
}

impl RowSnapshot {
    /// Wrap an already rendered image.
    pub fn from_image(image: RgbaImage, logical_size: Size) -> Self {
        Self {
            image,
            logical_size,
        }
    }

    /// Build a snapshot from raw RGBA8 pixels.
    ///
    /// Fails unless `pixels` is exactly `width * height * 4` bytes long.
    pub fn from_rgba(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
        logical_size: Size,
    ) -> RenderResult<Self> {
        let actual = pixels.len();
        let invalid = RenderError::InvalidSnapshot {
            width,
            height,
            actual,
        };
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|area| area.checked_mul(4));
        if expected != Some(actual) {
            return Err(invalid);
        }
        let image = RgbaImage::from_raw(width, height, pixels).ok_or(invalid)?;
        Ok(Self::from_image(image, logical_size))
    }

    /// A snapshot filled with a single color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4], logical_size: Size) -> Self {
        Self::from_image(
            RgbaImage::from_pixel(width, height, image::Rgba(rgba)),
            logical_size,
        )
    }

    /// The captured pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Pixel dimensions of the bitmap.
    pub fn pixel_size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Size of the row in view coordinates.
    pub fn logical_size(&self) -> Size {
        self.logical_size
    }

    /// Ratio between bitmap pixels and view units along the x axis.
    pub fn scale_factor(&self) -> f32 {
        if self.logical_size.width <= 0.0 {
            1.0
        } else {
            self.image.width() as f32 / self.logical_size.width
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_rejects_short_buffer() {
        let err = RowSnapshot::from_rgba(4, 2, vec![0; 10], Size::new(4.0, 2.0)).unwrap_err();
        assert_eq!(
            err,
            RenderError::InvalidSnapshot {
                width: 4,
                height: 2,
                actual: 10
            }
        );
    }

    #[test]
    fn test_from_rgba_rejects_long_buffer() {
        let err = RowSnapshot::from_rgba(4, 2, vec![0; 40], Size::new(4.0, 2.0)).unwrap_err();
        assert_eq!(
            err,
            RenderError::InvalidSnapshot {
                width: 4,
                height: 2,
                actual: 40
            }
        );
    }

    #[test]
    fn test_from_rgba_accepts_exact_buffer() {
        let snapshot = RowSnapshot::from_rgba(4, 2, vec![255; 32], Size::new(2.0, 1.0)).unwrap();
        assert_eq!(snapshot.pixel_size(), (4, 2));
        assert_eq!(snapshot.scale_factor(), 2.0);
    }

    #[test]
    fn test_solid_snapshot() {
        let snapshot = RowSnapshot::solid(3, 3, [10, 20, 30, 255], Size::new(3.0, 3.0));
        assert_eq!(snapshot.image().get_pixel(1, 1).0, [10, 20, 30, 255]);
        assert_eq!(snapshot.scale_factor(), 1.0);
    }
}
