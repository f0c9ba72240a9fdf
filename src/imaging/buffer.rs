//! Owned decoded pixel data.
//!
//! A [`PixelBuffer`] has exactly one owner. Handing it to the rotator or the
//! encoder is a move, and the pixel memory is freed when the last owner drops
//! it, on success and error paths alike. The type is deliberately not
//! `Clone`.

use super::params::Dimensions;
use image::DynamicImage;

/// A decoded raster, in whatever colour type the decoder produced.
#[derive(Debug)]
pub struct PixelBuffer {
    image: DynamicImage,
}

impl PixelBuffer {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width(), self.height())
    }

    /// Raw sample bytes in row-major order.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_bytes()
    }

    /// Size of the pixel allocation in bytes.
    pub fn byte_size(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn as_image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_image(self) -> DynamicImage {
        self.image
    }
}

impl From<DynamicImage> for PixelBuffer {
    fn from(image: DynamicImage) -> Self {
        Self::new(image)
    }
}
