//! Core types for in-memory rasters.

use image::{DynamicImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// I/O error during file reading.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Width or height is zero.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel buffer length does not match the dimensions.
    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Pixel layout of a [`RasterImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PixelFormat {
    /// 3 bytes per pixel, no alpha.
    Rgb,
    /// 4 bytes per pixel, straight (non-premultiplied) alpha.
    #[default]
    Rgba,
}

impl PixelFormat {
    /// Number of bytes per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }

    /// Returns true if the format carries an alpha channel.
    #[inline]
    pub fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::Rgba)
    }
}

/// An in-memory raster image.
///
/// Transformations never modify a `RasterImage` in place; every operation in
/// this crate returns a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Layout of `pixels`.
    pub format: PixelFormat,
    /// Pixel data in row-major order.
    /// Length should be width * height * format.channels().
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Create a new RasterImage with the given dimensions, format and pixel data.
    pub fn new(width: u32, height: u32, format: PixelFormat, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * format.channels(),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            format,
            pixels,
        }
    }

    /// Create a fully transparent RGBA image.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            format: PixelFormat::Rgba,
            pixels: vec![0u8; width as usize * height as usize * 4],
        }
    }

    /// Create a RasterImage from an image::RgbImage.
    pub fn from_rgb_image(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            format: PixelFormat::Rgb,
            pixels: img.into_raw(),
        }
    }

    /// Create a RasterImage from an image::RgbaImage.
    pub fn from_rgba_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            format: PixelFormat::Rgba,
            pixels: img.into_raw(),
        }
    }

    /// Create a RasterImage from any decoded image.
    ///
    /// Images with an alpha channel become RGBA, everything else RGB.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        if img.color().has_alpha() {
            Self::from_rgba_image(img.into_rgba8())
        } else {
            Self::from_rgb_image(img.into_rgb8())
        }
    }

    /// Convert to an image::DynamicImage for use with the image crate.
    ///
    /// Returns `None` if the pixel buffer does not match the dimensions.
    pub fn to_dynamic(&self) -> Option<DynamicImage> {
        match self.format {
            PixelFormat::Rgb => {
                RgbImage::from_raw(self.width, self.height, self.pixels.clone())
                    .map(DynamicImage::ImageRgb8)
            }
            PixelFormat::Rgba => {
                RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
                    .map(DynamicImage::ImageRgba8)
            }
        }
    }

    /// Convert to an image::RgbaImage, adding opaque alpha to RGB sources.
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.to_rgba().pixels)
    }

    /// Return an RGBA copy of this image. RGB pixels become fully opaque.
    pub fn to_rgba(&self) -> RasterImage {
        match self.format {
            PixelFormat::Rgba => self.clone(),
            PixelFormat::Rgb => {
                let mut pixels = Vec::with_capacity(self.pixel_count() * 4);
                for px in self.pixels.chunks_exact(3) {
                    pixels.extend_from_slice(&[px[0], px[1], px[2], 255]);
                }
                RasterImage {
                    width: self.width,
                    height: self.height,
                    format: PixelFormat::Rgba,
                    pixels,
                }
            }
        }
    }

    /// Return an RGB copy of this image.
    ///
    /// Alpha is discarded without compositing against a background, so fully
    /// transparent pixels keep whatever colour they store.
    pub fn to_rgb(&self) -> RasterImage {
        match self.format {
            PixelFormat::Rgb => self.clone(),
            PixelFormat::Rgba => {
                let mut pixels = Vec::with_capacity(self.pixel_count() * 3);
                for px in self.pixels.chunks_exact(4) {
                    pixels.extend_from_slice(&px[..3]);
                }
                RasterImage {
                    width: self.width,
                    height: self.height,
                    format: PixelFormat::Rgb,
                    pixels,
                }
            }
        }
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Check that the dimensions are non-zero and the buffer matches them.
    ///
    /// The transforms index the buffer directly, so images built by hand
    /// should pass this before they are rotated or composited.
    pub fn validate(&self) -> Result<(), DecodeError> {
        if self.width == 0 || self.height == 0 {
            return Err(DecodeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let expected = self.pixel_count() * self.format.channels();
        if self.pixels.len() != expected {
            return Err(DecodeError::BufferSizeMismatch {
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// Dimensions as a `(width, height)` tuple.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
