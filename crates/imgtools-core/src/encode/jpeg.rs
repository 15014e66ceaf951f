//! JPEG encoding.
//!
//! This module provides JPEG encoding using the `image` crate's JPEG encoder.
//! JPEG has no alpha channel, so RGBA input is flattened to RGB by dropping
//! alpha before encoding.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{validate_image, EncodeError};
use crate::decode::{PixelFormat, RasterImage};

/// Quality used when a JPEG is written without an explicit quality setting.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Encode an image to JPEG bytes.
///
/// # Arguments
///
/// * `image` - Source image (RGB, or RGBA whose alpha is discarded)
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Returns
///
/// JPEG-encoded bytes on success, or an error if encoding fails.
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 75: Default export quality
/// * Below 20: Heavy artifacts, only reached by aggressive size targeting
pub fn encode_jpeg(image: &RasterImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate_image(image)?;

    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    let rgb;
    let pixels = match image.format {
        PixelFormat::Rgb => &image.pixels,
        PixelFormat::Rgba => {
            rgb = image.to_rgb();
            &rgb.pixels
        }
    };

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(pixels, image.width, image.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
