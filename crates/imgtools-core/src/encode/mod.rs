//! Image encoding for export, compression and previews.
//!
//! This module provides functionality for:
//! - Encoding images to JPEG with configurable quality
//! - Encoding images to PNG (alpha preserved)
//! - Encoding frame sequences to a looping GIF animation
//! - Serializing images to Base64 text in a chosen container format
//!
//! All operations are synchronous and work entirely in memory.
//!
//! # Examples
//!
//! ```ignore
//! use imgtools_core::encode::{encode_base64, ContainerFormat};
//!
//! let text = encode_base64(&image, ContainerFormat::Png).unwrap();
//! println!("{} Base64 characters", text.len());
//! ```

mod base64;
mod gif;
mod jpeg;
mod png;

pub use self::base64::{encode_base64, Base64Export, ContainerFormat};
pub use self::gif::{encode_gif_animation, DEFAULT_FRAME_DELAY_MS};
pub use self::jpeg::{encode_jpeg, DEFAULT_JPEG_QUALITY};
pub use self::png::encode_png;

use thiserror::Error;

/// Errors that can occur while encoding images.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The requested container format is not supported
    #[error("Unsupported container format: {0}")]
    UnsupportedFormat(String),

    /// An animation needs at least one frame
    #[error("Animation has no frames")]
    EmptyAnimation,

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Check that an image's buffer matches its dimensions before handing it to an encoder.
pub(crate) fn validate_image(image: &crate::decode::RasterImage) -> Result<(), EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected = image.pixel_count() * image.format.channels();
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    Ok(())
}
