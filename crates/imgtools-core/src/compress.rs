//! Size-targeted JPEG recompression.
//!
//! The compressor repeatedly re-encodes a shrinking copy of the image as JPEG
//! until the encoded size fits a megabyte budget.
//!
//! # Attempt Schedule
//!
//! Starting at quality 95 and full size, each failed attempt lowers the
//! quality by 5 and scales both dimensions by the current scale factor
//! (initially 0.95). Once quality drops below 20 the scale factor itself
//! shrinks by 0.05 after every further failure. Quality is never raised again,
//! so late attempts run at the encoder's minimum quality.
//!
//! At most [`MAX_ATTEMPTS`] encodes are performed. An unreachable budget is a
//! normal outcome (`Ok(None)`), not an error.

use thiserror::Error;

use crate::decode::{resize, DecodeError, FilterType, RasterImage};
use crate::encode::{encode_jpeg, EncodeError};

/// Hard bound on encode attempts.
pub const MAX_ATTEMPTS: usize = 30;

const INITIAL_QUALITY: i32 = 95;
const QUALITY_STEP: i32 = 5;
const INITIAL_SCALE_FACTOR: f64 = 0.95;
const SCALE_FACTOR_STEP: f64 = 0.05;
const AGGRESSIVE_BELOW_QUALITY: i32 = 20;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Errors that can occur while compressing.
#[derive(Debug, Error)]
pub enum CompressError {
    /// A budget of zero megabytes can never be met.
    #[error("Compression budget must be at least 1 MB")]
    ZeroBudget,

    /// The image could not be resized.
    #[error("Resize failed: {0}")]
    Resize(#[from] DecodeError),

    /// The JPEG encoder failed.
    #[error("Encode failed: {0}")]
    Encode(#[from] EncodeError),
}

/// Parameters of one compression attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attempt {
    /// Requested JPEG quality. Can go below 1; the encoder clamps it.
    pub quality: i32,
    /// Target width, truncated from the running float width (at least 1).
    pub width: u32,
    /// Target height, truncated from the running float height (at least 1).
    pub height: u32,
}

impl Attempt {
    /// Quality handed to the JPEG encoder.
    pub fn encoder_quality(&self) -> u8 {
        self.quality.clamp(1, 100) as u8
    }
}

/// Iterator over the fixed attempt schedule for a `width` x `height` source.
#[derive(Debug, Clone)]
pub struct CompressionSchedule {
    quality: i32,
    width: f64,
    height: f64,
    scale_factor: f64,
    remaining: usize,
}

impl Iterator for CompressionSchedule {
    type Item = Attempt;

    fn next(&mut self) -> Option<Attempt> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let attempt = Attempt {
            quality: self.quality,
            width: (self.width as u32).max(1),
            height: (self.height as u32).max(1),
        };

        // State update applied after a failed attempt
        self.quality -= QUALITY_STEP;
        self.width *= self.scale_factor;
        self.height *= self.scale_factor;
        if self.quality < AGGRESSIVE_BELOW_QUALITY {
            self.scale_factor -= SCALE_FACTOR_STEP;
        }

        Some(attempt)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for CompressionSchedule {}

/// The attempt schedule for a source of the given size.
pub fn compression_schedule(width: u32, height: u32) -> CompressionSchedule {
    CompressionSchedule {
        quality: INITIAL_QUALITY,
        width: width as f64,
        height: height as f64,
        scale_factor: INITIAL_SCALE_FACTOR,
        remaining: MAX_ATTEMPTS,
    }
}

/// Successful compression result.
#[derive(Debug, Clone)]
pub struct Compressed {
    /// The JPEG decoded back into an RGB raster.
    pub image: RasterImage,
    /// The encoded JPEG that met the budget.
    pub jpeg: Vec<u8>,
    /// Quality value of the successful attempt (before encoder clamping).
    pub quality: i32,
    /// 1-based number of the successful attempt.
    pub attempt: usize,
}

/// Convert a megabyte budget to bytes.
pub fn budget_bytes(budget_mb: u32) -> u64 {
    budget_mb as u64 * BYTES_PER_MB
}

/// Compress `image` until its JPEG encoding fits in `budget_mb` megabytes.
///
/// Returns `Ok(None)` if no attempt of the schedule fits.
///
/// # Errors
///
/// `CompressError::ZeroBudget` for a zero budget; resize or encoder failures
/// for malformed images.
pub fn compress_to_size(
    image: &RasterImage,
    budget_mb: u32,
) -> Result<Option<Compressed>, CompressError> {
    if budget_mb == 0 {
        return Err(CompressError::ZeroBudget);
    }
    compress_to_bytes(image, budget_bytes(budget_mb))
}

/// Compress `image` until its JPEG encoding is at most `target_bytes` long.
pub fn compress_to_bytes(
    image: &RasterImage,
    target_bytes: u64,
) -> Result<Option<Compressed>, CompressError> {
    let source = image.to_rgb();

    for (index, attempt) in compression_schedule(source.width, source.height).enumerate() {
        let working = resize(&source, attempt.width, attempt.height, FilterType::Lanczos3)?;
        let jpeg = encode_jpeg(&working, attempt.encoder_quality())?;

        if jpeg.len() as u64 <= target_bytes {
            let decoded = image::load_from_memory_with_format(&jpeg, image::ImageFormat::Jpeg)
                .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
            return Ok(Some(Compressed {
                image: RasterImage::from_rgb_image(decoded.into_rgb8()),
                jpeg,
                quality: attempt.quality,
                attempt: index + 1,
            }));
        }
    }

    Ok(None)
}
