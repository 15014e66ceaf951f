//! Animated GIF output for rotation frame sequences.

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};

use super::{validate_image, EncodeError};
use crate::decode::RasterImage;

/// Per-frame display time of preview and exported animations.
pub const DEFAULT_FRAME_DELAY_MS: u32 = 100;

/// Encode a frame sequence as an endlessly looping GIF.
///
/// Frames are written in order, each shown for `delay_ms` milliseconds.
/// RGB frames are treated as opaque.
///
/// # Errors
///
/// Returns `EncodeError::EmptyAnimation` for an empty sequence and
/// `EncodeError::InvalidPixelData` for a frame whose buffer is malformed.
pub fn encode_gif_animation(frames: &[RasterImage], delay_ms: u32) -> Result<Vec<u8>, EncodeError> {
    if frames.is_empty() {
        return Err(EncodeError::EmptyAnimation);
    }

    let mut buffer = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buffer);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

        for frame in frames {
            validate_image(frame)?;
            let rgba = frame
                .to_rgba_image()
                .ok_or_else(|| EncodeError::EncodingFailed("frame buffer mismatch".to_string()))?;
            let delay = Delay::from_numer_denom_ms(delay_ms, 1);
            encoder
                .encode_frame(Frame::from_parts(rgba, 0, 0, delay))
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        }
    }

    Ok(buffer)
}
