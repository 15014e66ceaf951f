//! WASM bindings for rotation frames.
//!
//! Frames always come back as RGBA at the source dimensions, so JavaScript can
//! draw them onto a fixed-size canvas.

use crate::types::{js_error, JsRasterImage};
use imgtools_core::encode::{encode_gif_animation, DEFAULT_FRAME_DELAY_MS};
use imgtools_core::transform;
use wasm_bindgen::prelude::*;

/// Render one rotated frame.
///
/// # Arguments
///
/// * `image` - Source image
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
/// * `crop` - Crop the rotated content to its visible bounds before centring
///
/// # Errors
///
/// Returns an error if the pixel buffer does not match the dimensions.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const frame = rotate_frame(sourceImage, 45.0, true);
/// ```
#[wasm_bindgen]
pub fn rotate_frame(
    image: &JsRasterImage,
    angle_degrees: f64,
    crop: bool,
) -> Result<JsRasterImage, JsValue> {
    let raster = image.to_raster();
    raster.validate().map_err(js_error)?;
    Ok(JsRasterImage::from_raster(transform::rotate_frame(
        &raster,
        angle_degrees,
        crop,
    )))
}

/// Render a full-turn rotation and encode it as a looping GIF.
///
/// # Arguments
///
/// * `image` - Source image
/// * `frame_count` - Number of evenly spaced frames
/// * `crop` - Crop each frame to its visible bounds before centring
///
/// # Returns
///
/// GIF file bytes (100 ms per frame, loops forever).
///
/// # Errors
///
/// Returns an error if `frame_count` is zero or the pixel buffer does not
/// match the dimensions.
#[wasm_bindgen]
pub fn rotation_frames(
    image: &JsRasterImage,
    frame_count: u32,
    crop: bool,
) -> Result<Vec<u8>, JsValue> {
    let raster = image.to_raster();
    raster.validate().map_err(js_error)?;
    let frames = transform::rotation_frames(&raster, frame_count, crop);
    encode_gif_animation(&frames, DEFAULT_FRAME_DELAY_MS).map_err(js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_image(width: u32, height: u32) -> JsRasterImage {
        let pixels: Vec<u8> = (0..(width * height * 3) as usize)
            .map(|i| (i % 256) as u8)
            .collect();
        JsRasterImage::new(width, height, pixels, false)
    }

    #[test]
    fn test_rotate_frame_keeps_dimensions() {
        let img = test_image(100, 50);
        for angle in [0.0, 45.0, 90.0, 200.0] {
            let frame = rotate_frame(&img, angle, false).ok().unwrap();
            assert_eq!(frame.width(), 100);
            assert_eq!(frame.height(), 50);
            assert!(frame.has_alpha());
        }
    }

    #[test]
    fn test_rotate_frame_with_crop() {
        let img = test_image(60, 60);
        let frame = rotate_frame(&img, 30.0, true).ok().unwrap();
        assert_eq!(frame.byte_length(), 60 * 60 * 4);
    }

    #[test]
    fn test_rotation_frames_is_gif() {
        let img = test_image(16, 16);
        let gif = rotation_frames(&img, 10, false).unwrap();
        assert_eq!(&gif[..3], b"GIF");
    }
}
