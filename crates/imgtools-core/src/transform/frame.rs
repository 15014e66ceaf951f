//! Rotation animation frames.
//!
//! Every frame is rendered onto a transparent canvas the size of the source
//! image, so all frames of an animation share identical dimensions no matter
//! how much the rotated content grows.

use super::composite::paste_with_alpha;
use super::crop::{bounding_box, crop_to_box};
use super::rotation::rotate_expand;
use crate::decode::RasterImage;

/// Render one rotated frame.
///
/// The source is rotated by `angle_degrees` (counter-clockwise, canvas
/// expanded), optionally cropped to its non-transparent bounding box, then
/// centred on a transparent canvas of the source size with floor division.
/// Content larger than the canvas is clipped evenly on both sides.
///
/// The returned frame is RGBA and has exactly the source dimensions.
///
/// # Panics
///
/// Panics if the pixel buffer does not match the dimensions; check
/// untrusted images with [`RasterImage::validate`] first.
pub fn rotate_frame(image: &RasterImage, angle_degrees: f64, crop: bool) -> RasterImage {
    let mut canvas = RasterImage::transparent(image.width, image.height);

    let mut rotated = rotate_expand(image, angle_degrees);

    if crop {
        // Fully transparent content has no box; keep it as-is
        if let Some(bbox) = bounding_box(&rotated) {
            rotated = crop_to_box(&rotated, bbox);
        }
    }

    let x = (canvas.width as i64 - rotated.width as i64).div_euclid(2);
    let y = (canvas.height as i64 - rotated.height as i64).div_euclid(2);
    paste_with_alpha(&mut canvas, &rotated, x, y);

    canvas
}

/// Angles of an evenly spaced full turn: `(360 / frame_count) * i`.
pub fn frame_angles(frame_count: u32) -> Vec<f64> {
    if frame_count == 0 {
        return Vec::new();
    }
    let step = 360.0 / frame_count as f64;
    (0..frame_count).map(|i| step * i as f64).collect()
}

/// Render a full-turn animation of `frame_count` frames in playback order.
pub fn rotation_frames(image: &RasterImage, frame_count: u32, crop: bool) -> Vec<RasterImage> {
    frame_angles(frame_count)
        .into_iter()
        .map(|angle| rotate_frame(image, angle, crop))
        .collect()
}
