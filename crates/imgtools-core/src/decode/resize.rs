//! Image resizing for compression passes and preview generation.
//!
//! Provides resize operations using the `image` crate's algorithms.
//! All functions return new `RasterImage` instances without modifying the input.

use image::DynamicImage;

use super::{DecodeError, FilterType, RasterImage};

/// Resize an image to exact dimensions.
///
/// The pixel format of the input is preserved.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` for a zero target size and
/// `DecodeError::CorruptedFile` if the pixel buffer does not match the
/// image dimensions.
pub fn resize(
    image: &RasterImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RasterImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let source = image
        .to_dynamic()
        .ok_or_else(|| DecodeError::CorruptedFile("Pixel buffer size mismatch".to_string()))?;

    let filter = filter.to_image_filter();
    let resized = match source {
        DynamicImage::ImageRgba8(rgba) => {
            RasterImage::from_rgba_image(image::imageops::resize(&rgba, width, height, filter))
        }
        other => {
            let rgb = other.into_rgb8();
            RasterImage::from_rgb_image(image::imageops::resize(&rgb, width, height, filter))
        }
    };

    Ok(resized)
}

/// Resize an image to fit inside a `max_width` x `max_height` box while
/// preserving aspect ratio.
///
/// Images that already fit are returned unchanged (never upscaled).
pub fn resize_to_fit(
    image: &RasterImage,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> Result<RasterImage, DecodeError> {
    if max_width == 0 || max_height == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: max_width,
            height: max_height,
        });
    }

    if image.width <= max_width && image.height <= max_height {
        return Ok(image.clone());
    }

    let (new_width, new_height) =
        calculate_fit_dimensions(image.width, image.height, max_width, max_height);

    resize(image, new_width, new_height, filter)
}

/// Calculate dimensions that fit within the box while preserving aspect ratio.
fn calculate_fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let scale = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    let new_width = (width as f64 * scale).round() as u32;
    let new_height = (height as f64 * scale).round() as u32;

    (
        new_width.clamp(1, max_width),
        new_height.clamp(1, max_height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::PixelFormat;

    fn create_test_image(width: u32, height: u32, format: PixelFormat) -> RasterImage {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * format.channels());
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
                if format.has_alpha() {
                    pixels.push(255);
                }
            }
        }
        RasterImage::new(width, height, format, pixels)
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50, PixelFormat::Rgb);
        let resized = resize(&img, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_keeps_alpha() {
        let img = create_test_image(40, 40, PixelFormat::Rgba);
        let resized = resize(&img, 20, 10, FilterType::Lanczos3).unwrap();

        assert_eq!(resized.format, PixelFormat::Rgba);
        assert_eq!(resized.pixels.len(), 20 * 10 * 4);
    }

    #[test]
    fn test_resize_same_dimensions() {
        let img = create_test_image(100, 50, PixelFormat::Rgb);
        let resized = resize(&img, 100, 50, FilterType::Lanczos3).unwrap();

        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(100, 50, PixelFormat::Rgb);

        assert!(resize(&img, 0, 50, FilterType::Bilinear).is_err());
        assert!(resize(&img, 50, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_to_fit_landscape() {
        let img = create_test_image(800, 600, PixelFormat::Rgba);
        let resized = resize_to_fit(&img, 400, 300, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 400);
        assert_eq!(resized.height, 300);
    }

    #[test]
    fn test_resize_to_fit_portrait() {
        let img = create_test_image(300, 900, PixelFormat::Rgb);
        let resized = resize_to_fit(&img, 400, 300, FilterType::Bilinear).unwrap();

        assert_eq!(resized.height, 300);
        assert_eq!(resized.width, 100);
    }

    #[test]
    fn test_resize_to_fit_already_smaller() {
        let img = create_test_image(100, 50, PixelFormat::Rgb);
        let resized = resize_to_fit(&img, 400, 300, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 100);
        assert_eq!(resized.height, 50);
    }

    #[test]
    fn test_resize_to_fit_zero_box_error() {
        let img = create_test_image(100, 50, PixelFormat::Rgb);
        assert!(resize_to_fit(&img, 0, 300, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_calculate_fit_dimensions_wide() {
        let (w, h) = calculate_fit_dimensions(6000, 1000, 400, 300);
        assert_eq!(w, 400);
        assert_eq!(h, 67);
    }

    #[test]
    fn test_calculate_fit_dimensions_zero_input() {
        assert_eq!(calculate_fit_dimensions(0, 0, 400, 300), (0, 0));
    }
}
