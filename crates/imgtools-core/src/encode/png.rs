//! PNG encoding. Lossless, keeps the alpha channel of RGBA input.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{validate_image, EncodeError};
use crate::decode::{PixelFormat, RasterImage};

/// Encode an image to PNG bytes with the encoder's default settings.
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>, EncodeError> {
    validate_image(image)?;

    let color = match image.format {
        PixelFormat::Rgb => ExtendedColorType::Rgb8,
        PixelFormat::Rgba => ExtendedColorType::Rgba8,
    };

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(&image.pixels, image.width, image.height, color)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_signature() {
        let img = RasterImage::new(4, 4, PixelFormat::Rgb, vec![10u8; 4 * 4 * 3]);
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_png_is_lossless_with_alpha() {
        let pixels: Vec<u8> = (0..5 * 3 * 4).map(|i| (i * 7 % 256) as u8).collect();
        let img = RasterImage::new(5, 3, PixelFormat::Rgba, pixels);

        let png = encode_png(&img).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(RasterImage::from_dynamic(decoded), img);
    }

    #[test]
    fn test_encode_png_rejects_short_buffer() {
        let img = RasterImage {
            width: 4,
            height: 4,
            format: PixelFormat::Rgba,
            pixels: vec![0u8; 10],
        };
        assert!(matches!(
            encode_png(&img),
            Err(EncodeError::InvalidPixelData { expected: 64, actual: 10 })
        ));
    }
}
