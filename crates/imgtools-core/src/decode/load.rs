//! Decoding image files into RGBA rasters.

use std::io::Cursor;
use std::path::Path;

use image::ImageReader;

use super::{DecodeError, RasterImage};

/// Decode an image from bytes, guessing the container format.
///
/// Every supported format (PNG, JPEG, GIF first frame) is normalized to RGBA,
/// the working format of the transformation pipeline.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be determined and
/// `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(RasterImage::from_rgba_image(img.into_rgba8()))
}

/// Read and decode an image file from disk.
pub fn open_image(path: &Path) -> Result<RasterImage, DecodeError> {
    let bytes = std::fs::read(path).map_err(|e| DecodeError::IoError(e.to_string()))?;
    decode_image(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::PixelFormat;
    use crate::encode::{encode_jpeg, encode_png};

    #[test]
    fn test_decode_png_to_rgba() {
        let img = RasterImage::new(3, 2, PixelFormat::Rgb, vec![90u8; 3 * 2 * 3]);
        let png = encode_png(&img).unwrap();

        let decoded = decode_image(&png).unwrap();
        assert_eq!(decoded.format, PixelFormat::Rgba);
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(&decoded.pixels[..4], &[90, 90, 90, 255]);
    }

    #[test]
    fn test_decode_jpeg() {
        let img = RasterImage::new(16, 8, PixelFormat::Rgb, vec![128u8; 16 * 8 * 3]);
        let jpeg = encode_jpeg(&img, 90).unwrap();

        let decoded = decode_image(&jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (16, 8));
    }

    #[test]
    fn test_decode_garbage_is_invalid_format() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_png() {
        let img = RasterImage::new(8, 8, PixelFormat::Rgb, vec![1u8; 8 * 8 * 3]);
        let png = encode_png(&img).unwrap();

        let result = decode_image(&png[..png.len() / 2]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_open_missing_file() {
        let result = open_image(Path::new("/definitely/not/here.png"));
        assert!(matches!(result, Err(DecodeError::IoError(_))));
    }
}
