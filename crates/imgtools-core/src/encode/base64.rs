//! Base64 export of encoded images.
//!
//! The image is serialized in memory to the chosen container format and the raw
//! bytes are encoded with the standard Base64 alphabet (padding included, no
//! `data:` URL prefix).

use std::fmt;
use std::str::FromStr;

use ::base64::engine::general_purpose::STANDARD;
use ::base64::Engine;
use serde::{Deserialize, Serialize};

use super::jpeg::{encode_jpeg, DEFAULT_JPEG_QUALITY};
use super::png::encode_png;
use super::EncodeError;
use crate::decode::RasterImage;

/// Container format used to serialize an image before Base64 encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContainerFormat {
    /// Lossy, no alpha. Alpha is dropped before encoding.
    #[default]
    Jpeg,
    /// Lossless, alpha preserved.
    Png,
}

impl ContainerFormat {
    /// Conventional file extension for the format.
    pub fn extension(self) -> &'static str {
        match self {
            ContainerFormat::Jpeg => "jpg",
            ContainerFormat::Png => "png",
        }
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerFormat::Jpeg => f.write_str("JPEG"),
            ContainerFormat::Png => f.write_str("PNG"),
        }
    }
}

impl FromStr for ContainerFormat {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "JPEG" | "JPG" => Ok(ContainerFormat::Jpeg),
            "PNG" => Ok(ContainerFormat::Png),
            _ => Err(EncodeError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Serialize an image to a Base64 string in the given container format.
///
/// JPEG output uses the default export quality; PNG keeps RGB or RGBA as-is.
pub fn encode_base64(image: &RasterImage, format: ContainerFormat) -> Result<String, EncodeError> {
    let bytes = match format {
        ContainerFormat::Jpeg => encode_jpeg(image, DEFAULT_JPEG_QUALITY)?,
        ContainerFormat::Png => encode_png(image)?,
    };
    Ok(STANDARD.encode(bytes))
}

/// JSON document written by the export step: `{"key": "<base64>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base64Export {
    /// Base64 text of the encoded image.
    pub key: String,
}

impl Base64Export {
    /// Wrap already-encoded Base64 text.
    pub fn new(key: String) -> Self {
        Self { key }
    }

    /// Decode the stored text back into container bytes.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        STANDARD
            .decode(&self.key)
            .map_err(|e| EncodeError::EncodingFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{decode_image, PixelFormat};

    fn checker(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                let v = if (x + y) % 2 == 0 { 255 } else { 0 };
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        RasterImage::new(width, height, PixelFormat::Rgba, pixels)
    }

    #[test]
    fn test_container_format_parsing() {
        assert_eq!("JPEG".parse::<ContainerFormat>().unwrap(), ContainerFormat::Jpeg);
        assert_eq!("jpg".parse::<ContainerFormat>().unwrap(), ContainerFormat::Jpeg);
        assert_eq!(" png ".parse::<ContainerFormat>().unwrap(), ContainerFormat::Png);
        assert!(matches!(
            "webp".parse::<ContainerFormat>(),
            Err(EncodeError::UnsupportedFormat(name)) if name == "webp"
        ));
    }

    #[test]
    fn test_container_format_serde_names() {
        assert_eq!(serde_json::to_string(&ContainerFormat::Png).unwrap(), "\"PNG\"");
        let parsed: ContainerFormat = serde_json::from_str("\"JPEG\"").unwrap();
        assert_eq!(parsed, ContainerFormat::Jpeg);
    }

    #[test]
    fn test_base64_alphabet_only() {
        let text = encode_base64(&checker(9, 7), ContainerFormat::Jpeg).unwrap();
        assert!(!text.is_empty());
        assert_eq!(text.len() % 4, 0);
        assert!(text
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'='));
        assert!(!text.starts_with("data:"));
    }

    #[test]
    fn test_png_round_trip_keeps_dimensions() {
        let img = checker(13, 5);
        let text = encode_base64(&img, ContainerFormat::Png).unwrap();

        let bytes = STANDARD.decode(text).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (13, 5));
        assert_eq!(decoded, img);
    }

    #[test]
    fn test_jpeg_export_starts_with_soi() {
        let text = encode_base64(&checker(8, 8), ContainerFormat::Jpeg).unwrap();
        let bytes = STANDARD.decode(text).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_export_document_shape() {
        let export = Base64Export::new("QUJD".to_string());
        assert_eq!(serde_json::to_string(&export).unwrap(), r#"{"key":"QUJD"}"#);
        assert_eq!(export.decode_bytes().unwrap(), b"ABC");
    }
}
