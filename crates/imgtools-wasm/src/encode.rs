//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_base64`] - Encode an image as Base64 text in JPEG or PNG
//! - [`encode_jpeg`] - Encode an image to JPEG bytes
//!
//! # Example
//!
//! ```typescript
//! import { encode_base64, encode_jpeg } from '@imgtools/wasm';
//!
//! const b64 = encode_base64(image, 'PNG');
//! const jpeg = encode_jpeg(image, 75);
//! ```

use crate::types::{js_error, JsRasterImage};
use imgtools_core::encode::{self, ContainerFormat};
use wasm_bindgen::prelude::*;

/// Encode an image as Base64 text.
///
/// # Arguments
///
/// * `image` - The image to encode
/// * `format` - `"JPEG"` (alpha dropped, quality 75) or `"PNG"`; case-insensitive
///
/// # Errors
///
/// Returns an error for an unknown format or malformed pixel data.
#[wasm_bindgen]
pub fn encode_base64(image: &JsRasterImage, format: &str) -> Result<String, JsValue> {
    let format: ContainerFormat = format.parse().map_err(js_error)?;
    encode::encode_base64(&image.to_raster(), format).map_err(js_error)
}

/// Encode an image to JPEG bytes.
///
/// Alpha is dropped. Quality is clamped to 1-100.
///
/// # Example
///
/// ```typescript
/// const jpeg = encode_jpeg(image, 90);
/// await writable.write(new Blob([jpeg], { type: 'image/jpeg' }));
/// ```
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsRasterImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(&image.to_raster(), quality).map_err(js_error)
}
