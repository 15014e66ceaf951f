//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a JPEG, PNG or GIF file into an RGBA raster
//! - [`generate_preview`] - Shrink an image to fit a display box
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, generate_preview } from '@imgtools/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const preview = generate_preview(image, 400, 400);
//! ```

use crate::types::{js_error, JsRasterImage};
use imgtools_core::decode::{self, FilterType};
use wasm_bindgen::prelude::*;

/// Decode an image file from bytes.
///
/// The container format is detected from the content. The result is always RGBA.
///
/// # Errors
///
/// Returns an error if the format is not recognized or the data is corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRasterImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsRasterImage::from_raster)
        .map_err(js_error)
}

/// Shrink an image to fit inside `max_width` x `max_height` for display.
///
/// Aspect ratio is preserved and images that already fit are returned
/// unchanged. Uses bilinear filtering.
///
/// # Example
///
/// ```typescript
/// const preview = generate_preview(image, 400, 400);
/// ```
#[wasm_bindgen]
pub fn generate_preview(
    image: &JsRasterImage,
    max_width: u32,
    max_height: u32,
) -> Result<JsRasterImage, JsValue> {
    decode::resize_to_fit(&image.to_raster(), max_width, max_height, FilterType::Bilinear)
        .map(JsRasterImage::from_raster)
        .map_err(js_error)
}


/// WASM-specific tests that require JsValue.
///
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_image_invalid() {
        assert!(decode_image(&[0, 1, 2, 3]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_decode_image_empty() {
        assert!(decode_image(&[]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_generate_preview_landscape() {
        let img = JsRasterImage::new(400, 300, vec![128u8; 400 * 300 * 4], true);
        let preview = generate_preview(&img, 100, 100).unwrap();
        assert_eq!(preview.width(), 100);
        assert_eq!(preview.height(), 75);
        assert!(preview.has_alpha());
    }

    #[wasm_bindgen_test]
    fn test_generate_preview_no_upscale() {
        let img = JsRasterImage::new(50, 20, vec![128u8; 50 * 20 * 3], false);
        let preview = generate_preview(&img, 100, 100).unwrap();
        assert_eq!(preview.width(), 50);
        assert_eq!(preview.height(), 20);
    }

    #[wasm_bindgen_test]
    fn test_generate_preview_zero_box_errors() {
        let img = JsRasterImage::new(50, 20, vec![128u8; 50 * 20 * 3], false);
        assert!(generate_preview(&img, 0, 100).is_err());
    }
}
