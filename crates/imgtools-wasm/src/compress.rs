//! Size-targeted compression WASM bindings.

use crate::types::{js_error, JsRasterImage};
use imgtools_core::compress;
use wasm_bindgen::prelude::*;

/// Outcome of a successful compression.
#[wasm_bindgen]
pub struct JsCompressed {
    image: JsRasterImage,
    jpeg: Vec<u8>,
    quality: i32,
    attempt: usize,
}

#[wasm_bindgen]
impl JsCompressed {
    /// The compressed image decoded back to RGB pixels.
    pub fn image(&self) -> JsRasterImage {
        self.image.clone()
    }

    /// The JPEG bytes that met the budget.
    pub fn jpeg(&self) -> Vec<u8> {
        self.jpeg.clone()
    }

    /// Quality of the successful attempt
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> i32 {
        self.quality
    }

    /// 1-based attempt number
    #[wasm_bindgen(getter)]
    pub fn attempt(&self) -> usize {
        self.attempt
    }
}

/// Compress an image until its JPEG encoding fits in `budget_mb` megabytes.
///
/// # Returns
///
/// `undefined` if the budget could not be met within the attempt limit.
///
/// # Errors
///
/// Returns an error for a zero budget or malformed pixel data.
///
/// # Example
///
/// ```typescript
/// const result = compress_to_size(image, 1);
/// if (result === undefined) {
///   console.warn('Could not compress below 1 MB');
/// }
/// ```
#[wasm_bindgen]
pub fn compress_to_size(
    image: &JsRasterImage,
    budget_mb: u32,
) -> Result<Option<JsCompressed>, JsValue> {
    let result = compress::compress_to_size(&image.to_raster(), budget_mb).map_err(js_error)?;
    Ok(result.map(|c| JsCompressed {
        image: JsRasterImage::from_raster(c.image),
        jpeg: c.jpeg,
        quality: c.quality,
        attempt: c.attempt,
    }))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_compress_zero_budget_errors() {
        let img = JsRasterImage::new(4, 4, vec![0u8; 4 * 4 * 3], false);
        assert!(compress_to_size(&img, 0).is_err());
    }
}
