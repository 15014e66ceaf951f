//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core raster
//! type, handling the conversion between Rust and JavaScript data representations.

use imgtools_core::decode::{PixelFormat, RasterImage};
use wasm_bindgen::prelude::*;

/// A raster image wrapper for JavaScript.
///
/// Pixels are row-major, 3 bytes per pixel (RGB) or 4 bytes per pixel (RGBA)
/// depending on `has_alpha`.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
///
/// The `free()` method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
#[derive(Clone)]
pub struct JsRasterImage {
    width: u32,
    height: u32,
    has_alpha: bool,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Create a new JsRasterImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - Pixel data, row-major
    /// * `has_alpha` - `true` for RGBA (4 bytes per pixel), `false` for RGB
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>, has_alpha: bool) -> JsRasterImage {
        JsRasterImage {
            width,
            height,
            has_alpha,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether pixels carry an alpha channel
    #[wasm_bindgen(getter)]
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsRasterImage {
    pub(crate) fn from_raster(img: RasterImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            has_alpha: img.format.has_alpha(),
            pixels: img.pixels,
        }
    }

    /// Convert to a core RasterImage. Clones the pixel data.
    ///
    /// A buffer whose length does not match the dimensions is passed through
    /// unchanged. Call `RasterImage::validate` before handing it to the
    /// transforms, which index the buffer directly.
    pub(crate) fn to_raster(&self) -> RasterImage {
        RasterImage {
            width: self.width,
            height: self.height,
            format: if self.has_alpha {
                PixelFormat::Rgba
            } else {
                PixelFormat::Rgb
            },
            pixels: self.pixels.clone(),
        }
    }
}

/// Map any displayable core error to a JavaScript string error.
pub(crate) fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
