//! Image Factory WASM - WebAssembly bindings for Image Factory
//!
//! This crate provides WASM bindings to expose the imgtools-core functionality
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding and display previews
//! - `transform` - Rotation frames and GIF animation
//! - `compress` - Size-targeted JPEG compression
//! - `encode` - Base64 and JPEG encoding
//! - `pipeline` - Session configuration and pipeline execution
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, JsSession, run_pipeline } from '@imgtools/wasm';
//!
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const session = new JsSession();
//! session.rotate_enabled = true;
//! const result = run_pipeline(image, session);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod decode;
mod encode;
mod pipeline;
mod transform;
mod types;

// Re-export public types
pub use compress::{compress_to_size, JsCompressed};
pub use decode::{decode_image, generate_preview};
pub use encode::{encode_base64, encode_jpeg};
pub use pipeline::{run_pipeline, JsPipelineResult, JsSession};
pub use transform::{rotate_frame, rotation_frames};
pub use types::JsRasterImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
