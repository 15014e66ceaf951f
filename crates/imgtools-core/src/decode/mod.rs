//! Image model, decoding and resizing.
//!
//! This module provides:
//! - [`RasterImage`], the in-memory raster every operation consumes and returns
//! - Decoding of any format the `image` crate supports into RGBA
//! - Resizing for compression passes and UI previews
//!
//! # Examples
//!
//! ```ignore
//! use imgtools_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod load;
mod resize;
mod types;

pub use load::{decode_image, open_image};
pub use resize::{resize, resize_to_fit};
pub use types::{DecodeError, FilterType, PixelFormat, RasterImage};
