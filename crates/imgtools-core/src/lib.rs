//! Image Factory Core - Image transformation library
//!
//! This crate provides the processing behind Image Factory: rotation
//! animation frames with optional bounding-box crop, size-targeted JPEG
//! compression, Base64 export, and a configurable step pipeline that ties
//! them together.

pub mod compress;
pub mod decode;
pub mod encode;
pub mod pipeline;
pub mod transform;

pub use compress::{compress_to_size, CompressError, Compressed};
pub use decode::{decode_image, open_image, DecodeError, PixelFormat, RasterImage};
pub use encode::{encode_base64, Base64Export, ContainerFormat, EncodeError};
pub use pipeline::{run_pipeline, PipelineError, PipelineOutput, Preview, Session, Step};
pub use transform::{rotate_frame, rotation_frames};
