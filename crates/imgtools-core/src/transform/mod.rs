//! Image transformation operations: rotation, bounding-box crop and
//! alpha-masked compositing.
//!
//! # Frame Rendering Order
//!
//! A rotation frame is produced in this order:
//! 1. Rotate with canvas expansion (bicubic)
//! 2. Optional crop to the non-transparent bounding box
//! 3. Centre on a transparent canvas of the source size
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = counter-clockwise
//! - Crop boxes are pixel rectangles with exclusive right/bottom edges
//! - Origin is top-left corner

mod composite;
mod crop;
mod frame;
mod rotation;

pub use composite::paste_with_alpha;
pub use crop::{bounding_box, crop_to_box, BoundingBox};
pub use frame::{frame_angles, rotate_frame, rotation_frames};
pub use rotation::{normalize_angle, rotate_expand, rotated_canvas_size};
