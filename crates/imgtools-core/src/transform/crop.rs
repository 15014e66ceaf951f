//! Bounding-box detection and pixel-rectangle cropping.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - Boxes are half-open: `left..right` and `top..bottom`

use crate::decode::RasterImage;

/// Pixel rectangle with exclusive right and bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    /// Width of the box in pixels.
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    /// Height of the box in pixels.
    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// Box covering an entire `width` x `height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            top: 0,
            right: width,
            bottom: height,
        }
    }
}

/// Find the smallest box enclosing every pixel that differs from a fully
/// transparent (all-zero) pixel.
///
/// Returns `None` when the whole image is transparent black.
pub fn bounding_box(image: &RasterImage) -> Option<BoundingBox> {
    let channels = image.format.channels();
    let width = image.width as usize;
    if width == 0 || image.height == 0 {
        return None;
    }

    let mut bbox: Option<BoundingBox> = None;

    for (y, row) in image.pixels.chunks_exact(width * channels).enumerate() {
        let mut first = None;
        let mut last = 0;
        for (x, px) in row.chunks_exact(channels).enumerate() {
            if px.iter().any(|&c| c != 0) {
                first.get_or_insert(x);
                last = x;
            }
        }

        if let Some(first) = first {
            let (y, first, last) = (y as u32, first as u32, last as u32);
            bbox = Some(match bbox {
                None => BoundingBox {
                    left: first,
                    top: y,
                    right: last + 1,
                    bottom: y + 1,
                },
                Some(b) => BoundingBox {
                    left: b.left.min(first),
                    top: b.top,
                    right: b.right.max(last + 1),
                    bottom: y + 1,
                },
            });
        }
    }

    bbox
}

/// Copy the pixels inside `bbox` into a new image of the same format.
///
/// The box is clamped to the image bounds; an empty intersection yields a
/// zero-sized image.
pub fn crop_to_box(image: &RasterImage, bbox: BoundingBox) -> RasterImage {
    // Fast path: full box returns a clone
    if bbox == BoundingBox::full(image.width, image.height) {
        return image.clone();
    }

    let channels = image.format.channels();
    let right = bbox.right.min(image.width);
    let bottom = bbox.bottom.min(image.height);
    let left = bbox.left.min(right);
    let top = bbox.top.min(bottom);
    let out_width = (right - left) as usize;
    let out_height = (bottom - top) as usize;

    let mut output = Vec::with_capacity(out_width * out_height * channels);

    // Copy pixel data row by row
    let src_stride = image.width as usize * channels;
    for y in top as usize..bottom as usize {
        let start = y * src_stride + left as usize * channels;
        output.extend_from_slice(&image.pixels[start..start + out_width * channels]);
    }

    RasterImage::new(out_width as u32, out_height as u32, image.format, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::PixelFormat;

    /// Transparent RGBA image with an opaque rectangle.
    fn with_rect(width: u32, height: u32, rect: BoundingBox) -> RasterImage {
        let mut img = RasterImage::transparent(width, height);
        for y in rect.top..rect.bottom {
            for x in rect.left..rect.right {
                let idx = (y as usize * width as usize + x as usize) * 4;
                img.pixels[idx..idx + 4].copy_from_slice(&[255, 0, 0, 255]);
            }
        }
        img
    }

    #[test]
    fn test_bounding_box_of_rect() {
        let rect = BoundingBox {
            left: 3,
            top: 2,
            right: 7,
            bottom: 5,
        };
        let img = with_rect(10, 8, rect);
        assert_eq!(bounding_box(&img), Some(rect));
    }

    #[test]
    fn test_bounding_box_transparent_is_none() {
        let img = RasterImage::transparent(10, 10);
        assert_eq!(bounding_box(&img), None);
    }

    #[test]
    fn test_bounding_box_counts_colour_in_transparent_pixels() {
        let mut img = RasterImage::transparent(4, 4);
        // Colour stored under zero alpha still differs from transparent black
        img.pixels[(2 * 4 + 1) * 4] = 9;
        assert_eq!(
            bounding_box(&img),
            Some(BoundingBox {
                left: 1,
                top: 2,
                right: 2,
                bottom: 3
            })
        );
    }

    #[test]
    fn test_bounding_box_full_opaque() {
        let img = RasterImage::new(6, 4, PixelFormat::Rgb, vec![1u8; 6 * 4 * 3]);
        assert_eq!(bounding_box(&img), Some(BoundingBox::full(6, 4)));
    }

    #[test]
    fn test_bounding_box_disjoint_pixels() {
        let mut img = RasterImage::transparent(10, 10);
        img.pixels[(10 + 8) * 4 + 3] = 255;
        img.pixels[(7 * 10 + 2) * 4 + 3] = 255;
        assert_eq!(
            bounding_box(&img),
            Some(BoundingBox {
                left: 2,
                top: 1,
                right: 9,
                bottom: 8
            })
        );
    }

    #[test]
    fn test_crop_to_box() {
        let rect = BoundingBox {
            left: 2,
            top: 1,
            right: 5,
            bottom: 4,
        };
        let img = with_rect(8, 6, rect);
        let cropped = crop_to_box(&img, rect);

        assert_eq!(cropped.dimensions(), (3, 3));
        assert!(cropped
            .pixels
            .chunks_exact(4)
            .all(|px| px == [255, 0, 0, 255]));
    }

    #[test]
    fn test_crop_full_box_is_clone() {
        let img = with_rect(5, 5, BoundingBox::full(5, 5));
        assert_eq!(crop_to_box(&img, BoundingBox::full(5, 5)), img);
    }

    #[test]
    fn test_crop_clamps_to_bounds() {
        let img = RasterImage::new(4, 4, PixelFormat::Rgb, vec![5u8; 48]);
        let cropped = crop_to_box(
            &img,
            BoundingBox {
                left: 2,
                top: 2,
                right: 10,
                bottom: 10,
            },
        );
        assert_eq!(cropped.dimensions(), (2, 2));
        assert_eq!(cropped.format, PixelFormat::Rgb);
    }

    #[test]
    fn test_crop_is_idempotent_on_tight_content() {
        let rect = BoundingBox {
            left: 1,
            top: 3,
            right: 9,
            bottom: 6,
        };
        let img = with_rect(12, 9, rect);
        let once = crop_to_box(&img, bounding_box(&img).unwrap());
        let bbox = bounding_box(&once).unwrap();

        assert_eq!(bbox, BoundingBox::full(once.width, once.height));
        assert_eq!(crop_to_box(&once, bbox), once);
    }
}
