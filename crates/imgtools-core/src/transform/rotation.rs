//! Image rotation with canvas expansion and bicubic interpolation.
//!
//! # Algorithm
//!
//! The rotation uses inverse mapping: for each pixel centre in the output
//! image we compute the source position with an affine matrix and sample it
//! with a bicubic kernel. Positive angles rotate counter-clockwise.
//!
//! For rotation by angle θ the inverse transform is:
//! ```text
//! src_x = cos(θ) * dst_x - sin(θ) * dst_y + c
//! src_y = sin(θ) * dst_x + cos(θ) * dst_y + f
//! ```
//!
//! where `c` and `f` keep the rotation centred on the source image. Matrix
//! coefficients are rounded to 15 decimals so that right angles produce exact
//! zeros instead of `6e-17` residue.
//!
//! Colour channels are interpolated premultiplied by alpha, so transparent
//! neighbours do not bleed their stored colour into visible edges.

use crate::decode::{PixelFormat, RasterImage};

/// Angles closer than this to a right angle take the exact transpose path.
const RIGHT_ANGLE_EPSILON: f64 = 1e-9;

/// Inverse affine matrix `(a, b, c, d, e, f)` mapping output to source coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Affine {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Affine {
    #[inline]
    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.b * y + self.c,
            self.d * x + self.e * y + self.f,
        )
    }
}

#[inline]
fn round15(v: f64) -> f64 {
    (v * 1e15).round() / 1e15
}

/// Normalize an angle into [0, 360).
pub fn normalize_angle(angle_degrees: f64) -> f64 {
    let normalized = angle_degrees.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Right-angle rotations that are performed as exact pixel transposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RightAngle {
    Zero,
    Ccw90,
    Half,
    Ccw270,
}

fn right_angle(normalized: f64) -> Option<RightAngle> {
    let near = |target: f64| (normalized - target).abs() < RIGHT_ANGLE_EPSILON;
    if near(0.0) || near(360.0) {
        Some(RightAngle::Zero)
    } else if near(90.0) {
        Some(RightAngle::Ccw90)
    } else if near(180.0) {
        Some(RightAngle::Half)
    } else if near(270.0) {
        Some(RightAngle::Ccw270)
    } else {
        None
    }
}

/// Build the centred inverse matrix and the expanded output size.
fn expanded_transform(width: u32, height: u32, angle_degrees: f64) -> (Affine, u32, u32) {
    let (w, h) = (width as f64, height as f64);
    let rad = -angle_degrees.to_radians();

    let mut m = Affine {
        a: round15(rad.cos()),
        b: round15(rad.sin()),
        c: 0.0,
        d: round15(-rad.sin()),
        e: round15(rad.cos()),
        f: 0.0,
    };

    // Rotate around the image centre
    let (cx, cy) = (w / 2.0, h / 2.0);
    let (c, f) = m.apply(-cx, -cy);
    m.c = c + cx;
    m.f = f + cy;

    // Bounding box of the transformed corners
    let corners = [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)];
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for (x, y) in corners {
        let (tx, ty) = m.apply(x, y);
        min_x = min_x.min(tx);
        max_x = max_x.max(tx);
        min_y = min_y.min(ty);
        max_y = max_y.max(ty);
    }
    let new_w = (max_x.ceil() - min_x.floor()).max(1.0);
    let new_h = (max_y.ceil() - min_y.floor()).max(1.0);

    // Shift so the expanded canvas stays centred on the source
    let (c, f) = m.apply(-(new_w - w) / 2.0, -(new_h - h) / 2.0);
    m.c = c;
    m.f = f;

    (m, new_w as u32, new_h as u32)
}

/// Compute the canvas size needed to hold an image rotated by `angle_degrees`
/// without clipping.
///
/// The size is the integer span of the rotated corners: `ceil(max) - floor(min)`
/// on each axis. Right angles swap or keep the dimensions exactly.
pub fn rotated_canvas_size(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let normalized = normalize_angle(angle_degrees);
    match right_angle(normalized) {
        Some(RightAngle::Zero) | Some(RightAngle::Half) => (width, height),
        Some(RightAngle::Ccw90) | Some(RightAngle::Ccw270) => (height, width),
        None => {
            let (_, w, h) = expanded_transform(width, height, normalized);
            (w, h)
        }
    }
}

/// Rotate an image counter-clockwise around its centre, expanding the canvas.
///
/// The output is always RGBA; areas not covered by the source are fully
/// transparent. Right angles are exact transposes with no resampling.
pub fn rotate_expand(image: &RasterImage, angle_degrees: f64) -> RasterImage {
    let src = image.to_rgba();
    let normalized = normalize_angle(angle_degrees);

    if src.is_empty() {
        return src;
    }

    match right_angle(normalized) {
        Some(RightAngle::Zero) => src,
        Some(RightAngle::Ccw90) => {
            let (w, h) = (src.width, src.height);
            remap(&src, h, w, |x, y| (w - 1 - y, x))
        }
        Some(RightAngle::Half) => {
            let (w, h) = (src.width, src.height);
            remap(&src, w, h, |x, y| (w - 1 - x, h - 1 - y))
        }
        Some(RightAngle::Ccw270) => {
            let (w, h) = (src.width, src.height);
            remap(&src, h, w, |x, y| (y, h - 1 - x))
        }
        None => rotate_bicubic(&src, normalized),
    }
}

/// Copy pixels into a new RGBA image using an exact coordinate mapping.
fn remap<F>(src: &RasterImage, width: u32, height: u32, source_of: F) -> RasterImage
where
    F: Fn(u32, u32) -> (u32, u32),
{
    let mut output = vec![0u8; width as usize * height as usize * 4];
    for y in 0..height {
        for x in 0..width {
            let (sx, sy) = source_of(x, y);
            let src_idx = (sy as usize * src.width as usize + sx as usize) * 4;
            let dst_idx = (y as usize * width as usize + x as usize) * 4;
            output[dst_idx..dst_idx + 4].copy_from_slice(&src.pixels[src_idx..src_idx + 4]);
        }
    }
    RasterImage::new(width, height, PixelFormat::Rgba, output)
}

fn rotate_bicubic(src: &RasterImage, angle_degrees: f64) -> RasterImage {
    let (matrix, dst_w, dst_h) = expanded_transform(src.width, src.height, angle_degrees);
    let premultiplied = premultiply(&src.pixels);

    let (src_w, src_h) = (src.width as f64, src.height as f64);
    let mut output = vec![0u8; dst_w as usize * dst_h as usize * 4];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            // Sample at pixel centres
            let (src_x, src_y) = matrix.apply(dst_x as f64 + 0.5, dst_y as f64 + 0.5);
            if src_x < 0.0 || src_x >= src_w || src_y < 0.0 || src_y >= src_h {
                continue;
            }

            let pixel = sample_bicubic(&premultiplied, src.width, src.height, src_x, src_y);
            let dst_idx = (dst_y as usize * dst_w as usize + dst_x as usize) * 4;
            output[dst_idx..dst_idx + 4].copy_from_slice(&unpremultiply_pixel(pixel));
        }
    }

    RasterImage::new(dst_w, dst_h, PixelFormat::Rgba, output)
}

/// Multiply colour channels by alpha with rounding: `c * a / 255`.
fn premultiply(pixels: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixels.len());
    for px in pixels.chunks_exact(4) {
        let alpha = px[3] as u32;
        for &c in &px[..3] {
            out.push(mul_div_255(c as u32, alpha));
        }
        out.push(px[3]);
    }
    out
}

#[inline]
fn mul_div_255(a: u32, b: u32) -> u8 {
    let tmp = a * b + 128;
    (((tmp >> 8) + tmp) >> 8) as u8
}

/// Undo premultiplication. Opaque and fully transparent pixels pass through.
#[inline]
fn unpremultiply_pixel(px: [u8; 4]) -> [u8; 4] {
    let alpha = px[3] as u32;
    if alpha == 0 || alpha == 255 {
        return px;
    }
    let scale = |c: u8| ((255 * c as u32) / alpha).min(255) as u8;
    [scale(px[0]), scale(px[1]), scale(px[2]), px[3]]
}

/// Cubic convolution through four samples at fractional offset `d` between
/// `v2` and `v3`.
#[inline]
fn cubic(v1: f64, v2: f64, v3: f64, v4: f64, d: f64) -> f64 {
    let p1 = v2;
    let p2 = -v1 + v3;
    let p3 = 2.0 * (v1 - v2) + v3 - v4;
    let p4 = -v1 + v2 - v3 + v4;
    p1 + d * (p2 + d * (p3 + d * p4))
}

/// Sample a 4x4 neighbourhood with edge clamping.
fn sample_bicubic(pixels: &[u8], width: u32, height: u32, x: f64, y: f64) -> [u8; 4] {
    let x = x - 0.5;
    let y = y - 0.5;
    let x0 = x.floor();
    let y0 = y.floor();
    let dx = x - x0;
    let dy = y - y0;
    let x0 = x0 as i64 - 1;
    let y0 = y0 as i64 - 1;

    let clamp_x = |v: i64| v.clamp(0, width as i64 - 1) as usize;
    let clamp_y = |v: i64| v.clamp(0, height as i64 - 1) as usize;
    let xs = [clamp_x(x0), clamp_x(x0 + 1), clamp_x(x0 + 2), clamp_x(x0 + 3)];

    let mut result = [0u8; 4];
    for (channel, out) in result.iter_mut().enumerate() {
        let mut rows = [0.0f64; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            let py = clamp_y(y0 + i as i64);
            let at = |px: usize| pixels[(py * width as usize + px) * 4 + channel] as f64;
            *row = cubic(at(xs[0]), at(xs[1]), at(xs[2]), at(xs[3]), dx);
        }
        let v = cubic(rows[0], rows[1], rows[2], rows[3], dy);
        *out = if v <= 0.0 {
            0
        } else if v >= 255.0 {
            255
        } else {
            v as u8
        };
    }

    result
}
