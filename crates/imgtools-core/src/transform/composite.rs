//! Alpha-masked pasting of one RGBA image onto another.

use crate::decode::RasterImage;

/// `(a * (255 - m) + b * m) / 255`, rounded.
#[inline]
fn blend(dst: u8, src: u8, mask: u8) -> u8 {
    let m = mask as u32;
    let tmp = dst as u32 * (255 - m) + src as u32 * m + 128;
    (((tmp >> 8) + tmp) >> 8) as u8
}

/// Paste `overlay` onto `canvas` with its top-left corner at `(x, y)`, using
/// the overlay's own alpha channel as the mask.
///
/// Every channel of the canvas, alpha included, is blended towards the
/// overlay by the mask value, so a semi-transparent overlay pixel on an empty
/// canvas ends up with alpha `a * a / 255`. Offsets may be negative; whatever
/// falls outside the canvas is clipped.
///
/// Both images must be RGBA.
pub fn paste_with_alpha(canvas: &mut RasterImage, overlay: &RasterImage, x: i64, y: i64) {
    debug_assert!(canvas.format.has_alpha() && overlay.format.has_alpha());

    let (cw, ch) = (canvas.width as i64, canvas.height as i64);
    let (ow, oh) = (overlay.width as i64, overlay.height as i64);

    // Intersection in canvas coordinates
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + ow).min(cw);
    let y1 = (y + oh).min(ch);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for cy in y0..y1 {
        let oy = cy - y;
        for cx in x0..x1 {
            let ox = cx - x;
            let src_idx = ((oy * ow + ox) * 4) as usize;
            let dst_idx = ((cy * cw + cx) * 4) as usize;

            let mask = overlay.pixels[src_idx + 3];
            match mask {
                0 => {}
                255 => {
                    canvas.pixels[dst_idx..dst_idx + 4]
                        .copy_from_slice(&overlay.pixels[src_idx..src_idx + 4]);
                }
                _ => {
                    for c in 0..4 {
                        canvas.pixels[dst_idx + c] =
                            blend(canvas.pixels[dst_idx + c], overlay.pixels[src_idx + c], mask);
                    }
                }
            }
        }
    }
}
