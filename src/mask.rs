// Builds the binary brush mask handed to the inpainting routines.

use image::{GrayImage, Luma};
use imageproc::drawing::draw_filled_circle_mut;

/// Mask value marking a pixel to fill.
pub const MASK_FILL: u8 = u8::MAX;
/// Mask value marking a pixel to keep.
pub const MASK_KEEP: u8 = 0;

/// Create a `width` x `height` mask with a filled circle of [`MASK_FILL`]
/// centred at `center`.
///
/// Centres outside the image are accepted; the circle is clipped to the
/// mask, so a far-away click yields an all-keep mask. A radius of 0 marks
/// the single centre pixel. Any radius reaching every pixel marks the
/// whole mask, however large it is.
pub fn circle_mask(width: u32, height: u32, center: (i32, i32), radius: u32) -> GrayImage {
    let mut mask = GrayImage::from_pixel(width, height, Luma([MASK_KEEP]));
    if width == 0 || height == 0 {
        return mask;
    }

    let (cx, cy) = (center.0 as i64, center.1 as i64);
    let (last_x, last_y) = (width as i64 - 1, height as i64 - 1);
    let r2 = radius as i128 * radius as i128;

    // Squared distances to the nearest and the farthest pixel of the image.
    let near = dist2(cx.clamp(0, last_x) - cx, cy.clamp(0, last_y) - cy);
    let far = dist2(cx.max(last_x - cx), cy.max(last_y - cy));
    if near > r2 {
        return mask;
    }
    if far <= r2 {
        mask.fill(MASK_FILL);
        return mask;
    }

    // Here radius < farthest distance, so it is bounded by the image size
    // plus the centre offset; only absurd centres can overflow i32.
    let fits = |c: i64| c.abs() + radius as i64 + 1 <= i32::MAX as i64;
    if fits(cx) && fits(cy) {
        draw_filled_circle_mut(&mut mask, center, radius as i32, Luma([MASK_FILL]));
    } else {
        for (x, y, pixel) in mask.enumerate_pixels_mut() {
            if dist2(x as i64 - cx, y as i64 - cy) <= r2 {
                *pixel = Luma([MASK_FILL]);
            }
        }
    }
    mask
}

#[inline]
fn dist2(dx: i64, dy: i64) -> i128 {
    dx as i128 * dx as i128 + dy as i128 * dy as i128
}

/// Number of pixels marked for filling.
pub fn filled_count(mask: &GrayImage) -> usize {
    mask.as_raw().iter().filter(|&&v| v == MASK_FILL).count()
}
