use crate::model::{Channel, Rect};
use image::RgbaImage;

/// Write a single-channel pixel buffer into one channel lane of `canvas`
/// within `rect`.
///
/// - `src`: row-major, one byte per pixel, `rect.w * rect.h` bytes
/// - `channel`: the RGBA8 lane receiving the bytes; other lanes are untouched
/// - destination texels outside the canvas are skipped
pub fn blit_channel(canvas: &mut RgbaImage, rect: Rect, channel: Channel, src: &[u8]) {
    let (cw, ch) = canvas.dimensions();
    let lane = channel.index();
    for yy in 0..rect.h {
        for xx in 0..rect.w {
            let dx = rect.x + xx;
            let dy = rect.y + yy;
            if dx < cw && dy < ch {
                let texel = canvas.get_pixel_mut(dx, dy);
                texel.0[lane] = src[(yy as usize) * (rect.w as usize) + (xx as usize)];
            }
        }
    }
}

/// Copy a full-color image into `canvas` with its top-left at `rect`,
/// overwriting all four channel lanes.
///
/// - copies the overlap of `rect` and `src` (whichever is smaller)
/// - destination texels outside the canvas are skipped
pub fn blit_rgba(canvas: &mut RgbaImage, rect: Rect, src: &RgbaImage) {
    let (cw, ch) = canvas.dimensions();
    let (sw, sh) = src.dimensions();
    for yy in 0..rect.h.min(sh) {
        for xx in 0..rect.w.min(sw) {
            let dx = rect.x + xx;
            let dy = rect.y + yy;
            if dx < cw && dy < ch {
                let px = *src.get_pixel(xx, yy);
                canvas.put_pixel(dx, dy, px);
            }
        }
    }
}
