// Loads the picture you paint over and turns it into the source buffer.
// Visual expectation: the picture sits centred on a 16:7 canvas; any leftover
// band above/below or left/right is transparent (shows as checkerboard).

use std::path::Path;

use image::RgbaImage;
use tracing::info;

use crate::error::{Error, Result};
use crate::types::FrameBuffer;

/// Canvas width:height every picture is letterboxed into.
pub const CANVAS_ASPECT: (u32, u32) = (16, 7);

/// Decode `path` (PNG, JPEG, ...) and letterbox it into the canvas.
pub fn load_source(path: &Path) -> Result<FrameBuffer> {
    // 1) Decode whatever format the file is in, then normalise to RGBA8.
    let rgba = image::open(path)?.to_rgba8();

    // 2) A zero-sized picture would give a zero-sized canvas; nothing to paint on.
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(Error::EmptyImage { path: path.to_path_buf() });
    }

    // 3) Centre it on the canvas.
    let canvas = letterbox(&rgba);
    info!(
        path = %path.display(),
        image_w = rgba.width(),
        image_h = rgba.height(),
        canvas_w = canvas.width,
        canvas_h = canvas.height,
        "image loaded"
    );
    Ok(canvas)
}

/// Canvas size for a `width` x `height` picture.
/// Wider than 16:7 keeps the width and grows the height; otherwise keeps the height.
pub fn canvas_size(width: u32, height: u32) -> (u32, u32) {
    let (aw, ah) = CANVAS_ASPECT;
    let (w, h) = (u64::from(width), u64::from(height));
    let (aw, ah) = (u64::from(aw), u64::from(ah));
    if w * ah > h * aw {
        (width, (w * ah / aw) as u32)
    } else {
        ((h * aw / ah) as u32, height)
    }
}

/// Pack the picture into a transparent canvas of `canvas_size`, centred.
pub fn letterbox(img: &RgbaImage) -> FrameBuffer {
    let (cw, ch) = canvas_size(img.width(), img.height());
    let mut out = FrameBuffer::new(cw as usize, ch as usize);

    let off_x = ((cw - img.width()) / 2) as usize;
    let off_y = ((ch - img.height()) / 2) as usize;

    for (x, y, pixel) in img.enumerate_pixels() {
        // Each `pixel` is Rgba<u8>. We pack it as 0xAARRGGBB.
        let [r, g, b, a] = pixel.0;
        let idx = (y as usize + off_y) * out.width + (x as usize + off_x);
        out.pixels[idx] = pack_argb(r, g, b, a);
    }
    out
}

#[inline]
pub fn pack_argb(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}
