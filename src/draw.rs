// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the layer you are painting on, over a checkerboard.
// 2) A square outline that follows your mouse (the brush footprint).
// 3) A tiny 5x7 bitmap font to render HUD text on top of the canvas.

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::error::{Error, Result};
use crate::input::{BrushCommand, InputEvent, InputSource, PointerTracker};
use crate::types::{FrameBuffer, Layer, Point, Rect};

const CHECKER_CELL: usize = 8; // checkerboard square size in screen pixels
const CHECKER_LIGHT: u32 = 0x00_CC_CC_CC;
const CHECKER_DARK: u32 = 0x00_99_99_99;

pub struct Drawer {
    window: Window,       // the on-screen window you see
    window_size: (usize, usize),
    canvas_size: (usize, usize),
    pointer: PointerTracker,
}

impl Drawer {
    /// Create a window of `window_size` showing a canvas of `canvas_size`.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, window_size: (usize, usize), canvas_size: (usize, usize)) -> Result<Self> {
        let mut window = Window::new(title, window_size.0, window_size.1, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self {
            window,
            window_size,
            canvas_size,
            pointer: PointerTracker::default(),
        })
    }

    pub fn window_size(&self) -> (usize, usize) {
        self.window_size
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new image.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<()> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse position in canvas pixels, even when it hangs off the window edge.
    pub fn hover(&self) -> Option<Point> {
        self.window
            .get_mouse_pos(MouseMode::Pass)
            .map(|pos| map_to_canvas(pos, self.window_size, self.canvas_size))
    }

    fn pressed(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }

    fn pressed_repeating(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::Yes)
    }
}

impl InputSource for Drawer {
    /// Mouse first (so a click lands before any shortcut), then keys.
    fn poll_events(&mut self, out: &mut Vec<InputEvent>) {
        let button = self.window.get_mouse_down(MouseButton::Left);
        let pos = self.hover();
        if let Some(event) = self.pointer.update(button, pos) {
            out.push(event);
        }

        if self.pressed(Key::Tab) {
            out.push(InputEvent::ToggleLayer);
        }
        if self.pressed(Key::I) {
            out.push(InputEvent::SwitchLayer(Layer::Image));
        }
        if self.pressed(Key::M) {
            out.push(InputEvent::SwitchLayer(Layer::Mask));
        }
        if self.pressed_repeating(Key::Equal) || self.pressed_repeating(Key::NumPadPlus) {
            out.push(InputEvent::Brush(BrushCommand::Increase));
        }
        if self.pressed_repeating(Key::Minus) || self.pressed_repeating(Key::NumPadMinus) {
            out.push(InputEvent::Brush(BrushCommand::Decrease));
        }
        if self.pressed(Key::Key0) {
            out.push(InputEvent::Brush(BrushCommand::Reset));
        }
        if self.pressed_repeating(Key::Z) {
            out.push(InputEvent::Undo);
        }
        if self.pressed_repeating(Key::Y) {
            out.push(InputEvent::Redo);
        }
    }
}

/* ---------- Screen <-> canvas mapping ---------- */

/// Map a window position to canvas pixels: round(pos * canvas / window).
pub fn map_to_canvas(pos: (f32, f32), window: (usize, usize), canvas: (usize, usize)) -> Point {
    let sx = canvas.0 as f32 / window.0.max(1) as f32;
    let sy = canvas.1 as f32 / window.1.max(1) as f32;
    Point::new((pos.0 * sx).round() as i32, (pos.1 * sy).round() as i32)
}

/// Scale a canvas rect up/down to window pixels (inclusive corners, for outlines).
pub fn rect_to_window(rect: Rect, window: (usize, usize), canvas: (usize, usize)) -> (i32, i32, i32, i32) {
    let sx = window.0 as f32 / canvas.0.max(1) as f32;
    let sy = window.1 as f32 / canvas.1.max(1) as f32;
    let x0 = (rect.x as f32 * sx).floor() as i32;
    let y0 = (rect.y as f32 * sy).floor() as i32;
    let x1 = (((rect.x as f32 + rect.width as f32) * sx).ceil() as i32).saturating_sub(1);
    let y1 = (((rect.y as f32 + rect.height as f32) * sy).ceil() as i32).saturating_sub(1);
    (x0, y0, x1.max(x0), y1.max(y0))
}

/* ---------- Layer view ---------- */

/// Render `layer` into `screen` (nearest-neighbour resize), over a checkerboard.
/// Visual: cleared pixels show the checkerboard, untouched pixels show the picture.
pub fn compose_view(layer: &FrameBuffer, screen: &mut FrameBuffer) {
    if layer.width == 0 || layer.height == 0 {
        return;
    }
    for oy in 0..screen.height {
        let sy = oy * layer.height / screen.height.max(1);
        for ox in 0..screen.width {
            let sx = ox * layer.width / screen.width.max(1);
            let src = layer.pixels[sy * layer.width + sx];
            let bg = if (ox / CHECKER_CELL + oy / CHECKER_CELL) % 2 == 0 {
                CHECKER_LIGHT
            } else {
                CHECKER_DARK
            };
            screen.pixels[oy * screen.width + ox] = blend_over(src, bg);
        }
    }
}

/// Source-over of a 0xAARRGGBB pixel onto an opaque 0x00RRGGBB background.
#[inline]
fn blend_over(src: u32, bg: u32) -> u32 {
    let a = src >> 24;
    match a {
        0 => bg,
        255 => src & 0x00FF_FFFF,
        _ => {
            let inv = 255 - a;
            let mix = |shift: u32| {
                let s = (src >> shift) & 0xFF;
                let b = (bg >> shift) & 0xFF;
                ((s * a + b * inv + 127) / 255) << shift
            };
            mix(16) | mix(8) | mix(0)
        }
    }
}

/* ---------- Software drawing: pixels, brush outline, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
/// Visual: the exact pixel at (x,y) changes color.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
/// Visual: a straight 1-pixel line appears on top of the canvas.
fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Outline the brush footprint; corners are inclusive window pixels.
/// Visual: a hollow square shows exactly which pixels the next dab will move.
/// Corners far off screen are pulled in to one pixel past the edge, so the hidden
/// sides stay hidden and the line walks stay short.
pub fn draw_brush_outline(fb: &mut FrameBuffer, corners: (i32, i32, i32, i32), color: u32) {
    let w = i32::try_from(fb.width).unwrap_or(i32::MAX);
    let h = i32::try_from(fb.height).unwrap_or(i32::MAX);
    let cx = |x: i32| x.clamp(-1, w);
    let cy = |y: i32| y.clamp(-1, h);
    let (x0, y0, x1, y1) = (cx(corners.0), cy(corners.1), cx(corners.2), cy(corners.3));
    draw_line(fb, x0, y0, x1, y0, color);
    draw_line(fb, x1, y0, x1, y1, color);
    draw_line(fb, x1, y1, x0, y1, color);
    draw_line(fb, x0, y1, x0, y0, color);
}

/* ---------- 5x7 bitmap font (ASCII subset for "IMAGE | BRUSH 15 | STROKE 3/7") ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Uppercase letters the HUD uses
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'D' => g!(0b11110,0b10001,0b10001,0b10001,0b10001,0b10001,0b11110),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),

        // Punctuation: space, vertical bar, slash, dot
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y).
/// Visual: a tiny glyph appears with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        // Shadow pass first, then the glyph itself on top
        for (dx, dy, c) in [(1, 1, 0x00000000), (0, 0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_pixel(fb, x + rx as i32 + dx, y + ry as i32 + dy, c);
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
/// Visual: a compact HUD string appears; each glyph is 5x7 with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_is_identity_at_zoom_one() {
        assert_eq!(map_to_canvas((12.0, 7.0), (100, 50), (100, 50)), Point::new(12, 7));
    }

    #[test]
    fn mapping_rounds_through_the_zoom() {
        // window twice the canvas: 15 screen px -> 7.5 -> 8
        assert_eq!(map_to_canvas((15.0, 4.0), (200, 100), (100, 50)), Point::new(8, 2));
        // pointer left of the window stays negative so the brush can overhang
        assert_eq!(map_to_canvas((-6.0, 0.0), (200, 100), (100, 50)), Point::new(-3, 0));
    }

    #[test]
    fn rect_outline_scales_with_zoom() {
        let r = Rect::new(2, 3, 4, 4);
        assert_eq!(rect_to_window(r, (10, 10), (10, 10)), (2, 3, 5, 6));
        assert_eq!(rect_to_window(r, (20, 20), (10, 10)), (4, 6, 11, 13));
    }

    #[test]
    fn blend_over_extremes() {
        assert_eq!(blend_over(0x0012_3456, CHECKER_DARK), CHECKER_DARK);
        assert_eq!(blend_over(0xFF12_3456, CHECKER_DARK), 0x0012_3456);
        assert_eq!(blend_over(0x80FF_FFFF, 0x0000_0000), 0x0080_8080);
    }

    #[test]
    fn compose_shows_checkerboard_where_cleared() {
        let mut layer = FrameBuffer::filled(2, 1, 0xFF10_2030);
        layer.pixels[1] = 0;
        let mut screen = FrameBuffer::new(2 * CHECKER_CELL, CHECKER_CELL);
        compose_view(&layer, &mut screen);
        assert_eq!(screen.pixels[0], 0x0010_2030);
        // right half maps to the cleared pixel; first cell there is dark
        assert_eq!(screen.pixels[CHECKER_CELL], CHECKER_DARK);
    }

    #[test]
    fn outline_touches_all_four_corners() {
        let mut fb = FrameBuffer::new(6, 6);
        draw_brush_outline(&mut fb, (1, 1, 4, 4), 7);
        for (x, y) in [(1, 1), (4, 1), (1, 4), (4, 4)] {
            assert_eq!(fb.get(x, y), Some(7));
        }
        assert_eq!(fb.get(2, 2), Some(0));
    }

    #[test]
    fn outline_of_a_huge_rect_only_draws_visible_sides() {
        let mut fb = FrameBuffer::new(6, 6);
        let corners = rect_to_window(Rect::new(i32::MIN, 2, u32::MAX, 2), (6, 6), (6, 6));
        draw_brush_outline(&mut fb, corners, 7);
        assert_eq!(fb.get(0, 2), Some(7));
        assert_eq!(fb.get(5, 3), Some(7));
        assert_eq!(fb.get(3, 0), Some(0));
    }

    #[test]
    fn every_hud_character_has_a_glyph() {
        for ch in "IMAGE MASK | BRUSH 0123456789 | STROKE 3/7 PAINTING UNDO REDO.".chars() {
            assert!(glyph5x7(ch).is_some(), "missing glyph for {ch:?}");
        }
    }
}
