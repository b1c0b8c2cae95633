//! Built-in 3x5 pixel font
//!
//! Each glyph is five rows of three bits, most significant bit on the left.
//! Glyphs are drawn as `scale`-sized squares straight into the framebuffer.

use crate::rasterizer::{Color, Framebuffer};

pub const GLYPH_WIDTH: usize = 3;
pub const GLYPH_HEIGHT: usize = 5;
/// Blank columns between glyphs, before scaling
const SPACING: usize = 1;

fn glyph(c: char) -> Option<[u8; GLYPH_HEIGHT]> {
    let rows = match c.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        ' ' => [0b000; GLYPH_HEIGHT],
        _ => return None,
    };
    Some(rows)
}

/// Pixel font at a fixed integer scale
#[derive(Debug, Clone, Copy)]
pub struct GlyphFont {
    pub scale: usize,
}

impl GlyphFont {
    pub const fn new(scale: usize) -> Self {
        Self { scale }
    }

    /// Height of a line in pixels
    pub fn line_height(&self) -> usize {
        GLYPH_HEIGHT * self.scale
    }

    /// Width of `text` in pixels. Unknown characters still take a cell.
    pub fn text_width(&self, text: &str) -> usize {
        let n = text.chars().count();
        if n == 0 {
            return 0;
        }
        (n * (GLYPH_WIDTH + SPACING) - SPACING) * self.scale
    }

    /// Draw `text` with its top-left at (x, y). Unknown characters draw as blanks.
    pub fn put_text(&self, fb: &mut Framebuffer, text: &str, x: i32, y: i32, color: Color) {
        let s = self.scale as i32;
        let advance = ((GLYPH_WIDTH + SPACING) * self.scale) as i32;

        for (i, c) in text.chars().enumerate() {
            let Some(rows) = glyph(c) else { continue };
            let gx = x + i as i32 * advance;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    let px = gx + col as i32 * s;
                    let py = y + row as i32 * s;
                    fb.draw_filled_rect(px, py, px + s - 1, py + s - 1, color);
                }
            }
        }
    }
}

impl Default for GlyphFont {
    fn default() -> Self {
        Self::new(4)
    }
}
