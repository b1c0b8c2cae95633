//! Software framebuffer
//! Everything the game draws lands here before it is uploaded to the GPU.

use super::types::{BlendMode, Color, Texture};

/// RGBA framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            Some(Color::new(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]))
        } else {
            None
        }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            let bytes = color.to_bytes();
            self.pixels[idx] = bytes[0];
            self.pixels[idx + 1] = bytes[1];
            self.pixels[idx + 2] = bytes[2];
            self.pixels[idx + 3] = 255;
        }
    }

    /// Set pixel, blending against what is already there
    pub fn set_pixel_blended(&mut self, x: usize, y: usize, color: Color, mode: BlendMode) {
        if mode == BlendMode::Opaque {
            self.set_pixel(x, y, color);
            return;
        }
        if let Some(back) = self.get_pixel(x, y) {
            self.set_pixel(x, y, color.blend(back, mode));
        }
    }

    /// Write a texel using its own blend mode; transparent texels are skipped
    fn plot_texel(&mut self, x: i32, y: i32, texel: Color) {
        if x < 0 || y < 0 || texel.is_transparent() {
            return;
        }
        self.set_pixel_blended(x as usize, y as usize, texel, texel.blend);
    }

    /// Multiply every pixel by `color`
    pub fn tint(&mut self, color: Color) {
        for px in self.pixels.chunks_exact_mut(4) {
            let back = Color::new(px[0], px[1], px[2]);
            let out = color.blend(back, BlendMode::Multiply);
            px[0] = out.r;
            px[1] = out.g;
            px[2] = out.b;
        }
    }

    /// Draw a whole texture with its top-left at (x, y)
    pub fn blit(&mut self, texture: &Texture, x: i32, y: i32) {
        self.blit_region(texture, 0, 0, texture.width, texture.height, x, y);
    }

    /// Draw the `w`x`h` region of `texture` starting at (src_x, src_y) to (dst_x, dst_y).
    /// Source pixels outside the texture are skipped.
    pub fn blit_region(
        &mut self,
        texture: &Texture,
        src_x: i32,
        src_y: i32,
        w: usize,
        h: usize,
        dst_x: i32,
        dst_y: i32,
    ) {
        for row in 0..h as i32 {
            let sy = src_y + row;
            let dy = dst_y + row;
            if sy < 0 || sy as usize >= texture.height || dy < 0 || dy as usize >= self.height {
                continue;
            }
            for col in 0..w as i32 {
                let sx = src_x + col;
                let dx = dst_x + col;
                if sx < 0 || sx as usize >= texture.width || dx < 0 || dx as usize >= self.width {
                    continue;
                }
                self.plot_texel(dx, dy, texture.get(sx as usize, sy as usize));
            }
        }
    }

    /// Bresenham line
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            if x >= 0 && y >= 0 {
                self.set_pixel(x as usize, y as usize, color);
            }
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw a rectangle outline from (x0, y0) to (x1, y1)
    pub fn draw_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let (min_x, max_x) = if x0 < x1 { (x0, x1) } else { (x1, x0) };
        let (min_y, max_y) = if y0 < y1 { (y0, y1) } else { (y1, y0) };

        self.draw_line(min_x, min_y, max_x, min_y, color); // Top
        self.draw_line(max_x, min_y, max_x, max_y, color); // Right
        self.draw_line(max_x, max_y, min_x, max_y, color); // Bottom
        self.draw_line(min_x, max_y, min_x, min_y, color); // Left
    }

    /// Draw a filled rectangle from (x0, y0) to (x1, y1), blending with `color.blend`
    pub fn draw_filled_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let (min_x, max_x) = if x0 < x1 { (x0, x1) } else { (x1, x0) };
        let (min_y, max_y) = if y0 < y1 { (y0, y1) } else { (y1, y0) };

        // Clamp to framebuffer bounds
        let min_x = min_x.max(0);
        let min_y = min_y.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                self.set_pixel_blended(x as usize, y as usize, color, color.blend);
            }
        }
    }
}
