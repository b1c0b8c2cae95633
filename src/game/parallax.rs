//! Parallax background layers
//!
//! Each layer scrolls at `factor` times the camera speed, so a smaller
//! factor reads as further away. Layers are scaled once when built and
//! tiled horizontally and vertically when drawn.

use macroquad::math::Vec2;

use super::camera::Camera;
use crate::rasterizer::{Framebuffer, Texture};

pub struct ParallaxLayer {
    texture: Texture,
    /// Scroll speed relative to the camera, in (0, 1]
    pub factor: f32,
    pub width: usize,
    pub height: usize,
}

impl ParallaxLayer {
    /// Build a layer sized so a camera clamped to a `map_width`x`map_height`
    /// map never reaches its edge
    pub fn new(texture: &Texture, factor: f32, camera: &Camera, map_width: f32, map_height: f32) -> Self {
        let factor = factor.clamp(f32::EPSILON, 1.0);
        let span = |view: f32, map: f32| (view + (map - view).max(0.0) * factor).ceil().max(1.0) as usize;
        let width = span(camera.view.x, map_width);
        let height = span(camera.view.y, map_height);

        Self {
            texture: texture.scaled(width, height),
            factor,
            width,
            height,
        }
    }

    /// Where the layer's origin lands on screen for this camera
    pub fn screen_offset(&self, camera: &Camera) -> Vec2 {
        -camera.position * self.factor
    }

    pub fn render(&self, fb: &mut Framebuffer, camera: &Camera) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let offset = self.screen_offset(camera);
        let (w, h) = (self.width as i32, self.height as i32);
        // Rounded like the map view and sprites
        let start_x = (offset.x.round() as i32).rem_euclid(w) - w;
        let start_y = (offset.y.round() as i32).rem_euclid(h) - h;

        let mut y = start_y;
        while y < fb.height as i32 {
            let mut x = start_x;
            while x < fb.width as i32 {
                fb.blit(&self.texture, x, y);
                x += w;
            }
            y += h;
        }
    }
}
