//! Collectible coin

use std::rc::Rc;

use macroquad::math::{vec2, Rect, Vec2};

use crate::game::camera::Camera;
use crate::rasterizer::{Framebuffer, Texture};

/// Pickup box size
pub const SIZE: f32 = 16.0;
const BOB_AMPLITUDE: f32 = 3.0;
/// Radians per second
const BOB_SPEED: f32 = 4.0;

#[derive(Debug, Clone)]
pub struct Coin {
    /// Resting centre
    pub center: Vec2,
    timer: f32,
    texture: Rc<Texture>,
}

impl Coin {
    pub fn new(center: Vec2, texture: Rc<Texture>) -> Self {
        Self { center, timer: 0.0, texture }
    }

    pub fn update(&mut self, dt: f32) {
        self.timer += dt;
    }

    fn bob(&self) -> f32 {
        (self.timer * BOB_SPEED).sin() * BOB_AMPLITUDE
    }

    /// Current centre including the bob
    pub fn position(&self) -> Vec2 {
        self.center + vec2(0.0, self.bob())
    }

    pub fn rect(&self) -> Rect {
        let p = self.position();
        Rect::new(p.x - SIZE * 0.5, p.y - SIZE * 0.5, SIZE, SIZE)
    }

    pub fn render(&self, fb: &mut Framebuffer, camera: &Camera) {
        let p = camera.world_to_screen(self.position());
        let x = (p.x - self.texture.width as f32 * 0.5).round() as i32;
        let y = (p.y - self.texture.height as f32 * 0.5).round() as i32;
        fb.blit(&self.texture, x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Color;

    #[test]
    fn test_bob_stays_near_centre() {
        let mut coin = Coin::new(vec2(100.0, 50.0), Rc::new(Texture::new(32, 32)));
        assert_eq!(coin.position(), vec2(100.0, 50.0));
        for _ in 0..120 {
            coin.update(1.0 / 60.0);
            assert!((coin.position().y - 50.0).abs() <= BOB_AMPLITUDE + 1e-4);
            assert_eq!(coin.rect().w, SIZE);
        }
    }

    #[test]
    fn test_render_centred() {
        let coin = Coin::new(vec2(16.0, 16.0), Rc::new(Texture::filled(32, 32, Color::YELLOW)));
        let camera = Camera::new(64.0, 64.0);
        let mut fb = Framebuffer::new(64, 64);
        fb.clear(Color::BLACK);
        coin.render(&mut fb, &camera);
        assert_eq!(fb.get_pixel(0, 0), Some(Color::YELLOW));
        assert_eq!(fb.get_pixel(31, 31), Some(Color::YELLOW));
        assert_eq!(fb.get_pixel(32, 32), Some(Color::BLACK));
    }
}
