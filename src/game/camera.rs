//! 2D follow camera
//!
//! `position` is the top-left corner of the view in world pixels. With a
//! boundary set the view is kept inside it; a boundary narrower than the
//! view pins that axis to the boundary's origin.

use macroquad::math::{vec2, Rect, Vec2};

/// Exponential follow rate (1/s)
pub const FOLLOW_RATE: f32 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec2,
    /// View size in pixels
    pub view: Vec2,
    boundary: Option<Rect>,
    pub follow_rate: f32,
}

impl Camera {
    pub fn new(view_width: f32, view_height: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            view: vec2(view_width, view_height),
            boundary: None,
            follow_rate: FOLLOW_RATE,
        }
    }

    pub fn boundary(&self) -> Option<Rect> {
        self.boundary
    }

    /// Replace the boundary and re-clamp the current position
    pub fn set_boundary(&mut self, boundary: Option<Rect>) {
        self.boundary = boundary;
        self.clamp();
    }

    /// Jump so the view is centred on `center`
    pub fn set_position(&mut self, center: Vec2) {
        self.position = center - self.view * 0.5;
        self.clamp();
    }

    /// Ease the view centre toward `target`. `dt == 0` leaves it in place.
    pub fn move_to(&mut self, target: Vec2, dt: f32) {
        let desired = target - self.view * 0.5;
        let t = 1.0 - (-self.follow_rate * dt.max(0.0)).exp();
        self.position += (desired - self.position) * t;
        self.clamp();
    }

    pub fn view_rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.view.x, self.view.y)
    }

    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        point - self.position
    }

    pub fn rect_to_screen(&self, rect: Rect) -> Rect {
        let p = self.world_to_screen(vec2(rect.x, rect.y));
        Rect::new(p.x, p.y, rect.w, rect.h)
    }

    fn clamp(&mut self) {
        let Some(b) = self.boundary else { return };
        self.position.x = clamp_axis(self.position.x, b.x, b.w, self.view.x);
        self.position.y = clamp_axis(self.position.y, b.y, b.h, self.view.y);
    }
}

fn clamp_axis(pos: f32, start: f32, extent: f32, view: f32) -> f32 {
    if extent <= view {
        start
    } else {
        pos.clamp(start, start + extent - view)
    }
}
