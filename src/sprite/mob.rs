//! Patrolling enemy

use macroquad::math::{vec2, Rect, Vec2};

use crate::game::camera::Camera;
use crate::game::collision::move_and_collide;
use crate::map::MapData;
use crate::rasterizer::{Color, Framebuffer};

pub const WIDTH: f32 = 28.0;
pub const HEIGHT: f32 = 24.0;
pub const SPEED: f32 = 60.0;

const BODY: Color = Color::new(150, 60, 160);
const EYE: Color = Color::new(250, 250, 250);

#[derive(Debug, Clone, PartialEq)]
pub struct Mob {
    /// Top-left of the box
    pub position: Vec2,
    pub velocity: Vec2,
    /// +1 walking right, -1 walking left
    direction: f32,
    grounded: bool,
}

impl Mob {
    /// Place with its feet at `foot` (bottom-centre), walking left
    pub fn new(foot: Vec2) -> Self {
        Self {
            position: vec2(foot.x - WIDTH * 0.5, foot.y - HEIGHT),
            velocity: Vec2::ZERO,
            direction: -1.0,
            grounded: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, WIDTH, HEIGHT)
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    /// Walk, fall, and turn around at walls and ledges
    pub fn update(&mut self, dt: f32, map: &MapData) {
        self.velocity.x = self.direction * SPEED;
        self.velocity.y = (self.velocity.y + super::GRAVITY * dt).min(super::MAX_FALL);

        let result = move_and_collide(self.rect(), self.velocity * dt, &map.collidables);
        self.position = vec2(result.rect.x, result.rect.y);
        if result.grounded || result.hit_ceiling {
            self.velocity.y = 0.0;
        }
        self.grounded = result.grounded;

        let rect = self.rect();
        let at_edge = rect.x <= 0.0 || rect.right() >= map.width;
        if result.hit_wall || at_edge || (self.grounded && self.ledge_ahead(map)) {
            self.direction = -self.direction;
        }
        self.position.x = self.position.x.clamp(0.0, (map.width - WIDTH).max(0.0));
    }

    /// No floor under the leading foot
    fn ledge_ahead(&self, map: &MapData) -> bool {
        let rect = self.rect();
        let x = if self.direction > 0.0 { rect.right() + 1.0 } else { rect.x - 1.0 };
        !map.is_solid_at(vec2(x, rect.bottom() + 1.0))
    }

    pub fn render(&self, fb: &mut Framebuffer, camera: &Camera) {
        let r = camera.rect_to_screen(self.rect());
        let (x0, y0) = (r.x.round() as i32, r.y.round() as i32);
        let (x1, y1) = (x0 + WIDTH as i32 - 1, y0 + HEIGHT as i32 - 1);
        fb.draw_filled_rect(x0, y0, x1, y1, BODY);
        fb.draw_rect(x0, y0, x1, y1, BODY.shade(0.6));

        let eye_x = if self.direction > 0.0 { x1 - 8 } else { x0 + 4 };
        fb.draw_filled_rect(eye_x, y0 + 6, eye_x + 3, y0 + 9, EYE);
    }
}
