//! The player character
//!
//! The player's state is owned by the level scene and outlives level loads:
//! coins and health carry over, only the position is reset. Each tick it
//! moves against the map, then resolves contact with mobs (stomp or take a
//! hit) and coins (collect). Removals go through the arena's despawn queue.

use log::debug;
use macroquad::math::{vec2, Rect, Vec2};

use crate::game::camera::Camera;
use crate::game::collision::{move_and_collide, overlaps};
use crate::game::world::World;
use crate::input::Controls;
use crate::map::MapData;
use crate::rasterizer::{Color, Framebuffer};

pub const WIDTH: f32 = 24.0;
pub const HEIGHT: f32 = 30.0;
pub const RUN_SPEED: f32 = 220.0;
pub const JUMP_SPEED: f32 = 560.0;
pub const MAX_HEALTH: u32 = 3;
/// Seconds of immunity after a hit
pub const INVULNERABLE_TIME: f32 = 1.0;
/// Upward speed after stomping a mob
const STOMP_BOUNCE: f32 = 360.0;
/// How far below a mob's top the feet may be and still count as a stomp
const STOMP_TOLERANCE: f32 = 8.0;
/// Upward kick when hurt
const HURT_BOUNCE: f32 = 220.0;

const BODY: Color = Color::new(230, 120, 40);
const OUTLINE: Color = Color::new(90, 40, 10);
const EYE: Color = Color::new(20, 20, 20);

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left of the box
    pub position: Vec2,
    pub velocity: Vec2,
    controls: Controls,
    health: u32,
    max_health: u32,
    coins: u32,
    grounded: bool,
    invulnerable: f32,
    /// +1 facing right, -1 facing left
    facing: f32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            controls: Controls::default(),
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            coins: 0,
            grounded: false,
            invulnerable: 0.0,
            facing: 1.0,
        }
    }

    /// Put the feet at `foot` (bottom-centre) and stop all motion
    pub fn set_position(&mut self, foot: Vec2) {
        self.position = vec2(foot.x - WIDTH * 0.5, foot.y - HEIGHT);
        self.velocity = Vec2::ZERO;
        self.grounded = false;
        self.invulnerable = 0.0;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, WIDTH, HEIGHT)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn set_controls(&mut self, controls: Controls) {
        self.controls = controls;
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn set_health(&mut self, health: u32) {
        self.health = health.min(self.max_health);
    }

    pub fn reset_health(&mut self) {
        self.health = self.max_health;
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0.0
    }

    /// Lose `amount` health unless recently hit. Returns true if it landed.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.is_invulnerable() || amount == 0 {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        self.invulnerable = INVULNERABLE_TIME;
        true
    }

    pub fn update(&mut self, dt: f32, map: &MapData, world: &mut World) {
        self.invulnerable = (self.invulnerable - dt).max(0.0);

        let dir = self.controls.horizontal();
        if dir != 0.0 {
            self.facing = dir;
        }
        self.velocity.x = dir * RUN_SPEED;
        if self.controls.jump && self.grounded {
            self.velocity.y = -JUMP_SPEED;
            self.grounded = false;
        }
        self.velocity.y = (self.velocity.y + super::GRAVITY * dt).min(super::MAX_FALL);

        let prev_bottom = self.rect().bottom();
        let falling = self.velocity.y > 0.0;

        let result = move_and_collide(self.rect(), self.velocity * dt, &map.collidables);
        self.position = vec2(result.rect.x, result.rect.y);
        if (result.grounded && self.velocity.y > 0.0) || (result.hit_ceiling && self.velocity.y < 0.0) {
            self.velocity.y = 0.0;
        }
        self.grounded = result.grounded;
        self.position.x = self.position.x.clamp(0.0, (map.width - WIDTH).max(0.0));

        self.touch_mobs(world, prev_bottom, falling);
        self.collect_coins(world);

        // Fell out of the map
        if self.position.y > map.height {
            self.health = 0;
        }
    }

    fn touch_mobs(&mut self, world: &mut World, prev_bottom: f32, falling: bool) {
        let rect = self.rect();
        let hits: Vec<_> = world
            .mobs()
            .filter(|(entity, mob)| !world.is_queued(*entity) && overlaps(&rect, &mob.rect()))
            .map(|(entity, mob)| (entity, mob.rect()))
            .collect();

        for (entity, mob_rect) in hits {
            if falling && prev_bottom <= mob_rect.y + STOMP_TOLERANCE {
                debug!("stomped mob {:?}", entity);
                world.despawn(entity);
                self.velocity.y = -STOMP_BOUNCE;
                self.grounded = false;
            } else if self.take_damage(1) {
                debug!("hit by mob, health {}", self.health);
                self.velocity.y = -HURT_BOUNCE;
            }
        }
    }

    fn collect_coins(&mut self, world: &mut World) {
        let rect = self.rect();
        let taken: Vec<_> = world
            .coins()
            .filter(|(entity, coin)| !world.is_queued(*entity) && overlaps(&rect, &coin.rect()))
            .map(|(entity, _)| entity)
            .collect();

        for entity in taken {
            world.despawn(entity);
            self.coins += 1;
        }
    }

    pub fn render(&self, fb: &mut Framebuffer, camera: &Camera) {
        // Blink while invulnerable
        if self.is_invulnerable() && (self.invulnerable * 10.0) as i32 % 2 == 1 {
            return;
        }
        let r = camera.rect_to_screen(self.rect());
        let (x0, y0) = (r.x.round() as i32, r.y.round() as i32);
        let (x1, y1) = (x0 + WIDTH as i32 - 1, y0 + HEIGHT as i32 - 1);
        fb.draw_filled_rect(x0, y0, x1, y1, BODY);
        fb.draw_rect(x0, y0, x1, y1, OUTLINE);

        let eye_x = if self.facing > 0.0 { x1 - 7 } else { x0 + 4 };
        fb.draw_filled_rect(eye_x, y0 + 7, eye_x + 2, y0 + 11, EYE);
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
