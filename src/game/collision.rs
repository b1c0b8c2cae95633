//! Collision System
//!
//! Axis-aligned boxes against the level's merged solid rectangles. Moves
//! resolve X then Y so sprites slide along floors and walls, and long moves
//! are split into short steps so a fast fall cannot tunnel through a tile.

use macroquad::math::{vec2, Rect, Vec2};

/// Longest distance covered in one resolution step
const MAX_STEP: f32 = 8.0;

/// Result of a move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    /// Box after resolution
    pub rect: Rect,
    /// Standing on something (a solid 1px below)
    pub grounded: bool,
    /// Did we hit a wall? (horizontal collision)
    pub hit_wall: bool,
    /// Did we hit the ceiling?
    pub hit_ceiling: bool,
}

/// Strict overlap: touching edges do not count
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Whether `inner` lies entirely within `outer` (edges inclusive)
pub fn contains_rect(outer: &Rect, inner: &Rect) -> bool {
    inner.x >= outer.x
        && inner.y >= outer.y
        && inner.right() <= outer.right()
        && inner.bottom() <= outer.bottom()
}

/// Move `rect` by `delta`, stopping against `solids`
pub fn move_and_collide(rect: Rect, delta: Vec2, solids: &[Rect]) -> MoveResult {
    let mut r = rect;
    let mut hit_wall = false;
    let mut hit_ceiling = false;
    let mut landed = false;

    let steps = (delta.x.abs().max(delta.y.abs()) / MAX_STEP).ceil().max(1.0) as u32;
    let step = delta / steps as f32;
    let (mut step_x, mut step_y) = (step.x, step.y);

    for _ in 0..steps {
        if step_x != 0.0 {
            r.x += step_x;
            for solid in solids {
                if !overlaps(&r, solid) {
                    continue;
                }
                if step_x > 0.0 {
                    r.x = solid.x - r.w;
                } else {
                    r.x = solid.right();
                }
                hit_wall = true;
            }
            if hit_wall {
                step_x = 0.0;
            }
        }

        if step_y != 0.0 {
            r.y += step_y;
            for solid in solids {
                if !overlaps(&r, solid) {
                    continue;
                }
                if step_y > 0.0 {
                    r.y = solid.y - r.h;
                    landed = true;
                } else {
                    r.y = solid.bottom();
                    hit_ceiling = true;
                }
            }
            if landed || hit_ceiling {
                step_y = 0.0;
            }
        }
    }

    let below = r.offset(vec2(0.0, 1.0));
    let grounded = landed || solids.iter().any(|s| overlaps(&below, s));

    MoveResult { rect: r, grounded, hit_wall, hit_ceiling }
}
