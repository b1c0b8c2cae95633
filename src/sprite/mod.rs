//! Sprites that live in a level: the player, patrolling mobs and coins
//!
//! Each sprite owns its own box and motion and draws itself relative to
//! the camera.

pub mod coin;
pub mod mob;
pub mod player;

pub use coin::Coin;
pub use mob::Mob;
pub use player::Player;

/// Downward acceleration shared by everything that falls (px/s²)
pub const GRAVITY: f32 = 1500.0;
/// Terminal fall speed (px/s)
pub const MAX_FALL: f32 = 900.0;
