//! Gameplay
//!
//! - Entity: generational handles for sprites
//! - World: the sprite arena, tagged with category flags
//! - Event: level lifecycle notifications
//! - Camera / Parallax: what part of the level is visible and the scenery behind it
//! - LevelsScene: level loading, the update state machine and the render pipeline
//! - PauseMenu: overlay shown while the game is paused

pub mod camera;
pub mod collision;
pub mod entity;
pub mod event;
pub mod levels;
pub mod parallax;
pub mod pause;
pub mod world;

pub use camera::Camera;
pub use entity::Entity;
pub use event::{EventQueue, LevelEvent};
pub use levels::{LevelTextures, LevelsScene, SceneError, SceneSwitch, FADEOUT_TIME};
pub use pause::PauseMenu;
pub use world::{Category, World};
