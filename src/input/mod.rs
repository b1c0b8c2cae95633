//! Input handling with gamepad support
//!
//! Keyboard through macroquad, gamepads through gilrs on native targets.
//! Held input becomes `Controls` for the player; edge-triggered scene keys
//! are handed to the active scene.

mod actions;
mod gamepad;
mod state;

pub use actions::*;
pub use gamepad::Gamepad;
pub use state::*;
