//! Input state management
//!
//! Polls keyboard (macroquad) and gamepad (gilrs) once per frame and
//! folds them into movement controls plus discrete scene keys.

use macroquad::prelude::*;

use super::gamepad::{button, Gamepad};
use super::{Action, Controls};

/// Keys routed to the active scene's `handle_event`
const SCENE_KEYS: [KeyCode; 3] = [KeyCode::N, KeyCode::P, KeyCode::Escape];

/// Unified input state that handles both keyboard and gamepad
pub struct InputState {
    gamepad: Gamepad,
    /// Stick deflection needed to count as a direction
    pub stick_threshold: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self { gamepad: Gamepad::new(), stick_threshold: 0.3 }
    }

    /// Call once per frame before reading controls
    pub fn poll(&mut self) {
        self.gamepad.poll();
    }

    pub fn action_down(&self, action: Action) -> bool {
        self.keyboard_down(action) || self.gamepad_down(action)
    }

    fn keyboard_down(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
            Action::MoveRight => is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
            Action::Jump => {
                is_key_down(KeyCode::Space) || is_key_down(KeyCode::W) || is_key_down(KeyCode::Up)
            }
        }
    }

    fn gamepad_down(&self, action: Action) -> bool {
        if !self.gamepad.has_gamepad() {
            return false;
        }
        let stick = self.gamepad.left_stick();
        match action {
            Action::MoveLeft => {
                self.gamepad.is_button_down(button::DPAD_LEFT) || stick.x < -self.stick_threshold
            }
            Action::MoveRight => {
                self.gamepad.is_button_down(button::DPAD_RIGHT) || stick.x > self.stick_threshold
            }
            Action::Jump => {
                self.gamepad.is_button_down(button::A) || self.gamepad.is_button_down(button::DPAD_UP)
            }
        }
    }

    /// Movement held this frame
    pub fn controls(&self) -> Controls {
        Controls {
            left: self.action_down(Action::MoveLeft),
            right: self.action_down(Action::MoveRight),
            jump: self.action_down(Action::Jump),
        }
    }

    /// Scene keys that went down this frame. Start on a gamepad reports as P.
    pub fn pressed_keys(&self) -> Vec<KeyCode> {
        let mut keys: Vec<KeyCode> = SCENE_KEYS.into_iter().filter(|k| is_key_pressed(*k)).collect();
        if self.gamepad.is_button_pressed(button::START) && !keys.contains(&KeyCode::P) {
            keys.push(KeyCode::P);
        }
        keys
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
