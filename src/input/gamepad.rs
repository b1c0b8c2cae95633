//! Gamepad support
//!
//! Native: gilrs. WASM builds have no gamepad backend and report no pad.

use macroquad::prelude::Vec2;

// Button bits (Web Gamepad API standard mapping, Xbox layout)
pub mod button {
    pub const A: u32 = 0;           // South
    pub const START: u32 = 9;
    pub const DPAD_UP: u32 = 12;
    pub const DPAD_LEFT: u32 = 14;
    pub const DPAD_RIGHT: u32 = 15;
}

#[cfg(target_arch = "wasm32")]
mod platform {
    use super::*;

    #[derive(Default)]
    pub struct Gamepad;

    impl Gamepad {
        pub fn new() -> Self {
            Self
        }

        pub fn poll(&mut self) {}

        pub fn has_gamepad(&self) -> bool {
            false
        }

        pub fn is_button_down(&self, _button: u32) -> bool {
            false
        }

        pub fn is_button_pressed(&self, _button: u32) -> bool {
            false
        }

        pub fn left_stick(&self) -> Vec2 {
            Vec2::ZERO
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use super::*;
    use gilrs::{Axis, Button as GilrsButton, Gilrs};
    use log::warn;

    pub struct Gamepad {
        /// None when the platform backend failed to start
        gilrs: Option<Gilrs>,
        deadzone: f32,
        buttons: u32,
        last_buttons: u32,
    }

    impl Gamepad {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(gilrs) => Some(gilrs),
                Err(e) => {
                    warn!("gamepad support disabled: {}", e);
                    None
                }
            };
            Self { gilrs, deadzone: 0.15, buttons: 0, last_buttons: 0 }
        }

        /// Pump gilrs events and latch this frame's button mask
        pub fn poll(&mut self) {
            if let Some(gilrs) = self.gilrs.as_mut() {
                while gilrs.next_event().is_some() {}
            }
            self.last_buttons = self.buttons;
            self.buttons = self.read_button_mask();
        }

        pub fn has_gamepad(&self) -> bool {
            self.active().is_some()
        }

        fn active(&self) -> Option<gilrs::Gamepad<'_>> {
            self.gilrs.as_ref()?.gamepads().next().map(|(_, gp)| gp)
        }

        fn read_button_mask(&self) -> u32 {
            let Some(gp) = self.active() else { return 0 };
            let mut mask = 0u32;

            if gp.is_pressed(GilrsButton::South) { mask |= 1 << button::A; }
            if gp.is_pressed(GilrsButton::Start) { mask |= 1 << button::START; }
            if gp.is_pressed(GilrsButton::DPadUp) { mask |= 1 << button::DPAD_UP; }
            if gp.is_pressed(GilrsButton::DPadLeft) { mask |= 1 << button::DPAD_LEFT; }
            if gp.is_pressed(GilrsButton::DPadRight) { mask |= 1 << button::DPAD_RIGHT; }

            mask
        }

        pub fn is_button_down(&self, button: u32) -> bool {
            (self.buttons & (1 << button)) != 0
        }

        /// Down this frame, up the frame before
        pub fn is_button_pressed(&self, button: u32) -> bool {
            self.is_button_down(button) && (self.last_buttons & (1 << button)) == 0
        }

        pub fn left_stick(&self) -> Vec2 {
            let Some(gp) = self.active() else { return Vec2::ZERO };
            let x = gp.value(Axis::LeftStickX);
            let y = -gp.value(Axis::LeftStickY); // Screen Y points down
            apply_deadzone(x, y, self.deadzone)
        }
    }

    impl Default for Gamepad {
        fn default() -> Self {
            Self::new()
        }
    }
}

/// Apply radial deadzone with linear rescaling
pub fn apply_deadzone(x: f32, y: f32, deadzone: f32) -> Vec2 {
    let len = (x * x + y * y).sqrt();
    if len < deadzone {
        return Vec2::ZERO;
    }
    // Rescale from deadzone..1.0 to 0.0..1.0
    let scale = (len - deadzone) / (1.0 - deadzone) / len;
    Vec2::new(x * scale, y * scale)
}

pub use platform::Gamepad;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadzone() {
        assert_eq!(apply_deadzone(0.1, 0.0, 0.15), Vec2::ZERO);
        let full = apply_deadzone(1.0, 0.0, 0.15);
        assert!((full.x - 1.0).abs() < 1e-5);
        let half = apply_deadzone(0.575, 0.0, 0.15);
        assert!((half.x - 0.5).abs() < 1e-3);
    }
}
