//! Pause overlay
//!
//! Freezes the last gameplay frame, dims it and prints "PAUSED". P or
//! Escape asks the driver to switch back to the level scene.

use log::debug;
use macroquad::input::KeyCode;

use super::levels::SceneSwitch;
use crate::app::SceneId;
use crate::hud::GlyphFont;
use crate::rasterizer::{Color, Framebuffer};

const DIM: Color = Color::new(110, 110, 120);
const TEXT_COLOR: Color = Color::new(251, 251, 251);
const HINT_COLOR: Color = Color::new(200, 200, 200);
const HINT: &str = "P TO RESUME";

pub struct PauseMenu {
    switch: SceneSwitch,
    title_font: GlyphFont,
    hint_font: GlyphFont,
    /// Gameplay frame captured on the first render after pausing
    frozen: Option<Vec<u8>>,
}

impl PauseMenu {
    pub fn new(switch: SceneSwitch) -> Self {
        Self {
            switch,
            title_font: GlyphFont::new(6),
            hint_font: GlyphFont::new(3),
            frozen: None,
        }
    }

    pub fn handle_event(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::P | KeyCode::Escape => {
                debug!("Resume requested");
                self.frozen = None;
                (self.switch)(SceneId::Levels);
                true
            }
            _ => false,
        }
    }

    pub fn render(&mut self, fb: &mut Framebuffer) {
        match &self.frozen {
            Some(pixels) if pixels.len() == fb.pixels.len() => fb.pixels.copy_from_slice(pixels),
            _ => self.frozen = Some(fb.pixels.clone()),
        }
        fb.tint(DIM);

        let w = fb.width as i32;
        let h = fb.height as i32;
        let title = "PAUSED";
        let title_x = (w - self.title_font.text_width(title) as i32) / 2;
        let title_y = h / 2 - self.title_font.line_height() as i32;
        self.title_font.put_text(fb, title, title_x, title_y, TEXT_COLOR);

        let hint_x = (w - self.hint_font.text_width(HINT) as i32) / 2;
        let hint_y = title_y + self.title_font.line_height() as i32 * 2;
        self.hint_font.put_text(fb, HINT, hint_x, hint_y, HINT_COLOR);
    }
}
