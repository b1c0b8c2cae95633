//! Application state and scene switching
//!
//! Two scenes, both kept alive: the level scene and the pause overlay.
//! Scenes ask for a switch through a callback; the request is parked in a
//! shared cell and applied at the end of the frame, so a scene never
//! changes out from under the code that is running it.

use std::cell::Cell;
use std::rc::Rc;

use log::{debug, info};
use macroquad::input::KeyCode;

use crate::game::{LevelEvent, LevelsScene, PauseMenu, SceneError, SceneSwitch};
use crate::input::Controls;
use crate::rasterizer::Framebuffer;
use crate::settings::Settings;

/// The available scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    Levels,
    PauseMenu,
}

impl SceneId {
    pub fn label(&self) -> &'static str {
        match self {
            SceneId::Levels => "levels",
            SceneId::PauseMenu => "pause menu",
        }
    }
}

/// Switch request waiting for the end of the frame
pub type PendingSwitch = Rc<Cell<Option<SceneId>>>;

/// Build a switch callback that parks requests in `pending`
pub fn switch_to(pending: &PendingSwitch) -> SceneSwitch {
    let pending = Rc::clone(pending);
    Box::new(move |id| pending.set(Some(id)))
}

/// Main application state containing both scenes
pub struct AppState {
    /// Currently active scene
    pub active: SceneId,
    pending: PendingSwitch,
    pub levels: LevelsScene,
    pub pause: PauseMenu,
}

impl AppState {
    /// Load textures and the first level
    pub fn new(settings: Settings) -> Result<Self, SceneError> {
        let pending = PendingSwitch::default();
        let levels = LevelsScene::new(settings, switch_to(&pending))?;
        Ok(Self::with_scene(pending, levels))
    }

    /// Wrap an already built level scene whose switch callback feeds `pending`
    pub fn with_scene(pending: PendingSwitch, levels: LevelsScene) -> Self {
        let pause = PauseMenu::new(switch_to(&pending));
        Self { active: SceneId::Levels, pending, levels, pause }
    }

    /// Route a key press to the active scene
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.active {
            SceneId::Levels => self.levels.handle_event(key),
            SceneId::PauseMenu => self.pause.handle_event(key),
        }
    }

    /// Run one frame of the active scene, then apply any switch request
    pub fn frame(&mut self, fb: &mut Framebuffer, dt: f32, controls: Controls) -> Result<(), SceneError> {
        match self.active {
            SceneId::Levels => {
                self.levels.set_controls(controls);
                self.levels.update(dt)?;
                self.levels.render(fb);
                for event in self.levels.events.drain() {
                    match event {
                        LevelEvent::Loaded { level, name } => debug!("Now playing level {} ({})", level, name),
                        LevelEvent::Complete { level } => debug!("Level {} finished", level),
                        LevelEvent::PlayerDied { level } => debug!("Died on level {}", level),
                    }
                }
            }
            SceneId::PauseMenu => self.pause.render(fb),
        }
        self.apply_switch();
        Ok(())
    }

    fn apply_switch(&mut self) {
        let Some(next) = self.pending.take() else { return };
        if next != self.active {
            info!("Switching scene: {} -> {}", self.active.label(), next.label());
            self.active = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::game::levels::PARALLAX_LAYERS;
    use crate::game::LevelTextures;
    use crate::rasterizer::{Color, Texture};

    const LEVEL: [&str; 4] = [
        "..........",
        ".......GG.",
        ".P..M..GG.",
        "##########",
    ];

    fn level_ron() -> String {
        let quoted: Vec<String> = LEVEL.iter().map(|r| format!("\"{}\"", r)).collect();
        format!("MapFile(name: \"Meadow\", tile_size: 32, rows: [{}])", quoted.join(", "))
    }

    fn app() -> (TempDir, AppState) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("levels")).unwrap();
        fs::write(dir.path().join("levels/meadow.ron"), level_ron()).unwrap();

        let settings = Settings {
            asset_root: dir.path().to_path_buf(),
            levels: vec!["meadow.ron".to_string()],
            screen_width: 320,
            screen_height: 240,
            ..Settings::default()
        };
        let textures = LevelTextures {
            parallax: PARALLAX_LAYERS.iter().map(|(_, f)| (Texture::filled(8, 8, Color::GREEN), *f)).collect(),
            coin: Rc::new(Texture::filled(32, 32, Color::YELLOW)),
            heart: Texture::filled(30, 27, Color::RED),
        };

        let pending = PendingSwitch::default();
        let levels = LevelsScene::with_textures(settings, textures, switch_to(&pending)).unwrap();
        (dir, AppState::with_scene(pending, levels))
    }

    fn mob_x(app: &AppState) -> f32 {
        app.levels.world().mobs().next().map(|(_, mob)| mob.position.x).unwrap()
    }

    #[test]
    fn test_pause_and_resume() {
        let (_dir, mut app) = app();
        let mut fb = Framebuffer::new(320, 240);

        assert!(app.handle_key(KeyCode::P));
        // Switch lands at the end of the frame
        assert_eq!(app.active, SceneId::Levels);
        app.frame(&mut fb, 1.0 / 60.0, Controls::default()).unwrap();
        assert_eq!(app.active, SceneId::PauseMenu);

        assert!(app.handle_key(KeyCode::Escape));
        app.frame(&mut fb, 1.0 / 60.0, Controls::default()).unwrap();
        assert_eq!(app.active, SceneId::Levels);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let (_dir, mut app) = app();
        let mut fb = Framebuffer::new(320, 240);
        app.frame(&mut fb, 1.0 / 60.0, Controls::default()).unwrap();

        app.handle_key(KeyCode::P);
        app.frame(&mut fb, 1.0 / 60.0, Controls::default()).unwrap();
        let x = mob_x(&app);
        for _ in 0..30 {
            app.frame(&mut fb, 1.0 / 60.0, Controls::default()).unwrap();
        }
        assert_eq!(mob_x(&app), x);
    }

    #[test]
    fn test_keys_go_to_active_scene() {
        let (_dir, mut app) = app();
        let mut fb = Framebuffer::new(320, 240);
        app.handle_key(KeyCode::P);
        app.frame(&mut fb, 0.0, Controls::default()).unwrap();

        // N means nothing to the pause menu, so the clamp stays on
        assert!(!app.handle_key(KeyCode::N));
        assert!(app.levels.camera().boundary().is_some());
    }

    #[test]
    fn test_frame_drains_events() {
        let (_dir, mut app) = app();
        let mut fb = Framebuffer::new(320, 240);
        assert!(!app.levels.events.is_empty());
        app.frame(&mut fb, 0.0, Controls::default()).unwrap();
        assert!(app.levels.events.is_empty());
    }
}
