//! Level playback scene
//!
//! Owns everything needed to play through the configured level list: the
//! persistent player, the sprite arena, the camera, the current map and the
//! parallax layers derived from it.
//!
//! Loading a level reads and validates the map file before touching any
//! scene state, then replaces the map, sprites and layers in one infallible
//! step. A load that fails leaves the previous level running, so the death
//! reset and the advance to the next level can both reload from inside
//! `update`.
//!
//! Per tick the scene is either Playing or Completing: reaching the goal
//! freezes the sprites and starts a fadeout, and once the fadeout runs out
//! the next level (wrapping around) is loaded.

use std::rc::Rc;

use log::{debug, info};
use macroquad::input::KeyCode;
use macroquad::math::Rect;
use thiserror::Error;

use super::camera::Camera;
use super::collision::contains_rect;
use super::entity::Entity;
use super::event::{EventQueue, LevelEvent};
use super::parallax::ParallaxLayer;
use super::world::{Body, Category, World};
use crate::app::SceneId;
use crate::hud::{self, GlyphFont, HudAssets};
use crate::input::Controls;
use crate::map::{MapData, MapError};
use crate::rasterizer::{Color, Framebuffer, Texture, TextureError};
use crate::settings::Settings;
use crate::sprite::{Coin, Mob, Player};

/// Seconds between reaching the goal and loading the next level
pub const FADEOUT_TIME: f32 = 2.0;

const SKY_COLOR: Color = Color::new(150, 196, 214);
/// Multiplied into the last frame while the level fades out
const COMPLETE_TINT: Color = Color::new(220, 220, 220);
const DEBUG_COLLIDER: Color = Color::RED;
const DEBUG_GOAL: Color = Color::YELLOW;

/// Background images relative to the image folder, back to front, with
/// their scroll factors
pub const PARALLAX_LAYERS: [(&str, f32); 3] = [
    ("Parallax Forest Background (Seamless)/edited/08_Forest.png", 0.3),
    ("Parallax Forest Background (Seamless)/edited/07_Forest.png", 0.4),
    ("Parallax Forest Background (Seamless)/edited/06_Forest.png", 0.6),
];
pub const COIN_TEXTURE: &str = "coins_animation.png";
pub const HEART_TEXTURE: &str = "HUD/heart.png";
/// First animation frame of the coin sheet
const COIN_FRAME: (usize, usize, usize, usize) = (0, 0, 16, 16);
const COIN_SIZE: usize = 32;
const HEART_SIZE: (usize, usize) = (30, 27);
const HUD_FONT_SCALE: usize = 4;

/// Requests a switch to another scene; applied by the driver
pub type SceneSwitch = Box<dyn FnMut(SceneId)>;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("no levels configured")]
    NoLevels,
    #[error("failed to load level {index} ({name})")]
    Level {
        index: usize,
        name: String,
        #[source]
        source: MapError,
    },
    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// Images loaded once at construction and shared by every level
pub struct LevelTextures {
    /// Back to front, with scroll factors
    pub parallax: Vec<(Texture, f32)>,
    pub coin: Rc<Texture>,
    pub heart: Texture,
}

impl LevelTextures {
    pub fn load(settings: &Settings) -> Result<Self, TextureError> {
        let img = settings.img_folder();

        let parallax = PARALLAX_LAYERS
            .iter()
            .map(|(file, factor)| Ok((Texture::from_file(img.join(file))?, *factor)))
            .collect::<Result<Vec<_>, TextureError>>()?;

        let (x, y, w, h) = COIN_FRAME;
        let coin = Texture::from_file(img.join(COIN_TEXTURE))?
            .sub_region(x, y, w, h)?
            .scaled(COIN_SIZE, COIN_SIZE);

        let heart = Texture::from_file(img.join(HEART_TEXTURE))?.scaled(HEART_SIZE.0, HEART_SIZE.1);

        debug!("Loaded {} parallax layers, coin and heart textures", parallax.len());
        Ok(Self { parallax, coin: Rc::new(coin), heart })
    }
}

/// The map and everything rendered from it. Replaced wholesale on each load.
struct Stage {
    map: MapData,
    image: Texture,
    background: Vec<ParallaxLayer>,
    foreground: Vec<ParallaxLayer>,
}

impl Stage {
    fn new(map: MapData, textures: &LevelTextures, camera: &Camera) -> Self {
        let image = map.make_map();
        let background = textures
            .parallax
            .iter()
            .map(|(texture, factor)| ParallaxLayer::new(texture, *factor, camera, map.width, map.height))
            .collect();
        Self { map, image, background, foreground: Vec::new() }
    }
}

pub struct LevelsScene {
    settings: Settings,
    switch: SceneSwitch,
    textures: LevelTextures,
    font: GlyphFont,

    current_level: usize,
    level_complete: bool,
    /// Only meaningful while `level_complete` is set
    fadeout_timer: f32,

    /// Survives level loads; only its position is reset
    player: Player,
    player_entity: Entity,
    world: World,
    camera: Camera,
    stage: Stage,

    /// Lifecycle notifications for the driver
    pub events: EventQueue<LevelEvent>,
}

impl LevelsScene {
    /// Load textures from disk and start the first level
    pub fn new(settings: Settings, switch: SceneSwitch) -> Result<Self, SceneError> {
        if settings.levels.is_empty() {
            return Err(SceneError::NoLevels);
        }
        let textures = LevelTextures::load(&settings)?;
        Self::with_textures(settings, textures, switch)
    }

    /// Start the first level with already loaded textures
    pub fn with_textures(
        settings: Settings,
        textures: LevelTextures,
        switch: SceneSwitch,
    ) -> Result<Self, SceneError> {
        if settings.levels.is_empty() {
            return Err(SceneError::NoLevels);
        }
        let map = read_level(&settings, 0)?;
        let camera = Camera::new(settings.screen_width as f32, settings.screen_height as f32);
        let stage = Stage::new(map, &textures, &camera);

        let mut world = World::new();
        let player_entity = world.spawn_player();

        let mut scene = Self {
            settings,
            switch,
            textures,
            font: GlyphFont::new(HUD_FONT_SCALE),
            current_level: 0,
            level_complete: false,
            fadeout_timer: 0.0,
            player: Player::new(),
            player_entity,
            world,
            camera,
            stage,
            events: EventQueue::new(),
        };
        scene.populate(0);
        Ok(scene)
    }

    /// Replace the running level with level `index`.
    ///
    /// On error nothing has changed. Panics if `index` is out of range.
    pub fn load_level(&mut self, index: usize) -> Result<(), SceneError> {
        assert!(
            index < self.settings.levels.len(),
            "level index {} out of range ({} levels)",
            index,
            self.settings.levels.len()
        );
        let map = read_level(&self.settings, index)?;
        self.stage = Stage::new(map, &self.textures, &self.camera);
        self.populate(index);
        Ok(())
    }

    /// Reset sprites, flags, player and camera for the map in `self.stage`
    fn populate(&mut self, index: usize) {
        self.world.clear();
        self.player_entity = self.world.spawn_player();

        self.current_level = index;
        self.level_complete = false;
        self.fadeout_timer = 0.0;

        let map = &self.stage.map;
        self.player.set_position(map.spawn_point);
        self.camera.set_boundary(Some(map.bounds()));
        self.camera.set_position(map.spawn_point);

        for &spawn in &map.mob_spawns {
            self.world.spawn_mob(Mob::new(spawn));
        }
        for &center in &map.coins {
            self.world.spawn_coin(Coin::new(center, Rc::clone(&self.textures.coin)));
        }

        info!(
            "Loaded level {} \"{}\": {} mobs, {} coins",
            index,
            map.name,
            map.mob_spawns.len(),
            map.coins.len()
        );
        self.events.send(LevelEvent::Loaded { level: index, name: map.name.clone() });
    }

    /// Advance the scene by `dt` seconds. Negative or non-finite values count as 0.
    pub fn update(&mut self, dt: f32) -> Result<(), SceneError> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.camera.move_to(self.player.center(), dt);

        if !self.level_complete {
            if contains_rect(&self.stage.map.goal, &self.player.rect()) {
                self.level_complete = true;
                self.fadeout_timer = FADEOUT_TIME;
                info!("Level {} complete!", self.current_level);
                self.events.send(LevelEvent::Complete { level: self.current_level });
                return Ok(());
            }

            self.player.update(dt, &self.stage.map, &mut self.world);
            for mob in self.world.mobs_mut() {
                mob.update(dt, &self.stage.map);
            }
            for coin in self.world.coins_mut() {
                coin.update(dt);
            }
            self.world.flush_despawns();

            if self.player.health() == 0 {
                info!("Player died on level {}, restarting", self.current_level);
                self.player.reset_health();
                self.events.send(LevelEvent::PlayerDied { level: self.current_level });
                self.load_level(self.current_level)?;
            }
        } else if self.fadeout_timer > 0.0 {
            self.fadeout_timer -= dt;
        } else {
            let next = (self.current_level + 1) % self.settings.levels.len();
            self.load_level(next)?;
        }
        Ok(())
    }

    pub fn render(&self, fb: &mut Framebuffer) {
        if self.level_complete {
            fb.tint(COMPLETE_TINT);
            return;
        }

        fb.clear(SKY_COLOR);
        for layer in &self.stage.background {
            layer.render(fb, &self.camera);
        }

        let view = self.camera.view_rect();
        fb.blit_region(
            &self.stage.image,
            view.x.round() as i32,
            view.y.round() as i32,
            view.w.ceil() as usize,
            view.h.ceil() as usize,
            0,
            0,
        );

        for slot in self.world.iter(Category::RENDER) {
            match &slot.body {
                Body::Player => self.player.render(fb, &self.camera),
                Body::Mob(mob) => mob.render(fb, &self.camera),
                Body::Coin(coin) => coin.render(fb, &self.camera),
            }
        }

        for layer in &self.stage.foreground {
            layer.render(fb, &self.camera);
        }

        self.render_hud(fb);

        if self.settings.debug_draw {
            self.render_debug(fb);
        }
    }

    pub fn render_hud(&self, fb: &mut Framebuffer) {
        let assets = HudAssets { heart: &self.textures.heart, coin: &self.textures.coin, font: self.font };
        hud::draw_hud(fb, &assets, self.player.health(), self.player.coins());
    }

    fn render_debug(&self, fb: &mut Framebuffer) {
        let outline = |fb: &mut Framebuffer, rect: Rect, color: Color| {
            let r = self.camera.rect_to_screen(rect);
            let (x0, y0) = (r.x.round() as i32, r.y.round() as i32);
            fb.draw_rect(x0, y0, x0 + r.w as i32 - 1, y0 + r.h as i32 - 1, color);
        };
        for &rect in &self.stage.map.collidables {
            outline(fb, rect, DEBUG_COLLIDER);
        }
        outline(fb, self.stage.map.goal, DEBUG_GOAL);
    }

    /// Handle a key press. Returns true if the key meant something here.
    pub fn handle_event(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::N => {
                if self.camera.boundary().is_some() {
                    self.camera.set_boundary(None);
                    debug!("Camera clamp off");
                } else {
                    self.camera.set_boundary(Some(self.stage.map.bounds()));
                    debug!("Camera clamp on");
                }
                true
            }
            KeyCode::P => {
                (self.switch)(SceneId::PauseMenu);
                true
            }
            _ => false,
        }
    }

    pub fn set_controls(&mut self, controls: Controls) {
        self.player.set_controls(controls);
    }

    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn level_count(&self) -> usize {
        self.settings.levels.len()
    }

    pub fn level_complete(&self) -> bool {
        self.level_complete
    }

    pub fn fadeout_timer(&self) -> f32 {
        self.fadeout_timer
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn player_entity(&self) -> Entity {
        self.player_entity
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn map(&self) -> &MapData {
        &self.stage.map
    }

    pub fn map_image(&self) -> &Texture {
        &self.stage.image
    }

    pub fn background(&self) -> &[ParallaxLayer] {
        &self.stage.background
    }

    pub fn foreground(&self) -> &[ParallaxLayer] {
        &self.stage.foreground
    }
}

/// Read and validate level `index` without touching any scene state
fn read_level(settings: &Settings, index: usize) -> Result<MapData, SceneError> {
    let name = &settings.levels[index];
    let path = settings.level_path(name);
    debug!("Reading level {} from {}", index, path.display());
    MapData::load(&path).map_err(|source| SceneError::Level { index, name: name.clone(), source })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fs;
    use std::path::Path;

    use macroquad::math::{vec2, Vec2};
    use tempfile::TempDir;

    use super::*;

    const LEVEL_A: [&str; 4] = [
        "................",
        "..........C..GG.",
        "..P.......M..GG.",
        "################",
    ];

    const LEVEL_B: [&str; 4] = [
        "..........",
        "GG........",
        "GG.....P..",
        "##########",
    ];

    /// Parses as RON but has no spawn or goal
    const BROKEN: [&str; 1] = ["...."];

    fn level_ron(name: &str, rows: &[&str]) -> String {
        let quoted: Vec<String> = rows.iter().map(|r| format!("\"{}\"", r)).collect();
        format!("MapFile(name: \"{}\", tile_size: 32, rows: [{}])", name, quoted.join(", "))
    }

    const SKY_LAYER: Color = Color::new(10, 20, 30);

    fn textures() -> LevelTextures {
        LevelTextures {
            parallax: PARALLAX_LAYERS
                .iter()
                .map(|(_, factor)| (Texture::filled(64, 64, SKY_LAYER), *factor))
                .collect(),
            coin: Rc::new(Texture::filled(32, 32, Color::YELLOW)),
            heart: Texture::filled(30, 27, Color::RED),
        }
    }

    fn write_levels(dir: &Path, files: &[(&str, String)]) {
        let levels = dir.join("levels");
        fs::create_dir_all(&levels).unwrap();
        for (name, contents) in files {
            fs::write(levels.join(name), contents).unwrap();
        }
    }

    fn settings(dir: &Path, levels: &[&str]) -> Settings {
        Settings {
            asset_root: dir.to_path_buf(),
            levels: levels.iter().map(|s| s.to_string()).collect(),
            screen_width: 320,
            screen_height: 240,
            ..Settings::default()
        }
    }

    /// Scene over A then B, plus a log of scene switch requests
    fn scene_with(levels: &[&str]) -> (TempDir, LevelsScene, Rc<RefCell<Vec<SceneId>>>) {
        let dir = TempDir::new().unwrap();
        write_levels(
            dir.path(),
            &[
                ("a.ron", level_ron("A", &LEVEL_A)),
                ("b.ron", level_ron("B", &LEVEL_B)),
                ("broken.ron", level_ron("Broken", &BROKEN)),
            ],
        );
        let switches = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&switches);
        let switch: SceneSwitch = Box::new(move |id| log.borrow_mut().push(id));
        let scene = LevelsScene::with_textures(settings(dir.path(), levels), textures(), switch).unwrap();
        (dir, scene, switches)
    }

    fn scene() -> (TempDir, LevelsScene, Rc<RefCell<Vec<SceneId>>>) {
        scene_with(&["a.ron", "b.ron"])
    }

    fn mob_positions(scene: &LevelsScene) -> Vec<Vec2> {
        scene.world().mobs().map(|(_, mob)| mob.position).collect()
    }

    fn coin_positions(scene: &LevelsScene) -> Vec<Vec2> {
        scene.world().coins().map(|(_, coin)| coin.position()).collect()
    }

    fn assert_views_consistent(scene: &LevelsScene) {
        let world = scene.world();
        assert!(world.contains(scene.player_entity(), Category::RENDER | Category::PLAYER));
        for entity in world.entities(Category::MOB) {
            assert!(world.contains(entity, Category::RENDER));
        }
        for entity in world.entities(Category::COIN) {
            assert!(world.contains(entity, Category::RENDER));
        }
    }

    /// Put the player inside the goal of level A or B
    fn enter_goal(scene: &mut LevelsScene) {
        let goal = scene.map().goal;
        scene.player_mut().position = vec2(goal.x + 8.0, goal.y + 4.0);
    }

    fn complete_and_finish_fadeout(scene: &mut LevelsScene) {
        enter_goal(scene);
        scene.update(1.0 / 60.0).unwrap();
        assert!(scene.level_complete());
        scene.update(FADEOUT_TIME + 0.5).unwrap();
        assert!(scene.fadeout_timer() <= 0.0);
    }

    #[test]
    fn test_load_populates_views() {
        let (_dir, scene, _) = scene();
        assert_eq!(scene.current_level(), 0);
        assert_eq!(scene.map().name, "A");
        assert_eq!(scene.world().count(Category::MOB), 1);
        assert_eq!(scene.world().count(Category::COIN), 1);
        assert_eq!(scene.world().count(Category::RENDER), 3);
        assert_views_consistent(&scene);
        assert!(!scene.level_complete());
        assert_eq!(scene.fadeout_timer(), 0.0);
        assert_eq!(scene.camera().boundary(), Some(Rect::new(0.0, 0.0, 512.0, 128.0)));
        assert_eq!(scene.player().rect().bottom(), 96.0);
        assert!(scene.foreground().is_empty());
        assert_eq!(scene.map_image().width, 512);
    }

    #[test]
    fn test_load_reports_event() {
        let (_dir, mut scene, _) = scene();
        let events: Vec<_> = scene.events.drain().collect();
        assert_eq!(events, vec![LevelEvent::Loaded { level: 0, name: "A".to_string() }]);
    }

    #[test]
    fn test_load_resets_completion() {
        let (_dir, mut scene, _) = scene();
        enter_goal(&mut scene);
        scene.update(0.1).unwrap();
        assert!(scene.level_complete());

        scene.load_level(1).unwrap();
        assert!(!scene.level_complete());
        assert_eq!(scene.fadeout_timer(), 0.0);
        assert_eq!(scene.current_level(), 1);
        assert_eq!(scene.world().count(Category::MOB), 0);
        assert_views_consistent(&scene);
    }

    #[test]
    fn test_zero_dt_is_idempotent() {
        let (_dir, mut scene, _) = scene();
        let player = scene.player().position;
        let mobs = mob_positions(&scene);
        let coins = coin_positions(&scene);

        for _ in 0..10 {
            scene.update(0.0).unwrap();
        }
        assert_eq!(scene.current_level(), 0);
        assert!(!scene.level_complete());
        assert_eq!(scene.player().position, player);
        assert_eq!(mob_positions(&scene), mobs);
        assert_eq!(coin_positions(&scene), coins);
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let (_dir, mut scene, _) = scene();
        let mobs = mob_positions(&scene);
        scene.update(-1.0).unwrap();
        scene.update(f32::NAN).unwrap();
        assert_eq!(mob_positions(&scene), mobs);
    }

    #[test]
    fn test_reaching_goal_freezes_sprites() {
        let (_dir, mut scene, _) = scene();
        enter_goal(&mut scene);
        let player = scene.player().position;
        let mobs = mob_positions(&scene);
        let coins = coin_positions(&scene);
        scene.events.clear();

        scene.update(0.1).unwrap();

        assert!(scene.level_complete());
        assert_eq!(scene.fadeout_timer(), FADEOUT_TIME);
        assert_eq!(scene.player().position, player);
        assert_eq!(mob_positions(&scene), mobs);
        assert_eq!(coin_positions(&scene), coins);
        assert_eq!(scene.events.drain().collect::<Vec<_>>(), vec![LevelEvent::Complete { level: 0 }]);
    }

    #[test]
    fn test_fadeout_counts_down() {
        let (_dir, mut scene, _) = scene();
        enter_goal(&mut scene);
        scene.update(0.1).unwrap();
        scene.update(0.5).unwrap();
        assert!((scene.fadeout_timer() - (FADEOUT_TIME - 0.5)).abs() < 1e-5);
        assert_eq!(scene.current_level(), 0);
    }

    #[test]
    fn test_advance_and_wrap() {
        let (_dir, mut scene, _) = scene();
        complete_and_finish_fadeout(&mut scene);

        scene.update(0.0).unwrap();
        assert_eq!(scene.current_level(), 1);
        assert_eq!(scene.map().name, "B");
        assert!(!scene.level_complete());
        assert_eq!(scene.fadeout_timer(), 0.0);
        assert_views_consistent(&scene);

        complete_and_finish_fadeout(&mut scene);
        scene.update(0.0).unwrap();
        assert_eq!(scene.current_level(), 0);
        assert_eq!(scene.map().name, "A");
    }

    #[test]
    fn test_coin_pickup_leaves_both_views() {
        let (_dir, mut scene, _) = scene();
        let (coin, _) = scene.world().coins().next().map(|(e, c)| (e, c.rect())).unwrap();
        scene.player_mut().position = vec2(324.0, 36.0);

        scene.update(1.0 / 60.0).unwrap();

        assert_eq!(scene.player().coins(), 1);
        assert!(!scene.world().contains(coin, Category::COIN));
        assert!(!scene.world().contains(coin, Category::RENDER));
        assert_eq!(scene.world().count(Category::RENDER), 2);
    }

    #[test]
    fn test_death_reloads_same_level() {
        let (_dir, mut scene, _) = scene();
        scene.player_mut().position = vec2(324.0, 36.0);
        scene.update(1.0 / 60.0).unwrap();
        assert_eq!(scene.world().count(Category::COIN), 0);
        scene.events.clear();

        scene.player_mut().set_health(0);
        scene.update(1.0 / 60.0).unwrap();

        assert_eq!(scene.current_level(), 0);
        assert_eq!(scene.player().health(), scene.player().max_health());
        assert_eq!(scene.world().count(Category::COIN), 1);
        assert_eq!(scene.world().count(Category::MOB), 1);
        assert_views_consistent(&scene);
        // Collected coins carry over the reset
        assert_eq!(scene.player().coins(), 1);
        assert_eq!(scene.player().rect().bottom(), 96.0);

        let events: Vec<_> = scene.events.drain().collect();
        assert_eq!(events[0], LevelEvent::PlayerDied { level: 0 });
        assert!(matches!(events[1], LevelEvent::Loaded { level: 0, .. }));
    }

    #[test]
    fn test_failed_load_keeps_previous_level() {
        let (_dir, mut scene, _) = scene_with(&["a.ron", "broken.ron"]);
        complete_and_finish_fadeout(&mut scene);
        let mobs = mob_positions(&scene);

        let err = scene.update(0.0).unwrap_err();
        assert!(matches!(err, SceneError::Level { index: 1, source: MapError::Validation { .. }, .. }));
        assert_eq!(scene.current_level(), 0);
        assert_eq!(scene.map().name, "A");
        assert!(scene.level_complete());
        assert_eq!(mob_positions(&scene), mobs);
        assert_views_consistent(&scene);
    }

    #[test]
    fn test_missing_level_file() {
        let dir = TempDir::new().unwrap();
        let switch: SceneSwitch = Box::new(|_| {});
        let result = LevelsScene::with_textures(settings(dir.path(), &["nope.ron"]), textures(), switch);
        assert!(matches!(result, Err(SceneError::Level { source: MapError::Io { .. }, .. })));
    }

    #[test]
    fn test_empty_level_list() {
        let dir = TempDir::new().unwrap();
        let result = LevelsScene::with_textures(settings(dir.path(), &[]), textures(), Box::new(|_| {}));
        assert!(matches!(result, Err(SceneError::NoLevels)));
    }

    #[test]
    fn test_missing_textures() {
        let dir = TempDir::new().unwrap();
        let err = LevelTextures::load(&settings(dir.path(), &["a.ron"])).err();
        assert!(matches!(err, Some(TextureError::Load { .. })));
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_load_panics() {
        let (_dir, mut scene, _) = scene();
        let _ = scene.load_level(2);
    }

    #[test]
    fn test_clamp_toggle_restores_boundary() {
        let (_dir, mut scene, _) = scene();
        let bounds = scene.camera().boundary();
        assert!(bounds.is_some());

        assert!(scene.handle_event(KeyCode::N));
        assert_eq!(scene.camera().boundary(), None);
        assert!(scene.handle_event(KeyCode::N));
        assert_eq!(scene.camera().boundary(), bounds);
        assert_eq!(scene.camera().boundary(), Some(scene.map().bounds()));
    }

    #[test]
    fn test_pause_key_requests_switch() {
        let (_dir, mut scene, switches) = scene();
        assert!(scene.handle_event(KeyCode::P));
        assert!(!scene.handle_event(KeyCode::Q));
        assert_eq!(*switches.borrow(), vec![SceneId::PauseMenu]);
    }

    #[test]
    fn test_parallax_rebuilt_back_to_front() {
        let (_dir, mut scene, _) = scene();
        let factors: Vec<f32> = scene.background().iter().map(|l| l.factor).collect();
        assert_eq!(factors, vec![0.3, 0.4, 0.6]);
        let width_a = scene.background()[0].width;

        scene.load_level(1).unwrap();
        assert_eq!(scene.background().len(), 3);
        assert_ne!(scene.background()[0].width, width_a);
    }

    #[test]
    fn test_render_draws_hud() {
        let (_dir, scene, _) = scene();
        let mut fb = Framebuffer::new(320, 240);
        scene.render(&mut fb);
        assert_eq!(fb.get_pixel(30, 200), Some(Color::RED));
        assert_eq!(fb.get_pixel(130, 200), Some(Color::YELLOW));
        // Top of the map is open sky, covered by the parallax layers
        assert_eq!(fb.get_pixel(5, 5), Some(SKY_LAYER));
    }

    #[test]
    fn test_render_complete_darkens_last_frame() {
        let (_dir, mut scene, _) = scene();
        let mut fb = Framebuffer::new(320, 240);
        scene.render(&mut fb);
        let before = fb.get_pixel(5, 5).unwrap();

        enter_goal(&mut scene);
        scene.update(0.0).unwrap();
        scene.render(&mut fb);

        let darken = |c: u8| ((c as u16 * 220) / 255) as u8;
        assert_eq!(
            fb.get_pixel(5, 5),
            Some(Color::new(darken(before.r), darken(before.g), darken(before.b)))
        );
    }
}
