//! CANOPY: a forest side-scroller
//!
//! Everything is drawn into a CPU framebuffer at a fixed resolution, then
//! uploaded as a texture and scaled into the window with nearest filtering:
//! - Level files are RON character grids (see `map`)
//! - Parallax forest layers behind a tile map
//! - Player, patrolling mobs and coins
//! - Levels play in order and wrap around

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod game;
mod hud;
mod input;
mod logging;
mod map;
mod rasterizer;
mod settings;
mod sprite;

use anyhow::Context;
use log::{error, info};
use macroquad::prelude::*;

use app::AppState;
use input::InputState;
use rasterizer::Framebuffer;
use settings::Settings;

/// Longest step the simulation takes in one frame (window drags, breakpoints)
const MAX_FRAME_TIME: f32 = 0.1;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("CANOPY v{}", VERSION),
        window_width: 960,
        window_height: 540,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    logging::init_logging();

    if let Err(e) = run().await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let settings = Settings::from_env().context("loading settings")?;
    info!(
        "CANOPY v{} at {}x{}, {} levels",
        VERSION,
        settings.screen_width,
        settings.screen_height,
        settings.levels.len()
    );

    let mut fb = Framebuffer::new(settings.screen_width, settings.screen_height);
    let mut app = AppState::new(settings).context("starting the level scene")?;
    let mut input = InputState::new();

    loop {
        input.poll();
        for key in input.pressed_keys() {
            app.handle_key(key);
        }

        let dt = get_frame_time().min(MAX_FRAME_TIME);
        app.frame(&mut fb, dt, input.controls()).context("running frame")?;

        present(&fb);
        next_frame().await;
    }
}

/// Upload the framebuffer and draw it letterboxed into the window
fn present(fb: &Framebuffer) {
    clear_background(BLACK);

    let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
    texture.set_filter(FilterMode::Nearest);

    let scale = (screen_width() / fb.width as f32).min(screen_height() / fb.height as f32);
    let draw_w = fb.width as f32 * scale;
    let draw_h = fb.height as f32 * scale;
    let draw_x = ((screen_width() - draw_w) * 0.5).floor();
    let draw_y = ((screen_height() - draw_h) * 0.5).floor();

    draw_texture_ex(
        &texture,
        draw_x,
        draw_y,
        WHITE,
        DrawTextureParams {
            dest_size: Some(Vec2::new(draw_w, draw_h)),
            ..Default::default()
        },
    );
}
