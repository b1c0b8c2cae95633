//! Heads-up display: health and coin counters in the bottom-left corner

pub mod font;

pub use font::GlyphFont;

use crate::rasterizer::{Color, Framebuffer, Texture};

/// Left edge of the HUD
pub const HUD_X: i32 = 30;
/// Distance from the bottom of the screen to the HUD's top
pub const HUD_BOTTOM_OFFSET: i32 = 40;
pub const HEALTH_TEXT_OFFSET: i32 = 35;
pub const COIN_ICON_OFFSET: i32 = 100;
pub const COIN_TEXT_OFFSET: i32 = 140;
pub const TEXT_COLOR: Color = Color::new(251, 251, 251);

/// Icons and font the HUD draws with
pub struct HudAssets<'a> {
    pub heart: &'a Texture,
    pub coin: &'a Texture,
    pub font: GlyphFont,
}

pub fn draw_hud(fb: &mut Framebuffer, assets: &HudAssets, health: u32, coins: u32) {
    let x = HUD_X;
    let y = fb.height as i32 - HUD_BOTTOM_OFFSET;

    fb.blit(assets.heart, x, y);
    assets.font.put_text(fb, &health.to_string(), x + HEALTH_TEXT_OFFSET, y, TEXT_COLOR);

    fb.blit(assets.coin, x + COIN_ICON_OFFSET, y);
    assets.font.put_text(fb, &coins.to_string(), x + COIN_TEXT_OFFSET, y, TEXT_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let heart = Texture::filled(30, 27, Color::RED);
        let coin = Texture::filled(32, 32, Color::YELLOW);
        let assets = HudAssets { heart: &heart, coin: &coin, font: GlyphFont::new(4) };
        let mut fb = Framebuffer::new(320, 240);
        fb.clear(Color::BLACK);

        draw_hud(&mut fb, &assets, 3, 7);

        let y = 240 - 40;
        assert_eq!(fb.get_pixel(30, y), Some(Color::RED));
        assert_eq!(fb.get_pixel(29, y), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(130, y), Some(Color::YELLOW));
        // Top bar of '3' and '7'
        assert_eq!(fb.get_pixel(65, y), Some(TEXT_COLOR));
        assert_eq!(fb.get_pixel(170, y), Some(TEXT_COLOR));
    }
}
