//! Core raster types: Color, BlendMode, Texture

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("region {w}x{h} at ({x}, {y}) is outside {name} ({width}x{height})")]
    Region {
        name: String,
        x: usize,
        y: usize,
        w: usize,
        h: usize,
        width: usize,
        height: usize,
    },
}

/// How a source color combines with the framebuffer pixel behind it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    Opaque,    // Overwrite
    Average,   // 0.5*B + 0.5*F
    Multiply,  // B * F / 255 (darkening tint)
    Erase,     // Transparent, leaves B untouched
}

/// RGB color tagged with a blend mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub blend: BlendMode,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, blend: BlendMode::Opaque };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, blend: BlendMode::Opaque };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, blend: BlendMode::Opaque };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, blend: BlendMode::Opaque };
    pub const YELLOW: Color = Color { r: 255, g: 220, b: 0, blend: BlendMode::Opaque };
    /// Transparent color (will not be rendered)
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, blend: BlendMode::Erase };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, blend: BlendMode::Opaque }
    }

    pub const fn with_blend(r: u8, g: u8, b: u8, blend: BlendMode) -> Self {
        Self { r, g, b, blend }
    }

    pub fn is_transparent(&self) -> bool {
        self.blend == BlendMode::Erase
    }

    /// Multiply by intensity 0.0-1.0
    pub fn shade(self, intensity: f32) -> Self {
        let i = intensity.clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * i) as u8,
            g: (self.g as f32 * i) as u8,
            b: (self.b as f32 * i) as u8,
            blend: self.blend,
        }
    }

    /// Combine this (front) color with `back` using `mode`
    pub fn blend(self, back: Color, mode: BlendMode) -> Color {
        let (r, g, b) = match mode {
            BlendMode::Opaque => (self.r, self.g, self.b),
            BlendMode::Erase => return back,
            BlendMode::Average => (
                ((back.r as u16 + self.r as u16) / 2) as u8,
                ((back.g as u16 + self.g as u16) / 2) as u8,
                ((back.b as u16 + self.b as u16) / 2) as u8,
            ),
            BlendMode::Multiply => (
                ((back.r as u16 * self.r as u16) / 255) as u8,
                ((back.g as u16 * self.g as u16) / 255) as u8,
                ((back.b as u16 * self.b as u16) / 255) as u8,
            ),
        };
        Color::new(r, g, b)
    }

    /// RGBA bytes; transparent colors get alpha 0
    pub fn to_bytes(&self) -> [u8; 4] {
        let a = if self.is_transparent() { 0 } else { 255 };
        [self.r, self.g, self.b, a]
    }

    /// Alpha 0 becomes transparent, anything else opaque
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        let blend = if a == 0 { BlendMode::Erase } else { BlendMode::Opaque };
        Self::with_blend(r, g, b, blend)
    }
}

/// CPU-side image, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
    pub name: String,
}

impl Texture {
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Color::WHITE)
    }

    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
            name: String::new(),
        }
    }

    /// Build from raw RGBA8 bytes
    pub fn from_rgba8(width: usize, height: usize, bytes: &[u8], name: &str) -> Self {
        let pixels = bytes
            .chunks_exact(4)
            .take(width * height)
            .map(|p| Color::from_rgba(p[0], p[1], p[2], p[3]))
            .collect();
        Self {
            width,
            height,
            pixels,
            name: name.to_string(),
        }
    }

    /// Load texture from an image file
    /// Alpha channel is converted to blend mode: 0 = Erase (transparent), otherwise Opaque
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| TextureError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = img.to_rgba8();

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self::from_rgba8(
            rgba.width() as usize,
            rgba.height() as usize,
            rgba.as_raw(),
            &name,
        ))
    }

    pub fn get(&self, x: usize, y: usize) -> Color {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            Color::TRANSPARENT
        }
    }

    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    /// Copy out a rectangular region
    pub fn sub_region(&self, x: usize, y: usize, w: usize, h: usize) -> Result<Texture, TextureError> {
        if x + w > self.width || y + h > self.height {
            return Err(TextureError::Region {
                name: self.name.clone(),
                x,
                y,
                w,
                h,
                width: self.width,
                height: self.height,
            });
        }

        let mut pixels = Vec::with_capacity(w * h);
        for row in y..y + h {
            let start = row * self.width + x;
            pixels.extend_from_slice(&self.pixels[start..start + w]);
        }

        Ok(Texture {
            width: w,
            height: h,
            pixels,
            name: self.name.clone(),
        })
    }

    /// Nearest-neighbour resize
    pub fn scaled(&self, width: usize, height: usize) -> Texture {
        let mut out = Texture::filled(width, height, Color::TRANSPARENT);
        out.name = self.name.clone();
        if self.width == 0 || self.height == 0 {
            return out;
        }
        for y in 0..height {
            let sy = y * self.height / height;
            for x in 0..width {
                let sx = x * self.width / width;
                out.pixels[y * width + x] = self.pixels[sy * self.width + sx];
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiply_darkens() {
        let back = Color::new(200, 100, 50);
        let tint = Color::new(220, 220, 220);
        let out = tint.blend(back, BlendMode::Multiply);
        assert_eq!(out, Color::new(172, 86, 43));
    }

    #[test]
    fn test_average_blend() {
        let front = Color::with_blend(255, 236, 150, BlendMode::Average);
        let out = front.blend(Color::new(1, 2, 4), front.blend);
        assert_eq!(out, Color::new(128, 119, 77));
    }

    #[test]
    fn test_erase_keeps_back() {
        let back = Color::new(1, 2, 3);
        assert_eq!(Color::TRANSPARENT.blend(back, BlendMode::Erase), back);
    }

    #[test]
    fn test_alpha_to_blend_mode() {
        let tex = Texture::from_rgba8(2, 1, &[10, 20, 30, 0, 40, 50, 60, 128], "t");
        assert!(tex.get(0, 0).is_transparent());
        assert_eq!(tex.get(1, 0), Color::new(40, 50, 60));
    }

    #[test]
    fn test_sub_region_and_scale() {
        let mut tex = Texture::filled(32, 16, Color::BLACK);
        tex.set(0, 0, Color::RED);
        tex.set(15, 15, Color::GREEN);

        let icon = tex.sub_region(0, 0, 16, 16).unwrap();
        assert_eq!((icon.width, icon.height), (16, 16));
        assert_eq!(icon.get(0, 0), Color::RED);

        let big = icon.scaled(32, 32);
        assert_eq!((big.width, big.height), (32, 32));
        assert_eq!(big.get(1, 1), Color::RED);
        assert_eq!(big.get(31, 31), Color::GREEN);
    }

    #[test]
    fn test_sub_region_out_of_bounds() {
        let tex = Texture::new(8, 8);
        assert!(matches!(tex.sub_region(0, 0, 16, 16), Err(TextureError::Region { .. })));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Texture::from_file("definitely/not/here.png"),
            Err(TextureError::Load { .. })
        ));
    }
}
