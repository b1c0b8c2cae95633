//! 2D software rasterizer
//!
//! The game renders into a CPU framebuffer which the window driver uploads
//! as a texture once per frame.
//!
//! # Module Organization
//!
//! - `types` - Color, BlendMode, Texture
//! - `render` - Framebuffer and blitting

pub mod render;
pub mod types;

pub use render::Framebuffer;
pub use types::{BlendMode, Color, Texture, TextureError};
