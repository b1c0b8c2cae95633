//! Tile maps
//!
//! A level is a character grid stored as RON. Loading it yields `MapData`:
//! spawn point, goal region, mob and coin positions, merged collision
//! rectangles, and a pre-rendered map image.

mod data;
mod file;
mod tile;

pub use data::MapData;
pub use file::{limits, MapError, MapFile};
pub use tile::Tile;
