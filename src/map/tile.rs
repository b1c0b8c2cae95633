//! Tile legend for level files

use crate::rasterizer::{BlendMode, Color};

/// One cell of a level grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Ground,
    Platform,
    Brick,
    /// Player spawn marker (not solid)
    Spawn,
    /// Mob spawn marker (not solid)
    Mob,
    /// Coin marker (not solid)
    Coin,
    /// Part of the goal region (not solid)
    Goal,
}

impl Tile {
    pub fn from_char(c: char) -> Option<Tile> {
        match c {
            '.' | ' ' => Some(Tile::Empty),
            '#' => Some(Tile::Ground),
            '=' => Some(Tile::Platform),
            'B' => Some(Tile::Brick),
            'P' => Some(Tile::Spawn),
            'M' => Some(Tile::Mob),
            'C' => Some(Tile::Coin),
            'G' => Some(Tile::Goal),
            _ => None,
        }
    }

    pub fn is_solid(&self) -> bool {
        matches!(self, Tile::Ground | Tile::Platform | Tile::Brick)
    }

    /// Body and edge colors for the rendered map, None for invisible cells
    pub fn colors(&self) -> Option<(Color, Color)> {
        match self {
            Tile::Ground => Some((Color::new(112, 78, 52), Color::new(86, 160, 62))),
            Tile::Platform => Some((Color::new(150, 104, 60), Color::new(96, 64, 36))),
            Tile::Brick => Some((Color::new(120, 120, 132), Color::new(80, 80, 92))),
            Tile::Goal => Some((
                Color::with_blend(255, 236, 150, BlendMode::Average),
                Color::with_blend(255, 210, 60, BlendMode::Average),
            )),
            _ => None,
        }
    }
}
