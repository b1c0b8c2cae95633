//! Parsed level: spawn points, goal, collision geometry and the map image

use std::path::Path;

use macroquad::math::{vec2, Rect, Vec2};

use super::file::{MapError, MapFile};
use super::tile::Tile;
use crate::rasterizer::{Color, Texture};

/// Height of the grass/edge strip drawn on top of solid tiles
const EDGE_THICKNESS: usize = 4;

/// Everything the scene needs from one level file
#[derive(Debug, Clone)]
pub struct MapData {
    pub name: String,
    pub tile_size: usize,
    pub tiles_wide: usize,
    pub tiles_high: usize,
    tiles: Vec<Tile>,
    /// Pixel dimensions
    pub width: f32,
    pub height: f32,
    /// Bottom-centre of the spawn cell
    pub spawn_point: Vec2,
    /// Bounding box of all goal cells
    pub goal: Rect,
    /// Bottom-centre of each mob cell
    pub mob_spawns: Vec<Vec2>,
    /// Centre of each coin cell
    pub coins: Vec<Vec2>,
    /// Solid tiles merged into horizontal runs
    pub collidables: Vec<Rect>,
}

impl MapData {
    pub fn load(path: &Path) -> Result<Self, MapError> {
        Ok(Self::from_file(MapFile::read(path)?))
    }

    pub fn from_ron_str(contents: &str, path: &Path) -> Result<Self, MapError> {
        Ok(Self::from_file(MapFile::parse(contents, path)?))
    }

    /// Derive map data from a validated file
    pub fn from_file(file: MapFile) -> Self {
        let ts = file.tile_size;
        let tsf = ts as f32;
        let tiles_wide = file.width();
        let tiles_high = file.height();

        let tiles: Vec<Tile> = file
            .rows
            .iter()
            .flat_map(|row| row.chars().map(|c| Tile::from_char(c).unwrap_or(Tile::Empty)))
            .collect();

        let mut spawn_point = Vec2::ZERO;
        let mut mob_spawns = Vec::new();
        let mut coins = Vec::new();
        let mut goal: Option<Rect> = None;
        let mut collidables = Vec::new();

        for row in 0..tiles_high {
            let mut run_start: Option<usize> = None;
            for col in 0..tiles_wide {
                let tile = tiles[row * tiles_wide + col];
                let cell = Rect::new(col as f32 * tsf, row as f32 * tsf, tsf, tsf);
                let bottom_centre = vec2(cell.x + tsf * 0.5, cell.bottom());

                match tile {
                    Tile::Spawn => spawn_point = bottom_centre,
                    Tile::Mob => mob_spawns.push(bottom_centre),
                    Tile::Coin => coins.push(cell.center()),
                    Tile::Goal => {
                        goal = Some(match goal {
                            Some(g) => g.combine_with(cell),
                            None => cell,
                        });
                    }
                    _ => {}
                }

                if tile.is_solid() {
                    run_start.get_or_insert(col);
                } else if let Some(start) = run_start.take() {
                    collidables.push(run_rect(start, col, row, tsf));
                }
            }
            if let Some(start) = run_start {
                collidables.push(run_rect(start, tiles_wide, row, tsf));
            }
        }

        Self {
            name: file.name,
            tile_size: ts,
            tiles_wide,
            tiles_high,
            tiles,
            width: tiles_wide as f32 * tsf,
            height: tiles_high as f32 * tsf,
            spawn_point,
            // Validation guarantees at least one goal cell
            goal: goal.unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0)),
            mob_spawns,
            coins,
            collidables,
        }
    }

    /// Full map rectangle in pixels
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn tile_at(&self, col: usize, row: usize) -> Tile {
        if col < self.tiles_wide && row < self.tiles_high {
            self.tiles[row * self.tiles_wide + col]
        } else {
            Tile::Empty
        }
    }

    /// Whether a world-space point lies inside a solid tile.
    /// Points outside the map are never solid.
    pub fn is_solid_at(&self, point: Vec2) -> bool {
        if point.x < 0.0 || point.y < 0.0 {
            return false;
        }
        let ts = self.tile_size as f32;
        self.tile_at((point.x / ts) as usize, (point.y / ts) as usize).is_solid()
    }

    /// Render the tile layer into an image the size of the map.
    /// Empty cells stay transparent so the parallax shows through.
    pub fn make_map(&self) -> Texture {
        let ts = self.tile_size;
        let mut img = Texture::filled(self.tiles_wide * ts, self.tiles_high * ts, Color::TRANSPARENT);
        img.name = self.name.clone();

        for row in 0..self.tiles_high {
            for col in 0..self.tiles_wide {
                let tile = self.tile_at(col, row);
                let Some((body, edge)) = tile.colors() else { continue };

                // Solid tiles only get an edge where they meet open air
                let exposed = row == 0 || !self.tile_at(col, row - 1).is_solid();
                for y in 0..ts {
                    let color = if tile == Tile::Goal {
                        if y == 0 || y == ts - 1 { edge } else { body }
                    } else if exposed && y < EDGE_THICKNESS {
                        edge
                    } else if y == ts - 1 {
                        body.shade(0.8)
                    } else {
                        body
                    };
                    for x in 0..ts {
                        img.set(col * ts + x, row * ts + y, color);
                    }
                }
            }
        }
        img
    }
}

fn run_rect(start: usize, end: usize, row: usize, ts: f32) -> Rect {
    Rect::new(start as f32 * ts, row as f32 * ts, (end - start) as f32 * ts, ts)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: [&str; 4] = [
        "........GG",
        ".P..C...GG",
        "###..M.###",
        "##########",
    ];

    fn load() -> MapData {
        let quoted: Vec<String> = LEVEL.iter().map(|r| format!("\"{}\"", r)).collect();
        let text = format!("MapFile(name: \"Test\", tile_size: 32, rows: [{}])", quoted.join(", "));
        MapData::from_ron_str(&text, Path::new("test.ron")).unwrap()
    }

    #[test]
    fn test_dimensions() {
        let map = load();
        assert_eq!(map.tiles_wide, 10);
        assert_eq!(map.tiles_high, 4);
        assert_eq!(map.width, 320.0);
        assert_eq!(map.height, 128.0);
        assert_eq!(map.bounds(), Rect::new(0.0, 0.0, 320.0, 128.0));
    }

    #[test]
    fn test_markers() {
        let map = load();
        assert_eq!(map.spawn_point, vec2(48.0, 64.0));
        assert_eq!(map.coins, vec![vec2(144.0, 48.0)]);
        assert_eq!(map.mob_spawns, vec![vec2(176.0, 96.0)]);
        assert_eq!(map.goal, Rect::new(256.0, 0.0, 64.0, 64.0));
    }

    #[test]
    fn test_collidable_runs() {
        let map = load();
        assert_eq!(
            map.collidables,
            vec![
                Rect::new(0.0, 64.0, 96.0, 32.0),
                Rect::new(224.0, 64.0, 96.0, 32.0),
                Rect::new(0.0, 96.0, 320.0, 32.0),
            ]
        );
    }

    #[test]
    fn test_solid_queries() {
        let map = load();
        assert!(map.is_solid_at(vec2(10.0, 70.0)));
        assert!(!map.is_solid_at(vec2(110.0, 70.0)));
        assert!(!map.is_solid_at(vec2(-1.0, 120.0)));
        assert!(!map.is_solid_at(vec2(10.0, 500.0)));
    }

    #[test]
    fn test_make_map() {
        let map = load();
        let img = map.make_map();
        assert_eq!((img.width, img.height), (320, 128));
        // Sky is transparent, ground is drawn
        assert!(img.get(5, 5).is_transparent());
        assert!(!img.get(5, 100).is_transparent());
        // Exposed ground gets the grass edge
        assert_eq!(img.get(5, 64), Tile::Ground.colors().unwrap().1);
    }
}
