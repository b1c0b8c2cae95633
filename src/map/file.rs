//! Level file loading
//!
//! Levels are RON (Rusty Object Notation) documents holding a character grid.
//! Each character is one tile; see `Tile::from_char` for the legend.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tile::Tile;

/// Validation limits to keep malformed files from allocating huge maps
pub mod limits {
    /// Maximum tiles per row
    pub const MAX_TILES_WIDE: usize = 512;
    /// Maximum rows
    pub const MAX_TILES_HIGH: usize = 512;
    pub const MIN_TILE_SIZE: usize = 8;
    pub const MAX_TILE_SIZE: usize = 128;
}

/// Error type for level loading
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid level {path}: {message}")]
    Validation { path: PathBuf, message: String },
}

/// On-disk level layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFile {
    #[serde(default)]
    pub name: String,
    pub tile_size: usize,
    pub rows: Vec<String>,
}

impl MapFile {
    pub fn read(path: &Path) -> Result<Self, MapError> {
        let contents = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    /// Parse and validate. `path` is only used for error messages.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, MapError> {
        let file: MapFile = ron::from_str(contents).map_err(|source| MapError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        file.validate().map_err(|message| MapError::Validation {
            path: path.to_path_buf(),
            message,
        })?;
        Ok(file)
    }

    pub fn width(&self) -> usize {
        self.rows.first().map(|r| r.chars().count()).unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Check dimensions, legend, and required markers
    pub fn validate(&self) -> Result<(), String> {
        if !(limits::MIN_TILE_SIZE..=limits::MAX_TILE_SIZE).contains(&self.tile_size) {
            return Err(format!(
                "tile_size {} outside {}..={}",
                self.tile_size,
                limits::MIN_TILE_SIZE,
                limits::MAX_TILE_SIZE
            ));
        }
        if self.rows.is_empty() {
            return Err("no rows".to_string());
        }

        let width = self.width();
        if width == 0 {
            return Err("empty rows".to_string());
        }
        if width > limits::MAX_TILES_WIDE {
            return Err(format!("too wide ({} > {})", width, limits::MAX_TILES_WIDE));
        }
        if self.height() > limits::MAX_TILES_HIGH {
            return Err(format!("too tall ({} > {})", self.height(), limits::MAX_TILES_HIGH));
        }

        let mut spawns = 0;
        let mut goals = 0;
        for (row_idx, row) in self.rows.iter().enumerate() {
            let len = row.chars().count();
            if len != width {
                return Err(format!("row {} has {} tiles, expected {}", row_idx, len, width));
            }
            for (col, c) in row.chars().enumerate() {
                match Tile::from_char(c) {
                    Some(Tile::Spawn) => spawns += 1,
                    Some(Tile::Goal) => goals += 1,
                    Some(_) => {}
                    None => {
                        return Err(format!("unknown tile '{}' at row {}, column {}", c, row_idx, col))
                    }
                }
            }
        }

        if spawns != 1 {
            return Err(format!("expected exactly one spawn 'P', found {}", spawns));
        }
        if goals == 0 {
            return Err("no goal 'G' tiles".to_string());
        }
        Ok(())
    }
}
