use itertools::Itertools;
use std::error::Error;
use std::fmt;
use std::slice;

use crate::tiles::Tile;
use crate::units::{Height, Width};

/// Position of a single tile in a `TileGrid`, from the top-left corner.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridPosition {
    pub x: usize,
    pub y: usize,
}
impl GridPosition {
    pub fn new(x: usize, y: usize) -> GridPosition {
        GridPosition { x: x, y: y }
    }
}

/// One outer edge of the grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Side {
    North,
    South,
    West,
    East,
}

/// Reasons a layout request is rejected before any tile is touched.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GenerationError {
    InvalidDimension,
    InvalidEntranceCount,
    UnsupportedGridSize,
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match *self {
            GenerationError::InvalidDimension => "grid width and height must both be at least 3",
            GenerationError::InvalidEntranceCount => "at least one entrance must be requested",
            GenerationError::UnsupportedGridSize => "grid too small to hold any maze cells",
        };
        write!(f, "{}", reason)
    }
}
impl Error for GenerationError {}

/// A width * height block of terrain tiles stored row-major.
///
/// The grid is mutable while the generation passes run over it; afterwards the
/// consumer only sees the rendered text form (the `Display` impl).
#[derive(Debug, Clone)]
pub struct TileGrid {
    width: Width,
    height: Height,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Create a grid with every tile set to `Wall`.
    ///
    /// Anything narrower than 3 tiles on a side cannot hold a border plus one
    /// maze cell, so such dimensions are rejected before allocating.
    pub fn new(width: Width, height: Height) -> Result<TileGrid, GenerationError> {
        if width.0 < 3 || height.0 < 3 {
            return Err(GenerationError::InvalidDimension);
        }
        Ok(TileGrid {
            width: width,
            height: height,
            tiles: vec![Tile::Wall; width.0 * height.0],
        })
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    /// Total number of tiles.
    #[inline]
    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_valid_position(&self, pos: GridPosition) -> bool {
        pos.x < self.width.0 && pos.y < self.height.0
    }

    /// Tile at `pos`. Panics if the position is outside the grid.
    #[inline]
    pub fn at(&self, pos: GridPosition) -> Tile {
        self.tiles[self.index_of(pos)]
    }

    /// Tile at `pos`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, pos: GridPosition) -> Option<Tile> {
        if self.is_valid_position(pos) {
            Some(self.tiles[self.index_of(pos)])
        } else {
            None
        }
    }

    /// Overwrite the tile at `pos`. Panics if the position is outside the grid.
    #[inline]
    pub fn set(&mut self, pos: GridPosition, tile: Tile) {
        let index = self.index_of(pos);
        self.tiles[index] = tile;
    }

    pub fn iter_rows(&self) -> slice::Chunks<Tile> {
        self.tiles.chunks(self.width.0)
    }

    pub fn iter_border(&self) -> BorderIter {
        BorderIter {
            width: self.width.0,
            height: self.height.0,
            next_index: 0,
            border_count: 2 * self.width.0 + 2 * (self.height.0 - 2),
        }
    }

    /// Where the goal tile ended up, if the layout has one.
    pub fn goal_position(&self) -> Option<GridPosition> {
        self.tiles
            .iter()
            .position(|&tile| tile == Tile::Goal)
            .map(|index| GridPosition::new(index % self.width.0, index / self.width.0))
    }

    /// Border tiles opened as entrances, in border iteration order.
    pub fn border_openings(&self) -> Vec<GridPosition> {
        self.iter_border()
            .filter(|&pos| self.at(pos) == Tile::Path)
            .collect()
    }

    #[inline]
    fn index_of(&self, pos: GridPosition) -> usize {
        pos.y * self.width.0 + pos.x
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rendered = self
            .iter_rows()
            .map(|row| row.iter().map(|tile| tile.to_char()).collect::<String>())
            .join("\n");
        write!(f, "{}", rendered)
    }
}

/// Iterator over every border position: top row, bottom row, then the
/// remaining west/east column tiles, top to bottom.
#[derive(Debug, Copy, Clone)]
pub struct BorderIter {
    width: usize,
    height: usize,
    next_index: usize,
    border_count: usize,
}

impl Iterator for BorderIter {
    type Item = GridPosition;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.border_count {
            return None;
        }
        let k = self.next_index;
        self.next_index += 1;

        let pos = if k < self.width {
            GridPosition::new(k, 0)
        } else if k < 2 * self.width {
            GridPosition::new(k - self.width, self.height - 1)
        } else {
            let offset = k - 2 * self.width;
            let x = if offset % 2 == 0 { 0 } else { self.width - 1 };
            GridPosition::new(x, 1 + offset / 2)
        };
        Some(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.border_count - self.next_index;
        (remaining, Some(remaining))
    }
}
