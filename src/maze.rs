//! Maze map parsing and tile queries
//!
//! A map is plain text, one row per line, every row the same width. Each
//! character is a tile symbol:
//!
//! | Symbol | Tile |
//! |--------|------|
//! | `1`-`6` | wall pieces (horizontal, vertical, four corners) |
//! | `7` | pellet |
//! | `z` | power pellet |
//! | `p` | player spawn |
//! | `b`, `s`, `i`, `c` | ghost spawns (blinky, pinky, inky, clyde) |
//! | anything else | floor |

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Sub};
use std::path::Path;
use thiserror::Error;

/// Symbol marking the player spawn.
pub const PLAYER_SYMBOL: char = 'p';

/// Error raised for malformed maps.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MapError {
    /// The map has no rows (or its rows are empty)
    #[error("map is empty")]
    Empty,
    /// A row's width differs from the first row's
    #[error("map row {row} has width {found}, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    /// A required spawn tile is absent
    #[error("map has no '{0}' spawn tile")]
    MissingSpawn(char),
    /// The map file could not be read
    #[error("failed to read map '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A grid cell, addressed by column and row.
///
/// Components are signed so that neighbour offsets can step outside the grid;
/// use [`Grid::in_bounds`] before treating a position as a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub col: i32,
    pub row: i32,
}

impl Position {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Pixel coordinates of the cell's top-left corner for a given tile size.
    pub fn to_pixels(self, tile_size: u32) -> (i64, i64) {
        let tile = tile_size as i64;
        (self.col as i64 * tile, self.row as i64 * tile)
    }

    /// Whether `other` is exactly one step away horizontally or vertically.
    pub fn is_adjacent(self, other: Position) -> bool {
        let d = other - self;
        d.col.abs() + d.row.abs() == 1
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.col + rhs.col, self.row + rhs.row)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.col - rhs.col, self.row - rhs.row)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Wall piece shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WallKind {
    Horizontal,
    Vertical,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl WallKind {
    pub const ALL: [WallKind; 6] = [
        WallKind::Horizontal,
        WallKind::Vertical,
        WallKind::UpLeft,
        WallKind::UpRight,
        WallKind::DownLeft,
        WallKind::DownRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WallKind::Horizontal => "horizontal",
            WallKind::Vertical => "vertical",
            WallKind::UpLeft => "up-left",
            WallKind::UpRight => "up-right",
            WallKind::DownLeft => "down-left",
            WallKind::DownRight => "down-right",
        }
    }
}

/// The four ghosts, each with its own spawn symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ghost {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl Ghost {
    pub const ALL: [Ghost; 4] = [Ghost::Blinky, Ghost::Pinky, Ghost::Inky, Ghost::Clyde];

    pub fn symbol(self) -> char {
        match self {
            Ghost::Blinky => 'b',
            Ghost::Pinky => 's',
            Ghost::Inky => 'i',
            Ghost::Clyde => 'c',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Ghost::Blinky => "blinky",
            Ghost::Pinky => "pinky",
            Ghost::Inky => "inky",
            Ghost::Clyde => "clyde",
        }
    }
}

/// Semantic category of a tile symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Wall(WallKind),
    Pellet,
    PowerPellet,
    PlayerSpawn,
    GhostSpawn(Ghost),
    Empty,
}

impl Tile {
    /// Classify a map symbol. Unknown symbols are floor.
    pub fn from_symbol(symbol: char) -> Tile {
        match symbol {
            '1' => Tile::Wall(WallKind::Horizontal),
            '2' => Tile::Wall(WallKind::Vertical),
            '3' => Tile::Wall(WallKind::UpLeft),
            '4' => Tile::Wall(WallKind::UpRight),
            '5' => Tile::Wall(WallKind::DownLeft),
            '6' => Tile::Wall(WallKind::DownRight),
            '7' => Tile::Pellet,
            'z' => Tile::PowerPellet,
            PLAYER_SYMBOL => Tile::PlayerSpawn,
            'b' => Tile::GhostSpawn(Ghost::Blinky),
            's' => Tile::GhostSpawn(Ghost::Pinky),
            'i' => Tile::GhostSpawn(Ghost::Inky),
            'c' => Tile::GhostSpawn(Ghost::Clyde),
            _ => Tile::Empty,
        }
    }

    pub fn is_wall(self) -> bool {
        matches!(self, Tile::Wall(_))
    }
}

/// A rectangular, immutable tile grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl Grid {
    /// Parse map text into a grid.
    ///
    /// # Errors
    ///
    /// * [`MapError::Empty`] when there are no rows or the first row is empty
    /// * [`MapError::RaggedRow`] when a row's width differs from the first row's
    pub fn parse(text: &str) -> Result<Grid, MapError> {
        let rows: Vec<Vec<char>> = text.lines().map(|line| line.chars().collect()).collect();

        let width = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(MapError::Empty),
        };

        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(MapError::RaggedRow { row, expected: width, found: cells.len() });
            }
        }

        Ok(Grid { rows, width })
    }

    /// Read and parse a map file.
    pub fn load(path: &Path) -> Result<Grid, MapError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| MapError::Io { path: path.display().to_string(), source })?;
        Grid::parse(&text)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row >= 0
            && (pos.row as usize) < self.rows.len()
            && pos.col >= 0
            && (pos.col as usize) < self.width
    }

    /// Symbol at `pos`, or `None` outside the grid.
    pub fn symbol(&self, pos: Position) -> Option<char> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.rows[pos.row as usize][pos.col as usize])
    }

    pub fn tile(&self, pos: Position) -> Option<Tile> {
        self.symbol(pos).map(Tile::from_symbol)
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        self.tile(pos).is_some_and(Tile::is_wall)
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        self.in_bounds(pos) && !self.is_wall(pos)
    }

    /// Every cell with its symbol, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, &symbol)| (Position::new(col as i32, row as i32), symbol))
        })
    }

    /// First occurrence of `symbol` scanning rows top to bottom, columns left to right.
    pub fn find_first(&self, symbol: char) -> Option<Position> {
        self.cells().find(|&(_, s)| s == symbol).map(|(pos, _)| pos)
    }

    /// All occurrences of each symbol in row-major order.
    ///
    /// Every requested symbol has an entry, empty when it never occurs.
    pub fn find_all(&self, symbols: &[char]) -> BTreeMap<char, Vec<Position>> {
        let mut found: BTreeMap<char, Vec<Position>> =
            symbols.iter().map(|&s| (s, Vec::new())).collect();

        for (pos, symbol) in self.cells() {
            if let Some(positions) = found.get_mut(&symbol) {
                positions.push(pos);
            }
        }

        found
    }
}
