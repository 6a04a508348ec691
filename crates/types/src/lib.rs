//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the resolution engine, the terminal view and the input layer alike.
//!
//! # Board Dimensions
//!
//! The classic playfield is an 8x8 grid:
//!
//! - **Rows**: indexed 0-7, row 0 at the top
//! - **Columns**: indexed 0-7, column 0 at the left
//!
//! Other sizes are accepted through configuration; these constants are the defaults.
//!
//! # Tiles
//!
//! A tile is a positive integer. The value [`EMPTY_TILE`] (`0`) marks a hole that only
//! exists while a resolution pass is in flight.
//!
//! # Presentation Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep of the terminal loop (~60 FPS) |
//! | `SWAP_ANIM_MS` | 300 | Duration of a swap (and swap-back) animation |
//! | `FLASH_MS` | 300 | Duration a matched set is flashed before removal |
//! | `FALL_ANIM_MS` | 500 | Duration of the drop/refill animation of one pass |
//!
//! The engine itself never waits on these; they only pace playback.
//!
//! # Examples
//!
//! ```
//! use calculo_crush_types::{Direction, Position};
//!
//! let a = Position::new(2, 3);
//! let b = a.step(Direction::Right, 8, 8).unwrap();
//! assert_eq!(b, Position::new(2, 4));
//! assert!(a.is_adjacent(b));
//! ```

use std::fmt;

/// Default number of rows (8)
pub const GRID_ROWS: usize = 8;

/// Default number of columns (8)
pub const GRID_COLS: usize = 8;

/// Moves available at the start of a session
pub const STARTING_MOVES: u32 = 20;

/// Score needed to win before the move budget runs out
pub const TARGET_SCORE: u32 = 300;

/// Upper bound on resolution passes for a single cascade
pub const MAX_CASCADE_PASSES: usize = 1000;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Swap animation duration
pub const SWAP_ANIM_MS: u32 = 300;

/// Match flash duration before the matched tiles are removed
pub const FLASH_MS: u32 = 300;

/// Drop and refill animation duration for one pass
pub const FALL_ANIM_MS: u32 = 500;

/// A tile value. Zero is reserved for [`EMPTY_TILE`].
pub type Tile = u32;

/// Marker for an emptied cell during resolution
pub const EMPTY_TILE: Tile = 0;

/// Classic tile distribution as `(value, weight)` pairs.
///
/// Heavily biased towards 1-3 so that products stay reachable, with a sparse
/// sprinkling of composite values that can only appear as the third cell of a match.
pub const CLASSIC_TILE_WEIGHTS: [(Tile, u32); 18] = [
    (1, 15),
    (2, 15),
    (3, 15),
    (4, 9),
    (5, 7),
    (6, 6),
    (7, 4),
    (8, 6),
    (9, 6),
    (10, 2),
    (12, 2),
    (15, 2),
    (16, 2),
    (18, 2),
    (20, 2),
    (24, 2),
    (25, 2),
    (36, 2),
];

/// A cell coordinate on the board, row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two cells
    pub fn distance(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True when the two cells share an edge
    pub fn is_adjacent(self, other: Position) -> bool {
        self.distance(other) == 1
    }

    /// Neighbouring position in `dir`, or `None` if it would leave a `rows x cols` grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use calculo_crush_types::{Direction, Position};
    ///
    /// assert_eq!(Position::new(0, 0).step(Direction::Up, 8, 8), None);
    /// assert_eq!(Position::new(0, 0).step(Direction::Down, 8, 8), Some(Position::new(1, 0)));
    /// assert_eq!(Position::new(0, 7).step(Direction::Right, 8, 8), None);
    /// ```
    pub fn step(self, dir: Direction, rows: usize, cols: usize) -> Option<Position> {
        let (dr, dc) = dir.offset();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        if row >= rows || col >= cols {
            return None;
        }
        Some(Position { row, col })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four orthogonal directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// `(row, col)` delta
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// One tile's vertical relocation during a drop.
///
/// Presentation-only: the board already holds the final state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FallRecord {
    pub tile: Tile,
    pub from: Position,
    pub to: Position,
}

/// A freshly generated tile placed into an empty cell after a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NewTileRecord {
    pub tile: Tile,
    pub at: Position,
}

/// How a finished session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Won => "won",
            Outcome::Lost => "lost",
        }
    }
}

/// Player intents produced by the input layer
///
/// These are interpreted by the cursor controller, which turns them into swap
/// requests for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the cursor, or swap toward that side when a tile is selected
    Move(Direction),
    /// Select the tile under the cursor (or swap with the selection)
    Select,
    /// Drop the current selection
    Cancel,
    /// Ask for a hint
    Hint,
    /// Start a new session
    Restart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_weights_only_hold_positive_tiles() {
        assert!(CLASSIC_TILE_WEIGHTS
            .iter()
            .all(|&(value, weight)| value != EMPTY_TILE && weight > 0));
        let total: u32 = CLASSIC_TILE_WEIGHTS.iter().map(|&(_, w)| w).sum();
        assert_eq!(total, 101);
    }

    #[test]
    fn adjacency_is_manhattan_one() {
        let p = Position::new(3, 3);
        assert!(p.is_adjacent(Position::new(2, 3)));
        assert!(p.is_adjacent(Position::new(3, 4)));
        assert!(!p.is_adjacent(Position::new(4, 4)));
        assert!(!p.is_adjacent(p));
        assert!(!p.is_adjacent(Position::new(3, 5)));
    }

    #[test]
    fn step_stays_on_the_board() {
        let corner = Position::new(7, 7);
        assert_eq!(corner.step(Direction::Down, 8, 8), None);
        assert_eq!(corner.step(Direction::Right, 8, 8), None);
        assert_eq!(corner.step(Direction::Up, 8, 8), Some(Position::new(6, 7)));
    }
}
