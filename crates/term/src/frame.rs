//! What the board area shows at one instant.
//!
//! A settled board maps to a frame one-to-one; during playback a frame can hold
//! tiles part way through a fall and a set of cells flashing before removal.

use crate::core::{Board, MatchSet};
use crate::types::{Position, Tile, EMPTY_TILE};

/// Score and combo counter as of one instant of a turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub score: u32,
    pub combo: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardFrame {
    rows: usize,
    cols: usize,
    cells: Vec<Tile>,
    flash: MatchSet,
    /// Cells being swapped, drawn highlighted
    swapping: Option<(Position, Position)>,
    tally: Option<Tally>,
}

impl BoardFrame {
    pub fn from_board(board: &Board) -> Self {
        Self {
            rows: board.rows(),
            cols: board.cols(),
            cells: board.cells().to_vec(),
            flash: MatchSet::for_board(board),
            swapping: None,
            tally: None,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Tile drawn at `pos`, [`EMPTY_TILE`] for a hole or out of range.
    pub fn tile(&self, pos: Position) -> Tile {
        if pos.row >= self.rows || pos.col >= self.cols {
            return EMPTY_TILE;
        }
        self.cells[pos.row * self.cols + pos.col]
    }

    pub fn put(&mut self, pos: Position, tile: Tile) {
        if pos.row < self.rows && pos.col < self.cols {
            self.cells[pos.row * self.cols + pos.col] = tile;
        }
    }

    pub fn is_flashing(&self, pos: Position) -> bool {
        self.flash.contains(pos)
    }

    pub fn with_flash(mut self, flash: MatchSet) -> Self {
        self.flash = flash;
        self
    }

    pub fn is_swapping(&self, pos: Position) -> bool {
        matches!(self.swapping, Some((a, b)) if a == pos || b == pos)
    }

    pub fn with_swapping(mut self, a: Position, b: Position) -> Self {
        self.swapping = Some((a, b));
        self
    }

    /// Score and combo to show instead of the settled session's, if any.
    pub fn tally(&self) -> Option<Tally> {
        self.tally
    }

    pub fn with_tally(mut self, tally: Tally) -> Self {
        self.tally = Some(tally);
        self
    }
}
