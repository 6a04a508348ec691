//! Board module - the grid of numeric tiles
//!
//! The board is a `rows x cols` grid (8x8 by default) where each cell holds a tile value.
//! Uses a flat row-major vector for cache locality.
//! Coordinates: `Position { row, col }` where row 0 is the top row and col 0 the leftmost column.
//!
//! A cell value of [`EMPTY_TILE`] only appears while a resolution pass is in flight.
//! Boards handed back to callers are full and settled.

use std::fmt;

use crate::error::EngineError;
use crate::rng::TileSource;
use crate::types::{Position, Tile, EMPTY_TILE};

/// The game board using flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Tile>,
}

impl Board {
    /// Create an all-empty board (every cell is [`EMPTY_TILE`])
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![EMPTY_TILE; rows * cols],
        }
    }

    /// Create a board with every cell drawn independently from `tiles`, row-major.
    ///
    /// The result may contain matches; the engine settles it before play.
    pub fn generate<T: TileSource + ?Sized>(rows: usize, cols: usize, tiles: &mut T) -> Self {
        let cells = (0..rows * cols).map(|_| tiles.next_tile()).collect();
        Self { rows, cols, cells }
    }

    /// Build a board from explicit rows (fixtures, replays).
    ///
    /// # Panics
    ///
    /// Panics if the rows differ in length.
    pub fn from_rows<R: AsRef<[Tile]>>(rows: &[R]) -> Self {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        assert!(
            rows.iter().all(|r| r.as_ref().len() == width),
            "ragged board rows"
        );

        let mut cells = Vec::with_capacity(height * width);
        for row in rows {
            cells.extend_from_slice(row.as_ref());
        }
        Self {
            rows: height,
            cols: width,
            cells,
        }
    }

    /// Convert to nested rows for testing/display
    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        self.cells.chunks(self.cols.max(1)).map(<[Tile]>::to_vec).collect()
    }

    /// Calculate flat index from a position
    #[inline(always)]
    pub(crate) fn index(&self, pos: Position) -> Option<usize> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return None;
        }
        Some(pos.row * self.cols + pos.col)
    }

    pub(crate) fn checked_index(&self, pos: Position) -> Result<usize, EngineError> {
        self.index(pos).ok_or(EngineError::OutOfBounds {
            row: pos.row,
            col: pos.col,
            rows: self.rows,
            cols: self.cols,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// Tile at `pos`
    pub fn get(&self, pos: Position) -> Result<Tile, EngineError> {
        self.checked_index(pos).map(|idx| self.cells[idx])
    }

    /// Tile at `pos`, `None` when out of bounds
    pub fn tile(&self, pos: Position) -> Option<Tile> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// In-bounds access for scan loops; panics on a bad coordinate
    #[inline(always)]
    pub(crate) fn at(&self, row: usize, col: usize) -> Tile {
        self.cells[row * self.cols + col]
    }

    #[inline(always)]
    pub(crate) fn put(&mut self, row: usize, col: usize, tile: Tile) {
        self.cells[row * self.cols + col] = tile;
    }

    /// Set the tile at `pos`
    pub fn set(&mut self, pos: Position, tile: Tile) -> Result<(), EngineError> {
        let idx = self.checked_index(pos)?;
        self.cells[idx] = tile;
        Ok(())
    }

    /// Exchange two cells. Adjacency is not checked here.
    ///
    /// Both positions are validated before anything moves.
    pub fn swap(&mut self, a: Position, b: Position) -> Result<(), EngineError> {
        let ia = self.checked_index(a)?;
        let ib = self.checked_index(b)?;
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// Swap by flat index (both indices already validated)
    #[inline(always)]
    pub(crate) fn swap_indices(&mut self, a: usize, b: usize) {
        self.cells.swap(a, b);
    }

    /// One row as a slice
    pub fn row(&self, row: usize) -> Option<&[Tile]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    /// True when no cell is empty
    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(|&t| t != EMPTY_TILE)
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&t| t == EMPTY_TILE).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }
}

impl fmt::Display for Board {
    /// Right-aligned grid, one row per line, `.` for empty cells
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            for c in 0..self.cols {
                if c > 0 {
                    f.write_str(" ")?;
                }
                match self.at(r, c) {
                    EMPTY_TILE => write!(f, "{:>2}", ".")?,
                    t => write!(f, "{:>2}", t)?,
                }
            }
            if r + 1 < self.rows {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}
