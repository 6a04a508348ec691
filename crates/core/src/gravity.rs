//! Gravity and refill
//!
//! Two strictly ordered phases after matched cells have been emptied:
//!
//! 1. **Drop**: every column is compacted downward independently.
//! 2. **Refill**: every remaining hole (now all at the top of their columns) gets a
//!    freshly generated tile.
//!
//! Refill never interleaves with drop; drop targets depend on the full emptiness
//! pattern of each column.

use crate::board::Board;
use crate::rng::TileSource;
use crate::types::{FallRecord, NewTileRecord, Position, EMPTY_TILE};

/// Compact each column toward the bottom row.
///
/// Scans every column bottom-up with a landing pointer starting at the bottom row.
/// Each tile moves to the pointer row, which then moves up one. Relative order of
/// surviving tiles within a column is preserved and no tile changes column.
/// A [`FallRecord`] is emitted only for tiles that actually move.
pub fn drop_tiles(board: &mut Board) -> Vec<FallRecord> {
    let rows = board.rows();
    let cols = board.cols();
    let mut falls = Vec::new();

    if rows == 0 {
        return falls;
    }

    for col in 0..cols {
        let mut landing = rows - 1;
        for row in (0..rows).rev() {
            let tile = board.at(row, col);
            if tile == EMPTY_TILE {
                continue;
            }
            if row != landing {
                falls.push(FallRecord {
                    tile,
                    from: Position::new(row, col),
                    to: Position::new(landing, col),
                });
                board.put(landing, col, tile);
                board.put(row, col, EMPTY_TILE);
            }
            // Wraps only once row 0 is filled, which is also the last iteration.
            landing = landing.wrapping_sub(1);
        }
    }

    falls
}

/// Fill every empty cell, row-major, from `tiles`.
pub fn refill<T: TileSource + ?Sized>(board: &mut Board, tiles: &mut T) -> Vec<NewTileRecord> {
    let rows = board.rows();
    let cols = board.cols();
    let mut fresh = Vec::new();

    for row in 0..rows {
        for col in 0..cols {
            if board.at(row, col) == EMPTY_TILE {
                let tile = tiles.next_tile();
                board.put(row, col, tile);
                fresh.push(NewTileRecord {
                    tile,
                    at: Position::new(row, col),
                });
            }
        }
    }

    fresh
}

/// Drop, then refill.
pub fn collapse<T: TileSource + ?Sized>(
    board: &mut Board,
    tiles: &mut T,
) -> (Vec<FallRecord>, Vec<NewTileRecord>) {
    let falls = drop_tiles(board);
    let fresh = refill(board, tiles);
    (falls, fresh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_column_does_not_move() {
        let mut board = Board::from_rows(&[[1], [2], [3]]);
        assert!(drop_tiles(&mut board).is_empty());
        assert_eq!(board.to_rows(), vec![vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn empty_column_stays_empty() {
        let mut board = Board::empty(4, 1);
        assert!(drop_tiles(&mut board).is_empty());
        assert_eq!(board.empty_count(), 4);
    }

    #[test]
    fn gaps_close_in_order() {
        let mut board = Board::from_rows(&[[7], [0], [8], [0], [9]]);
        let falls = drop_tiles(&mut board);
        assert_eq!(board.to_rows(), vec![vec![0], vec![0], vec![7], vec![8], vec![9]]);
        assert_eq!(
            falls,
            vec![
                FallRecord {
                    tile: 8,
                    from: Position::new(2, 0),
                    to: Position::new(3, 0)
                },
                FallRecord {
                    tile: 7,
                    from: Position::new(0, 0),
                    to: Position::new(2, 0)
                },
            ]
        );
    }
}
