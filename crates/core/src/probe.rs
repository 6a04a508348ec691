//! Swap probing: move validation and hint search
//!
//! Both operations swap two cells in place, look for a match and swap back. The
//! temporary swap is owned by [`SwapProbe`], a drop guard, so the board is restored
//! on every exit path including unwinding.

use std::ops::Deref;

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::error::EngineError;
use crate::matcher::has_match;
use crate::types::Position;

/// A board with two cells temporarily exchanged.
///
/// The exchange is undone when the probe is dropped.
pub struct SwapProbe<'a> {
    board: &'a mut Board,
    a: usize,
    b: usize,
}

impl<'a> SwapProbe<'a> {
    /// Swap `a` and `b` until the returned guard goes out of scope.
    ///
    /// Fails without touching the board if either position is out of bounds.
    pub fn new(board: &'a mut Board, a: Position, b: Position) -> Result<Self, EngineError> {
        let ia = board.checked_index(a)?;
        let ib = board.checked_index(b)?;
        board.swap_indices(ia, ib);
        Ok(Self { board, a: ia, b: ib })
    }
}

impl Deref for SwapProbe<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl Drop for SwapProbe<'_> {
    fn drop(&mut self) {
        self.board.swap_indices(self.a, self.b);
    }
}

/// Would exchanging `a` and `b` produce at least one match?
///
/// Adjacency is not required here; callers enforce it. The board is identical
/// before and after the call regardless of the answer.
pub fn is_valid_swap(board: &mut Board, a: Position, b: Position) -> Result<bool, EngineError> {
    let probe = SwapProbe::new(board, a, b)?;
    Ok(has_match(&probe))
}

/// Swap partners probed for `pos`: right neighbour first, then the one below.
pub fn probe_partners(board: &Board, pos: Position) -> ArrayVec<Position, 2> {
    let mut out = ArrayVec::new();
    if pos.col + 1 < board.cols() {
        out.push(Position::new(pos.row, pos.col + 1));
    }
    if pos.row + 1 < board.rows() {
        out.push(Position::new(pos.row + 1, pos.col));
    }
    out
}

/// First adjacent swap (row-major, right before down) that yields a match.
///
/// `None` means the board is deadlocked; that is a game state, not an error.
pub fn find_hint(board: &mut Board) -> Option<(Position, Position)> {
    let rows = board.rows();
    let cols = board.cols();
    for row in 0..rows {
        for col in 0..cols {
            let pos = Position::new(row, col);
            for partner in probe_partners(board, pos) {
                // Both positions come from the board's own bounds.
                if let Ok(true) = is_valid_swap(board, pos, partner) {
                    return Some((pos, partner));
                }
            }
        }
    }
    None
}

/// Every matching adjacent swap, in hint order.
pub fn valid_swaps(board: &mut Board) -> Vec<(Position, Position)> {
    let mut out = Vec::new();
    let rows = board.rows();
    let cols = board.cols();
    for row in 0..rows {
        for col in 0..cols {
            let pos = Position::new(row, col);
            for partner in probe_partners(board, pos) {
                if let Ok(true) = is_valid_swap(board, pos, partner) {
                    out.push((pos, partner));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_restores_on_drop() {
        let mut board = Board::from_rows(&[[1, 2, 3], [4, 5, 6]]);
        let before = board.clone();
        {
            let probe = SwapProbe::new(&mut board, Position::new(0, 0), Position::new(1, 2)).unwrap();
            assert_eq!(probe.tile(Position::new(0, 0)), Some(6));
            assert_eq!(probe.tile(Position::new(1, 2)), Some(1));
        }
        assert_eq!(board, before);
    }

    #[test]
    fn probe_restores_when_unwinding() {
        let mut board = Board::from_rows(&[[1, 2, 3], [4, 5, 6]]);
        let before = board.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _probe = SwapProbe::new(&mut board, Position::new(0, 1), Position::new(1, 1)).unwrap();
            panic!("probe consumer failed");
        }));
        assert!(result.is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn probe_out_of_bounds_leaves_board_alone() {
        let mut board = Board::from_rows(&[[1, 2, 3], [4, 5, 6]]);
        let before = board.clone();
        let err = SwapProbe::new(&mut board, Position::new(0, 0), Position::new(2, 0)).err();
        assert_eq!(
            err,
            Some(EngineError::OutOfBounds {
                row: 2,
                col: 0,
                rows: 2,
                cols: 3
            })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn partners_respect_edges() {
        let board = Board::empty(3, 3);
        assert_eq!(
            probe_partners(&board, Position::new(0, 0)).as_slice(),
            &[Position::new(0, 1), Position::new(1, 0)]
        );
        assert_eq!(
            probe_partners(&board, Position::new(0, 2)).as_slice(),
            &[Position::new(1, 2)]
        );
        assert!(probe_partners(&board, Position::new(2, 2)).is_empty());
    }
}
