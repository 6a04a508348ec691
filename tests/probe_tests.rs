//! Move validation and hint search

use calculo_crush::core::{find_hint, is_valid_swap, valid_swaps, Board, EngineError};
use calculo_crush::types::Position;

fn fixture() -> Board {
    Board::from_rows(&[[2, 6, 3, 1], [1, 4, 2, 5], [7, 5, 9, 1]])
}

#[test]
fn test_valid_swap_leaves_board_untouched() {
    let mut board = fixture();
    let before = board.clone();
    assert_eq!(
        is_valid_swap(&mut board, Position::new(0, 1), Position::new(0, 2)),
        Ok(true)
    );
    assert_eq!(board, before);
}

#[test]
fn test_invalid_swap_leaves_board_untouched() {
    let mut board = fixture();
    let before = board.clone();
    assert_eq!(
        is_valid_swap(&mut board, Position::new(2, 0), Position::new(2, 1)),
        Ok(false)
    );
    assert_eq!(board, before);
}

#[test]
fn test_non_adjacent_swap_can_be_valid() {
    let mut board = Board::from_rows(&[[2, 3, 9], [1, 4, 5], [6, 7, 8]]);
    let (a, b) = (Position::new(0, 2), Position::new(2, 0));
    assert!(!a.is_adjacent(b));
    assert_eq!(is_valid_swap(&mut board, a, b), Ok(true));
}

#[test]
fn test_out_of_bounds_swap_is_an_error() {
    let mut board = fixture();
    assert!(matches!(
        is_valid_swap(&mut board, Position::new(0, 0), Position::new(3, 0)),
        Err(EngineError::OutOfBounds { row: 3, col: 0, .. })
    ));
    assert_eq!(board, fixture());
}

#[test]
fn test_hint_is_first_in_scan_order() {
    let mut board = fixture();
    assert_eq!(
        find_hint(&mut board),
        Some((Position::new(0, 1), Position::new(0, 2)))
    );
    assert_eq!(board, fixture());
}

#[test]
fn test_hint_prefers_right_before_down() {
    // From (0, 0): swapping right makes column 1 read [2, 5, 10]; swapping down
    // makes row 1 read [2, 5, 10].
    let mut board = Board::from_rows(&[[2, 3, 7], [4, 5, 10], [9, 10, 1]]);
    let swaps = valid_swaps(&mut board);
    assert!(swaps.contains(&(Position::new(0, 0), Position::new(0, 1))));
    assert!(swaps.contains(&(Position::new(0, 0), Position::new(1, 0))));
    assert_eq!(
        find_hint(&mut board),
        Some((Position::new(0, 0), Position::new(0, 1)))
    );
}

#[test]
fn test_deadlocked_board_has_no_hint() {
    // Products of two primes are never prime.
    let mut board = Board::from_rows(&[[2, 3, 5], [7, 11, 13], [17, 19, 23]]);
    let before = board.clone();
    assert_eq!(find_hint(&mut board), None);
    assert!(valid_swaps(&mut board).is_empty());
    assert_eq!(board, before);
}
