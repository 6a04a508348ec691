//! Product-rule match detection

use calculo_crush::core::{find_matches, has_match, is_product_triple, Board};
use calculo_crush::types::Position;

fn positions(board: &Board) -> Vec<(usize, usize)> {
    find_matches(board).iter().map(|p| (p.row, p.col)).collect()
}

#[test]
fn test_row_match_at_start() {
    let board = Board::from_rows(&[[2, 3, 6, 1], [5, 7, 9, 4], [1, 8, 2, 7]]);
    assert_eq!(positions(&board), vec![(0, 0), (0, 1), (0, 2)]);
    assert!(has_match(&board));
}

#[test]
fn test_column_match() {
    let board = Board::from_rows(&[[4, 1, 9], [2, 5, 7], [8, 1, 2]]);
    assert_eq!(positions(&board), vec![(0, 0), (1, 0), (2, 0)]);
}

#[test]
fn test_rule_is_ordered() {
    assert!(is_product_triple(2, 3, 6));
    assert!(is_product_triple(3, 2, 6));
    assert!(!is_product_triple(6, 3, 2));
    assert!(!is_product_triple(3, 6, 2));

    let reversed = Board::from_rows(&[[6, 3, 2], [1, 5, 7], [9, 8, 4]]);
    assert!(find_matches(&reversed).is_empty());
}

#[test]
fn test_zero_never_matches() {
    assert!(!is_product_triple(0, 5, 0));
    assert!(!is_product_triple(5, 0, 0));
    let holes = Board::from_rows(&[[0, 0, 0], [0, 0, 0], [0, 0, 0]]);
    assert!(!has_match(&holes));
}

#[test]
fn test_ones_match_themselves() {
    assert!(is_product_triple(1, 1, 1));
    assert!(is_product_triple(1, 7, 7));
}

#[test]
fn test_long_run_overlaps_once() {
    // 1*2=2 at cols 0..=2 and 2*2=4 at cols 1..=3 share two cells.
    let board = Board::from_rows(&[[1, 2, 2, 4], [9, 8, 7, 5], [3, 5, 9, 8]]);
    let matched = find_matches(&board);
    assert_eq!(matched.len(), 4);
    for col in 0..4 {
        assert!(matched.contains(Position::new(0, col)));
    }
}

#[test]
fn test_settled_board_has_no_matches() {
    let board = Board::from_rows(&[[2, 6, 3, 1], [1, 4, 2, 5], [7, 5, 9, 1]]);
    assert!(find_matches(&board).is_empty());
    assert!(!has_match(&board));
}

#[test]
fn test_large_values_do_not_overflow() {
    assert!(!is_product_triple(u32::MAX, u32::MAX, 1));
    assert!(is_product_triple(65536, 65535, 65536 * 65535));
}
