//! Match detection under the product rule
//!
//! A match is three contiguous, collinear cells `a, b, c` read left-to-right or
//! top-to-bottom where `a > 0`, `b > 0` and `a * b == c`. The rule is ordered:
//! `[2, 3, 6]` matches, `[6, 3, 2]` and `[3, 6, 2]` do not.

use crate::board::Board;
use crate::types::{Position, Tile};

/// A set of board positions with value-equality semantics.
///
/// Backed by a bitset over the flat board index, so inserting an overlapping
/// position is a no-op and iteration order is always row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MatchSet {
    rows: usize,
    cols: usize,
    words: Vec<u64>,
}

impl MatchSet {
    /// Empty set sized for a `rows x cols` board
    pub fn new(rows: usize, cols: usize) -> Self {
        let bits = rows * cols;
        Self {
            rows,
            cols,
            words: vec![0; bits.div_ceil(64)],
        }
    }

    /// Empty set sized for `board`
    pub fn for_board(board: &Board) -> Self {
        Self::new(board.rows(), board.cols())
    }

    #[inline(always)]
    fn bit(&self, pos: Position) -> Option<(usize, u64)> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return None;
        }
        let idx = pos.row * self.cols + pos.col;
        Some((idx / 64, 1u64 << (idx % 64)))
    }

    /// Add a position; returns true if it was not present yet
    ///
    /// Positions outside the sized board are ignored.
    pub fn insert(&mut self, pos: Position) -> bool {
        match self.bit(pos) {
            Some((word, mask)) => {
                let fresh = self.words[word] & mask == 0;
                self.words[word] |= mask;
                fresh
            }
            None => false,
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.bit(pos)
            .map(|(word, mask)| self.words[word] & mask != 0)
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Positions in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        let cols = self.cols.max(1);
        self.words.iter().enumerate().flat_map(move |(wi, &word)| {
            let mut bits = word;
            std::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let tz = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                let idx = wi * 64 + tz;
                Some(Position::new(idx / cols, idx % cols))
            })
        })
    }

    /// Sum of the tiles currently on `board` at these positions
    pub fn tile_sum(&self, board: &Board) -> u32 {
        self.iter()
            .filter_map(|pos| board.tile(pos))
            .fold(0u32, |acc, t| acc.saturating_add(t))
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = Position;
    type IntoIter = Box<dyn Iterator<Item = Position> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// The product rule for one ordered triple
#[inline(always)]
pub fn is_product_triple(a: Tile, b: Tile, c: Tile) -> bool {
    a > 0 && b > 0 && u64::from(a) * u64::from(b) == u64::from(c)
}

/// Scan every horizontal and vertical window of three cells.
///
/// Returns an empty set when the board is settled.
pub fn find_matches(board: &Board) -> MatchSet {
    let mut matches = MatchSet::for_board(board);
    let rows = board.rows();
    let cols = board.cols();

    // Horizontal
    for r in 0..rows {
        for c in 0..cols.saturating_sub(2) {
            if is_product_triple(board.at(r, c), board.at(r, c + 1), board.at(r, c + 2)) {
                matches.insert(Position::new(r, c));
                matches.insert(Position::new(r, c + 1));
                matches.insert(Position::new(r, c + 2));
            }
        }
    }

    // Vertical
    for c in 0..cols {
        for r in 0..rows.saturating_sub(2) {
            if is_product_triple(board.at(r, c), board.at(r + 1, c), board.at(r + 2, c)) {
                matches.insert(Position::new(r, c));
                matches.insert(Position::new(r + 1, c));
                matches.insert(Position::new(r + 2, c));
            }
        }
    }

    matches
}

/// True when the board holds at least one match.
///
/// Stops at the first hit; used by the swap probe.
pub fn has_match(board: &Board) -> bool {
    let rows = board.rows();
    let cols = board.cols();

    for r in 0..rows {
        for c in 0..cols.saturating_sub(2) {
            if is_product_triple(board.at(r, c), board.at(r, c + 1), board.at(r, c + 2)) {
                return true;
            }
        }
    }
    for c in 0..cols {
        for r in 0..rows.saturating_sub(2) {
            if is_product_triple(board.at(r, c), board.at(r + 1, c), board.at(r + 2, c)) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_rule_is_ordered() {
        assert!(is_product_triple(2, 3, 6));
        assert!(is_product_triple(3, 2, 6));
        assert!(!is_product_triple(6, 3, 2));
        assert!(!is_product_triple(2, 6, 3));
        assert!(is_product_triple(1, 5, 5));
        assert!(!is_product_triple(0, 5, 0));
        assert!(!is_product_triple(5, 0, 0));
    }

    #[test]
    fn product_does_not_overflow() {
        assert!(!is_product_triple(u32::MAX, u32::MAX, 1));
    }

    #[test]
    fn match_set_dedups_and_orders() {
        let mut set = MatchSet::new(8, 8);
        assert!(set.insert(Position::new(3, 4)));
        assert!(set.insert(Position::new(0, 1)));
        assert!(!set.insert(Position::new(3, 4)));
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Position::new(0, 1), Position::new(3, 4)]
        );
    }

    #[test]
    fn match_set_equality_ignores_insertion_order() {
        let mut a = MatchSet::new(4, 4);
        let mut b = MatchSet::new(4, 4);
        a.insert(Position::new(0, 0));
        a.insert(Position::new(3, 3));
        b.insert(Position::new(3, 3));
        b.insert(Position::new(0, 0));
        assert_eq!(a, b);
    }

    #[test]
    fn match_set_spans_multiple_words() {
        let mut set = MatchSet::new(12, 12);
        set.insert(Position::new(11, 11));
        set.insert(Position::new(5, 5));
        assert!(set.contains(Position::new(11, 11)));
        assert!(!set.contains(Position::new(11, 10)));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Position::new(5, 5), Position::new(11, 11)]
        );
    }

    #[test]
    fn match_set_ignores_out_of_range() {
        let mut set = MatchSet::new(2, 2);
        assert!(!set.insert(Position::new(0, 2)));
        assert!(!set.insert(Position::new(9, 0)));
        assert!(set.is_empty());
    }

    #[test]
    fn has_match_agrees_with_find_matches() {
        let settled = Board::from_rows(&[[1, 1, 2], [3, 2, 1], [1, 1, 3]]);
        assert!(!has_match(&settled));
        assert!(find_matches(&settled).is_empty());

        let vertical = Board::from_rows(&[[2, 1, 1], [4, 5, 1], [8, 1, 7]]);
        assert!(has_match(&vertical));
        assert_eq!(find_matches(&vertical).len(), 3);
    }
}
