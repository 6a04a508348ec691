//! Cascade (combo) resolution
//!
//! Runs detect → score → remove → drop → refill until the board holds no match.
//! Each iteration is one *pass*; the presentation layer replays the passes in order
//! (flash the matched set, drop, refill) at whatever pace it likes.
//!
//! The loop reaches a fixed point in practice, but a pathological tile source could
//! keep recreating matches forever, so the number of passes is capped and exceeding
//! the cap is reported as [`EngineError::CascadeLimit`].

use tracing::{debug, warn};

use crate::board::Board;
use crate::error::EngineError;
use crate::gravity::collapse;
use crate::matcher::{find_matches, MatchSet};
use crate::rng::TileSource;
use crate::types::{FallRecord, NewTileRecord, EMPTY_TILE};

/// Everything one resolution pass did to the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassEffects {
    /// Positions removed in this pass
    pub matched: MatchSet,
    /// Sum of the removed tile values
    pub score_gain: u32,
    pub falls: Vec<FallRecord>,
    pub new_tiles: Vec<NewTileRecord>,
}

impl PassEffects {
    /// Re-apply this pass onto `board`, which must equal the board the pass started from.
    ///
    /// Used to rebuild intermediate boards for playback without re-running the RNG.
    pub fn replay(&self, board: &mut Board) {
        self.remove_from(board);
        self.apply_falls(board);
        self.apply_new_tiles(board);
    }

    /// Empty the matched cells
    pub fn remove_from(&self, board: &mut Board) {
        for pos in &self.matched {
            let _ = board.set(pos, EMPTY_TILE);
        }
    }

    /// Move fallen tiles, in record order (bottom-up per column)
    pub fn apply_falls(&self, board: &mut Board) {
        for fall in &self.falls {
            let _ = board.set(fall.from, EMPTY_TILE);
            let _ = board.set(fall.to, fall.tile);
        }
    }

    pub fn apply_new_tiles(&self, board: &mut Board) {
        for fresh in &self.new_tiles {
            let _ = board.set(fresh.at, fresh.tile);
        }
    }
}

/// Result of resolving a board to its fixed point
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CascadeReport {
    /// Total score over all passes
    pub score_gain: u32,
    /// Passes in the order they happened
    pub passes: Vec<PassEffects>,
}

impl CascadeReport {
    /// Number of passes (the combo length); zero when the board was already settled
    pub fn combo(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Tiles removed across all passes
    pub fn removed(&self) -> usize {
        self.passes.iter().map(|p| p.matched.len()).sum()
    }
}

/// Zero every matched cell and return the sum of the values removed.
pub fn remove_matched(board: &mut Board, matched: &MatchSet) -> u32 {
    let mut gain = 0u32;
    for pos in matched {
        if let Some(tile) = board.tile(pos) {
            if tile > 0 {
                gain = gain.saturating_add(tile);
                let _ = board.set(pos, EMPTY_TILE);
            }
        }
    }
    gain
}

/// Resolve `board` to a settled fixed point.
///
/// On success the board is full and [`find_matches`] on it is empty.
pub fn resolve_cascade<T: TileSource + ?Sized>(
    board: &mut Board,
    tiles: &mut T,
    max_passes: usize,
) -> Result<CascadeReport, EngineError> {
    let mut report = CascadeReport::default();

    loop {
        // Scanning
        let matched = find_matches(board);
        if matched.is_empty() {
            return Ok(report);
        }

        if report.passes.len() >= max_passes {
            warn!(passes = report.passes.len(), "cascade did not settle");
            return Err(EngineError::CascadeLimit {
                passes: report.passes.len(),
            });
        }

        // Resolving
        let score_gain = remove_matched(board, &matched);
        let (falls, new_tiles) = collapse(board, tiles);
        report.score_gain = report.score_gain.saturating_add(score_gain);

        debug!(
            pass = report.passes.len() + 1,
            matched = matched.len(),
            gain = score_gain,
            falls = falls.len(),
            "cascade pass"
        );

        report.passes.push(PassEffects {
            matched,
            score_gain,
            falls,
            new_tiles,
        });
    }
}
