//! Timed replay of a resolved turn.
//!
//! The engine hands back a finished [`TurnReport`]; this module spreads it over
//! time as Swap, then Flash and Fall for every cascade pass. It owns all pacing:
//! callers advance it with [`Playback::tick`] and draw [`Playback::frame`].

use crate::core::{Board, MatchSet, PassEffects};
use crate::engine::TurnReport;
use crate::frame::{BoardFrame, Tally};
use crate::types::{Position, EMPTY_TILE, FALL_ANIM_MS, FLASH_MS, SWAP_ANIM_MS};

#[derive(Debug, Clone)]
enum Step {
    /// `base` shown for the first half, `base` with `a`/`b` exchanged for the second
    Swap { base: Board, a: Position, b: Position },
    /// Matched cells highlighted on the pre-removal board
    Flash { board: Board, matched: MatchSet },
    /// Survivors falling and new tiles sliding in from above
    Fall { removed: Board, pass: PassEffects },
}

impl Step {
    fn duration_ms(&self) -> u32 {
        match self {
            Step::Swap { .. } => SWAP_ANIM_MS,
            Step::Flash { .. } => FLASH_MS,
            Step::Fall { .. } => FALL_ANIM_MS,
        }
    }

    fn frame(&self, elapsed: u32) -> BoardFrame {
        let duration = self.duration_ms().max(1);
        let progress = elapsed.min(duration) as f32 / duration as f32;
        match self {
            Step::Swap { base, a, b } => {
                let mut frame = BoardFrame::from_board(base);
                if progress >= 0.5 {
                    let (ta, tb) = (frame.tile(*a), frame.tile(*b));
                    frame.put(*a, tb);
                    frame.put(*b, ta);
                }
                frame.with_swapping(*a, *b)
            }
            Step::Flash { board, matched } => {
                BoardFrame::from_board(board).with_flash(matched.clone())
            }
            Step::Fall { removed, pass } => fall_frame(removed, pass, progress),
        }
    }
}

/// Tiles at interpolated rows. Rows are floored so tiles stacked in one column
/// never land on the same cell mid-fall.
fn fall_frame(removed: &Board, pass: &PassEffects, progress: f32) -> BoardFrame {
    let rows = removed.rows();
    let mut frame = BoardFrame::from_board(removed);
    for fall in &pass.falls {
        frame.put(fall.from, EMPTY_TILE);
    }

    for fall in &pass.falls {
        let from = fall.from.row as f32;
        let to = fall.to.row as f32;
        let row = (from + (to - from) * progress).floor() as usize;
        frame.put(Position::new(row, fall.to.col), fall.tile);
    }

    // New tiles start one board height above their slot.
    for fresh in &pass.new_tiles {
        let start = fresh.at.row as f32 - rows as f32;
        let row = (start + rows as f32 * progress).floor();
        if row >= 0.0 {
            frame.put(Position::new(row as usize, fresh.at.col), fresh.tile);
        }
    }

    frame
}

#[derive(Debug, Clone, Default)]
pub struct Playback {
    /// Each step with the score and combo shown while it plays, if it changes them
    steps: Vec<(Step, Option<Tally>)>,
    index: usize,
    elapsed: u32,
}

impl Playback {
    /// Animate an accepted turn starting from `before`, the board prior to the swap.
    ///
    /// The shown score starts at the pre-turn value and takes each pass's gain
    /// as that pass's tiles are removed.
    pub fn for_turn(before: &Board, report: &TurnReport) -> Self {
        let mut tally = Tally {
            score: report.score.saturating_sub(report.score_gain()),
            combo: 0,
        };
        let mut steps = vec![(
            Step::Swap {
                base: before.clone(),
                a: report.from,
                b: report.to,
            },
            Some(tally),
        )];

        let mut board = report.board_after_swap.clone();
        for pass in &report.cascade.passes {
            tally.combo += 1;
            steps.push((
                Step::Flash {
                    board: board.clone(),
                    matched: pass.matched.clone(),
                },
                Some(tally),
            ));
            tally.score = tally.score.saturating_add(pass.score_gain);
            let mut removed = board.clone();
            pass.remove_from(&mut removed);
            steps.push((
                Step::Fall {
                    removed,
                    pass: pass.clone(),
                },
                Some(tally),
            ));
            pass.replay(&mut board);
        }

        Self {
            steps,
            index: 0,
            elapsed: 0,
        }
    }

    /// Swap there and back for a swap that made no match.
    ///
    /// Positions off the board produce an empty playback.
    pub fn for_rejected_swap(board: &Board, a: Position, b: Position) -> Self {
        let mut swapped = board.clone();
        if swapped.swap(a, b).is_err() {
            return Self::default();
        }
        Self {
            steps: vec![
                (
                    Step::Swap {
                        base: board.clone(),
                        a,
                        b,
                    },
                    None,
                ),
                (Step::Swap { base: swapped, a, b }, None),
            ],
            index: 0,
            elapsed: 0,
        }
    }

    /// Advance by `dt_ms`, carrying leftover time into the following steps.
    pub fn tick(&mut self, dt_ms: u32) {
        self.elapsed = self.elapsed.saturating_add(dt_ms);
        while let Some((step, _)) = self.steps.get(self.index) {
            let duration = step.duration_ms();
            if self.elapsed < duration {
                break;
            }
            self.elapsed -= duration;
            self.index += 1;
        }
        if self.is_finished() {
            self.elapsed = 0;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.steps.len()
    }

    /// Frame to draw now; `None` once finished (draw the live board instead).
    pub fn frame(&self) -> Option<BoardFrame> {
        let (step, tally) = self.steps.get(self.index)?;
        let frame = step.frame(self.elapsed);
        Some(match tally {
            Some(tally) => frame.with_tally(*tally),
            None => frame,
        })
    }

    pub fn total_ms(&self) -> u32 {
        self.steps.iter().map(|(step, _)| step.duration_ms()).sum()
    }

    /// Jump to the end.
    pub fn skip(&mut self) {
        self.index = self.steps.len();
        self.elapsed = 0;
    }
}
