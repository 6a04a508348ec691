//! Read-only view of a session handed to presentation code.

use crate::board::Board;
use crate::session::GameSession;
use crate::types::{Outcome, Position};

/// Board plus session counters at one moment.
///
/// Presentation layers render from this and never touch the live board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: Board,
    pub score: u32,
    pub moves_left: u32,
    pub target_score: u32,
    pub outcome: Option<Outcome>,
    /// No adjacent swap on the board produces a match
    pub deadlocked: bool,
    /// Passes in the most recent accepted turn
    pub last_combo: usize,
    /// Hint currently on display, if one was requested
    pub hint: Option<(Position, Position)>,
    /// Monotonic episode id (increments on restart)
    pub episode_id: u32,
}

impl GameSnapshot {
    pub fn new(board: Board, session: &GameSession) -> Self {
        Self {
            board,
            score: session.score(),
            moves_left: session.moves_left(),
            target_score: session.target_score(),
            outcome: session.outcome(),
            deadlocked: false,
            last_combo: 0,
            hint: None,
            episode_id: 0,
        }
    }

    pub fn game_over(&self) -> bool {
        self.outcome.is_some()
    }
}
