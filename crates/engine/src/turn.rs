//! Swap request results.

use calculo_crush_core::{Board, CascadeReport};
use calculo_crush_types::{Outcome, Position};

/// Why a swap request was refused. Refused swaps cost nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapRejection {
    /// The move budget is spent
    GameOver,
    /// The two cells are the same or not orthogonal neighbours
    NotAdjacent,
    /// The swap would not create a match
    NoMatch,
}

impl SwapRejection {
    pub fn code(self) -> &'static str {
        match self {
            SwapRejection::GameOver => "game_over",
            SwapRejection::NotAdjacent => "not_adjacent",
            SwapRejection::NoMatch => "no_match",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SwapRejection::GameOver => "game is over",
            SwapRejection::NotAdjacent => "tiles are not adjacent",
            SwapRejection::NoMatch => "swap makes no match",
        }
    }
}

/// Everything an accepted swap did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub from: Position,
    pub to: Position,
    /// The board right after the swap, before any removal
    pub board_after_swap: Board,
    pub cascade: CascadeReport,
    /// Session score after crediting this turn
    pub score: u32,
    pub moves_left: u32,
    /// Set when this turn spent the last move
    pub outcome: Option<Outcome>,
    /// The settled board offers no matching swap
    pub deadlocked: bool,
}

impl TurnReport {
    pub fn score_gain(&self) -> u32 {
        self.cascade.score_gain
    }

    pub fn combo(&self) -> usize {
        self.cascade.combo()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    Accepted(TurnReport),
    Rejected(SwapRejection),
}

impl SwapOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SwapOutcome::Accepted(_))
    }

    pub fn report(&self) -> Option<&TurnReport> {
        match self {
            SwapOutcome::Accepted(report) => Some(report),
            SwapOutcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<SwapRejection> {
        match self {
            SwapOutcome::Accepted(_) => None,
            SwapOutcome::Rejected(reason) => Some(*reason),
        }
    }
}
