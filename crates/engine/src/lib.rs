//! Turn controller
//!
//! [`Game`] owns one board, its tile stream and the session counters, and turns
//! player swap requests into resolved turns. Everything here is synchronous and
//! timing-free: a call returns once the board is settled, and the returned
//! [`TurnReport`] carries what a presentation layer needs to animate the turn.

pub mod game;
pub mod turn;

pub use game::{Game, GameError};
pub use turn::{SwapOutcome, SwapRejection, TurnReport};
