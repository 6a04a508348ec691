//! Game session bookkeeping: score, move budget and outcome.
//!
//! The session is owned by the caller and passed to whoever needs it; there is no
//! process-wide game state.

use crate::types::Outcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    score: u32,
    moves_left: u32,
    starting_moves: u32,
    target_score: u32,
}

impl GameSession {
    pub fn new(starting_moves: u32, target_score: u32) -> Self {
        Self {
            score: 0,
            moves_left: starting_moves,
            starting_moves,
            target_score,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn starting_moves(&self) -> u32 {
        self.starting_moves
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    /// Moves already spent
    pub fn moves_used(&self) -> u32 {
        self.starting_moves - self.moves_left
    }

    /// Credit a cascade's score. Score never decreases.
    pub fn add_score(&mut self, gain: u32) {
        self.score = self.score.saturating_add(gain);
    }

    /// Spend one move for a valid swap; returns false if none were left
    pub fn spend_move(&mut self) -> bool {
        if self.moves_left == 0 {
            return false;
        }
        self.moves_left -= 1;
        true
    }

    /// The session ends once the move budget is exhausted
    pub fn is_terminal(&self) -> bool {
        self.moves_left == 0
    }

    /// Final result, available once terminal
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.is_terminal() {
            return None;
        }
        if self.score >= self.target_score {
            Some(Outcome::Won)
        } else {
            Some(Outcome::Lost)
        }
    }

    /// Start over with the same budget and target
    pub fn reset(&mut self) {
        self.score = 0;
        self.moves_left = self.starting_moves;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let mut s = GameSession::new(2, 10);
        assert!(!s.is_terminal());
        assert_eq!(s.outcome(), None);

        assert!(s.spend_move());
        s.add_score(4);
        assert_eq!(s.moves_left(), 1);
        assert_eq!(s.moves_used(), 1);

        assert!(s.spend_move());
        assert!(s.is_terminal());
        assert_eq!(s.outcome(), Some(Outcome::Lost));
        assert!(!s.spend_move());
        assert_eq!(s.moves_left(), 0);
    }

    #[test]
    fn test_reaching_target_wins_only_at_the_end() {
        let mut s = GameSession::new(1, 10);
        s.add_score(12);
        assert_eq!(s.outcome(), None);
        s.spend_move();
        assert_eq!(s.outcome(), Some(Outcome::Won));
    }

    #[test]
    fn test_reset_restores_budget() {
        let mut s = GameSession::new(3, 10);
        s.spend_move();
        s.add_score(7);
        s.reset();
        assert_eq!(s.score(), 0);
        assert_eq!(s.moves_left(), 3);
    }
}
