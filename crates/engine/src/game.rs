//! The [`Game`] type: one board, one tile stream, one session.

use calculo_crush_core::{
    find_hint, is_valid_swap, resolve_cascade, valid_swaps, Board, ConfigError, EngineError,
    GameConfig, GameSession, GameSnapshot, TileSource, WeightedTiles,
};
use calculo_crush_types::Position;
use thiserror::Error;
use tracing::{debug, info};

use crate::turn::{SwapOutcome, SwapRejection, TurnReport};

/// Failure to start a game.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// A running game.
///
/// The tile source is generic so tests can script refills; the binaries use
/// [`WeightedTiles`].
pub struct Game<T: TileSource = WeightedTiles> {
    config: GameConfig,
    board: Board,
    session: GameSession,
    tiles: T,
    episode_id: u32,
    deadlocked: bool,
    last_combo: usize,
    hint: Option<(Position, Position)>,
}

impl Game<WeightedTiles> {
    /// Start a game from `config`. A missing seed means seed 0; the binaries fill in
    /// a clock-derived one before calling this.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let tiles = WeightedTiles::new(&config.tile_weights, config.seed.unwrap_or(0))?;
        Self::with_tiles(config, tiles)
    }
}

impl<T: TileSource> Game<T> {
    /// Start a game on a freshly generated board drawn from `tiles`.
    pub fn with_tiles(config: GameConfig, mut tiles: T) -> Result<Self, GameError> {
        config.validate()?;
        let board = Board::generate(config.rows, config.cols, &mut tiles);
        Self::from_board(config, board, tiles)
    }

    /// Start a game on a given board. The board's size overrides the config's.
    ///
    /// Matches already on the board resolve immediately and are not scored, so the
    /// player always starts from a settled board.
    pub fn from_board(mut config: GameConfig, board: Board, tiles: T) -> Result<Self, GameError> {
        config.rows = board.rows();
        config.cols = board.cols();
        config.validate()?;
        let session = GameSession::new(config.starting_moves, config.target_score);
        let mut game = Self {
            config,
            board,
            session,
            tiles,
            episode_id: 0,
            deadlocked: false,
            last_combo: 0,
            hint: None,
        };
        game.settle()?;
        info!(
            rows = game.board.rows(),
            cols = game.board.cols(),
            moves = game.session.moves_left(),
            target = game.session.target_score(),
            "game started"
        );
        Ok(game)
    }

    fn settle(&mut self) -> Result<(), EngineError> {
        let report = resolve_cascade(
            &mut self.board,
            &mut self.tiles,
            self.config.max_cascade_passes,
        )?;
        if !report.is_empty() {
            debug!(passes = report.combo(), "initial board settled");
        }
        self.deadlocked = find_hint(&mut self.board).is_none();
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn is_over(&self) -> bool {
        self.session.is_terminal()
    }

    /// No adjacent swap on the current board makes a match
    pub fn is_deadlocked(&self) -> bool {
        self.deadlocked
    }

    /// Handle a player's request to exchange `a` and `b`.
    ///
    /// Rejections are returned as values and leave the game untouched. Only an
    /// out-of-bounds position or a runaway cascade is an error; after
    /// [`EngineError::CascadeLimit`] the game must be abandoned.
    pub fn request_swap(&mut self, a: Position, b: Position) -> Result<SwapOutcome, EngineError> {
        if self.session.is_terminal() {
            return Ok(self.reject(SwapRejection::GameOver, a, b));
        }
        if !a.is_adjacent(b) {
            return Ok(self.reject(SwapRejection::NotAdjacent, a, b));
        }
        if !is_valid_swap(&mut self.board, a, b)? {
            return Ok(self.reject(SwapRejection::NoMatch, a, b));
        }

        self.board.swap(a, b)?;
        let board_after_swap = self.board.clone();
        self.session.spend_move();
        self.hint = None;

        let cascade = resolve_cascade(
            &mut self.board,
            &mut self.tiles,
            self.config.max_cascade_passes,
        )?;
        self.session.add_score(cascade.score_gain);
        self.last_combo = cascade.combo();
        self.deadlocked = find_hint(&mut self.board).is_none();

        info!(
            from = %a,
            to = %b,
            gain = cascade.score_gain,
            combo = cascade.combo(),
            score = self.session.score(),
            moves_left = self.session.moves_left(),
            "turn resolved"
        );

        let outcome = self.session.outcome();
        if let Some(outcome) = outcome {
            info!(
                outcome = outcome.as_str(),
                score = self.session.score(),
                target = self.session.target_score(),
                "game over"
            );
        } else if self.deadlocked {
            info!(score = self.session.score(), "no moves left on board");
        }

        Ok(SwapOutcome::Accepted(TurnReport {
            from: a,
            to: b,
            board_after_swap,
            cascade,
            score: self.session.score(),
            moves_left: self.session.moves_left(),
            outcome,
            deadlocked: self.deadlocked,
        }))
    }

    fn reject(&self, reason: SwapRejection, a: Position, b: Position) -> SwapOutcome {
        debug!(from = %a, to = %b, reason = reason.code(), "swap rejected");
        SwapOutcome::Rejected(reason)
    }

    /// Find a matching swap and keep it on display until the next turn.
    pub fn hint(&mut self) -> Option<(Position, Position)> {
        self.hint = find_hint(&mut self.board);
        self.hint
    }

    pub fn clear_hint(&mut self) {
        self.hint = None;
    }

    pub fn valid_swaps(&mut self) -> Vec<(Position, Position)> {
        valid_swaps(&mut self.board)
    }

    /// New board, fresh budget and score. The tile stream continues.
    pub fn restart(&mut self) -> Result<(), EngineError> {
        self.board = Board::generate(self.config.rows, self.config.cols, &mut self.tiles);
        self.session.reset();
        self.episode_id = self.episode_id.wrapping_add(1);
        self.last_combo = 0;
        self.hint = None;
        self.settle()?;
        info!(episode = self.episode_id, "game restarted");
        Ok(())
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::new(self.board.clone(), &self.session);
        snap.deadlocked = self.deadlocked;
        snap.last_combo = self.last_combo;
        snap.hint = self.hint;
        snap.episode_id = self.episode_id;
        snap
    }
}
