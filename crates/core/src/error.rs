//! Error types for the resolution engine and its configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Conditions the engine signals instead of silently returning.
///
/// "No hint available" is deliberately absent: it is a normal game state and is
/// reported as `None` by the hint finder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A position outside the grid was read, written or swapped.
    #[error("position ({row}, {col}) is outside the {rows}x{cols} board")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// The cascade did not reach a settled board within the pass cap.
    ///
    /// Fatal: the board is left mid-resolution and must not be handed to a player.
    #[error("cascade did not settle after {passes} passes")]
    CascadeLimit { passes: usize },
}

/// Errors raised while loading or validating a [`crate::config::GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
