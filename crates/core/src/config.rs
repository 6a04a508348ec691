//! Session configuration
//!
//! Parameters come from three layers, later layers winning:
//!
//! 1. Built-in defaults (8x8 board, 20 moves, target 300, classic tile table)
//! 2. An optional JSON file with kebab-case keys
//! 3. Environment variables
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "rows": 8,
//!   "cols": 8,
//!   "starting-moves": 20,
//!   "target-score": 300,
//!   "tile-weights": [{ "value": 1, "weight": 15 }, { "value": 2, "weight": 15 }],
//!   "seed": 42,
//!   "max-cascade-passes": 1000
//! }
//! ```
//!
//! Missing keys keep their defaults.
//!
//! # Environment Variables
//!
//! - `CALCULO_ROWS`, `CALCULO_COLS`: board size
//! - `CALCULO_MOVES`: starting move budget
//! - `CALCULO_TARGET`: target score
//! - `CALCULO_SEED`: RNG seed
//! - `CALCULO_MAX_PASSES`: cascade pass cap
//!
//! Values that do not parse are ignored.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rng::{classic_weights, validate_weights, TileWeight};
use crate::types::{GRID_COLS, GRID_ROWS, MAX_CASCADE_PASSES, STARTING_MOVES, TARGET_SCORE};

/// Smallest accepted board side
pub const MIN_SIDE: usize = 3;

/// Largest accepted board side
pub const MAX_SIDE: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub starting_moves: u32,
    pub target_score: u32,
    pub tile_weights: Vec<TileWeight>,
    /// Fixed seed; `None` lets the binary pick one
    pub seed: Option<u32>,
    pub max_cascade_passes: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            starting_moves: STARTING_MOVES,
            target_score: TARGET_SCORE,
            tile_weights: classic_weights(),
            seed: None,
            max_cascade_passes: MAX_CASCADE_PASSES,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Defaults (or `path`), then environment overrides, then `overrides`,
    /// then validation.
    ///
    /// `overrides` is where command-line flags go.
    pub fn load(
        path: Option<&Path>,
        overrides: impl FnOnce(&mut Self),
    ) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `CALCULO_*` environment variables
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    /// Override fields from an arbitrary variable lookup
    pub fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            lookup(key).and_then(|s| s.trim().parse().ok())
        }

        if let Some(rows) = parsed(&lookup, "CALCULO_ROWS") {
            self.rows = rows;
        }
        if let Some(cols) = parsed(&lookup, "CALCULO_COLS") {
            self.cols = cols;
        }
        if let Some(moves) = parsed(&lookup, "CALCULO_MOVES") {
            self.starting_moves = moves;
        }
        if let Some(target) = parsed(&lookup, "CALCULO_TARGET") {
            self.target_score = target;
        }
        if let Some(seed) = parsed(&lookup, "CALCULO_SEED") {
            self.seed = Some(seed);
        }
        if let Some(passes) = parsed(&lookup, "CALCULO_MAX_PASSES") {
            self.max_cascade_passes = passes;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, side) in [("rows", self.rows), ("cols", self.cols)] {
            if !(MIN_SIDE..=MAX_SIDE).contains(&side) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be between {MIN_SIDE} and {MAX_SIDE}, got {side}"
                )));
            }
        }
        if self.starting_moves == 0 {
            return Err(ConfigError::Invalid("starting-moves must be positive".into()));
        }
        if self.max_cascade_passes == 0 {
            return Err(ConfigError::Invalid(
                "max-cascade-passes must be positive".into(),
            ));
        }
        validate_weights(&self.tile_weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        assert_eq!(config.rows, 8);
        assert_eq!(config.cols, 8);
        assert_eq!(config.starting_moves, 20);
        assert_eq!(config.target_score, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "starting-moves": 5, "seed": 9 }"#).unwrap();
        assert_eq!(config.starting_moves, 5);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.rows, 8);
        assert_eq!(config.tile_weights, classic_weights());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "colums": 5 }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn env_overrides_and_ignores_garbage() {
        let vars: HashMap<&str, &str> = [
            ("CALCULO_ROWS", "6"),
            ("CALCULO_TARGET", " 120 "),
            ("CALCULO_MOVES", "lots"),
        ]
        .into_iter()
        .collect();

        let mut config = GameConfig::default();
        config.apply_vars(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.rows, 6);
        assert_eq!(config.target_score, 120);
        assert_eq!(config.starting_moves, 20);
    }

    #[test]
    fn load_applies_overrides_before_validating() {
        let config = GameConfig::load(None, |c| {
            c.rows = 5;
            c.seed = Some(4);
        })
        .unwrap();
        assert_eq!(config.rows, 5);
        assert_eq!(config.seed, Some(4));

        let err = GameConfig::load(None, |c| c.starting_moves = 0).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = GameConfig::load(Some(Path::new("/nonexistent/calculo.json")), |_| {}).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let tiny = GameConfig {
            rows: 2,
            ..GameConfig::default()
        };
        assert!(tiny.validate().is_err());

        let no_moves = GameConfig {
            starting_moves: 0,
            ..GameConfig::default()
        };
        assert!(no_moves.validate().is_err());

        let zero_tile = GameConfig {
            tile_weights: vec![TileWeight::new(0, 1)],
            ..GameConfig::default()
        };
        assert!(zero_tile.validate().is_err());
    }
}
