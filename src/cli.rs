//! Command-line options shared by the binaries.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Args;

use crate::core::GameConfig;

#[derive(Args, Debug, Clone, Default)]
pub struct GameArgs {
    /// Optional JSON config file (kebab-case keys).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// RNG seed; defaults to one derived from the clock.
    #[arg(long)]
    pub seed: Option<u32>,
    /// Board rows.
    #[arg(long)]
    pub rows: Option<usize>,
    /// Board columns.
    #[arg(long)]
    pub cols: Option<usize>,
    /// Starting move budget.
    #[arg(long)]
    pub moves: Option<u32>,
    /// Target score.
    #[arg(long)]
    pub target: Option<u32>,
    /// Tracing filter, e.g. "info", "debug".
    #[arg(long, default_value = "info")]
    pub log: String,
}

impl GameArgs {
    /// Defaults or file, then `CALCULO_*` variables, then flags, then validation.
    ///
    /// The returned config always carries a seed.
    pub fn load_config(&self) -> Result<GameConfig> {
        GameConfig::load(self.config.as_deref(), |config| self.apply_to(config))
            .context("loading game configuration")
    }

    fn apply_to(&self, config: &mut GameConfig) {
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(moves) = self.moves {
            config.starting_moves = moves;
        }
        if let Some(target) = self.target {
            config.target_score = target;
        }
        config.seed = Some(self.seed.or(config.seed).unwrap_or_else(clock_seed));
    }
}

/// Low 32 bits of the current time in nanoseconds.
pub fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        game: GameArgs,
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from(["test", "--seed", "9", "--rows", "5", "--target", "50"]);
        assert_eq!(cli.game.log, "info");

        let mut config = GameConfig::default();
        cli.game.apply_to(&mut config);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.rows, 5);
        assert_eq!(config.cols, 8);
        assert_eq!(config.target_score, 50);
    }

    #[test]
    fn load_config_runs_flags_through_validation() {
        let cli = Cli::parse_from(["test", "--rows", "2"]);
        assert!(cli.game.load_config().is_err());

        let cli = Cli::parse_from(["test", "--moves", "7", "--seed", "3"]);
        let config = cli.game.load_config().unwrap();
        assert_eq!(config.starting_moves, 7);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn missing_seed_is_filled_in() {
        let cli = Cli::parse_from(["test"]);
        let mut config = GameConfig::default();
        cli.game.apply_to(&mut config);
        assert!(config.seed.is_some());
    }
}
