//! Headless player: always takes the first hint.
//!
//! Useful for soak-testing the engine and for eyeballing score distributions.
//! Logs go to stderr, one summary line per game goes to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use calculo_crush::cli::GameArgs;
use calculo_crush::engine::{Game, SwapOutcome};
use calculo_crush::types::Outcome;

#[derive(Parser, Debug)]
#[command(about = "Play Calculo Crush headlessly by following hints")]
struct Args {
    #[command(flatten)]
    game: GameArgs,
    /// Number of games to play back to back.
    #[arg(long, default_value_t = 1)]
    games: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(args.game.log.clone()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = args.game.load_config()?;
    info!(seed = ?config.seed, games = args.games, "autoplay starting");
    let mut game = Game::new(config).context("starting game")?;

    let mut wins = 0u32;
    for episode in 0..args.games {
        if episode > 0 {
            game.restart()?;
        }

        let mut turns = 0u32;
        let mut best_combo = 0usize;
        while !game.is_over() {
            let Some((a, b)) = game.hint() else {
                warn!(episode, "board deadlocked");
                break;
            };
            match game.request_swap(a, b)? {
                SwapOutcome::Accepted(report) => {
                    turns += 1;
                    best_combo = best_combo.max(report.combo());
                }
                SwapOutcome::Rejected(reason) => {
                    anyhow::bail!("hinted swap {a} <-> {b} was rejected: {}", reason.code());
                }
            }
        }

        let snap = game.snapshot();
        let outcome = snap.outcome.map(|o| o.as_str()).unwrap_or("deadlocked");
        if snap.outcome == Some(Outcome::Won) {
            wins += 1;
        }
        println!(
            "game {}: {} score {}/{} turns {} best combo {}",
            episode + 1,
            outcome,
            snap.score,
            snap.target_score,
            turns,
            best_combo
        );
    }

    info!(games = args.games, wins, "autoplay finished");
    Ok(())
}
