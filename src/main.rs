//! Terminal Calculo Crush runner (default binary).
//!
//! This is the primary gameplay entrypoint.
//! It uses crossterm for keyboard and mouse input and a custom framebuffer-based
//! renderer. Turns resolve instantly in the engine; the playback only paces what
//! the player sees. Input waits until it has finished, and a key press skips it.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use calculo_crush::cli::GameArgs;
use calculo_crush::core::TileSource;
use calculo_crush::engine::{Game, SwapOutcome, SwapRejection};
use calculo_crush::input::{handle_key_event, should_quit, Command, CursorController};
use calculo_crush::term::{FrameBuffer, GameView, Marks, Playback, TerminalRenderer, Viewport};
use calculo_crush::types::TICK_MS;

#[derive(Parser, Debug)]
#[command(about = "Swap tiles so that a * b == c, in rows and columns")]
struct Args {
    #[command(flatten)]
    game: GameArgs,
    /// Write logs to this file; nothing is logged otherwise.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(args.game.log.clone()))
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    }

    let config = args.game.load_config()?;
    let mut game = Game::new(config).context("starting game")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run<T: TileSource>(term: &mut TerminalRenderer, game: &mut Game<T>) -> Result<()> {
    let view = GameView::default();
    let dims = (game.board().rows(), game.board().cols());
    let mut controller = CursorController::new(dims.0, dims.1);
    let mut playback = Playback::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut message: Option<&'static str> = None;

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let snap = game.snapshot();
        let frame = playback.frame();
        let marks = Marks {
            cursor: Some(controller.cursor()),
            selected: controller.selected(),
            message,
        };
        view.render_into(&snap, frame.as_ref(), &marks, viewport, &mut fb);
        term.present(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            let command = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if playback.is_finished() {
                        handle_key_event(key).and_then(|action| controller.apply(action))
                    } else {
                        // Any other key cuts the animation short.
                        playback.skip();
                        None
                    }
                }
                Event::Mouse(mouse) if playback.is_finished() => {
                    let cell = view.cell_at(viewport, dims, mouse.column, mouse.row);
                    controller.handle_mouse(mouse.kind, cell)
                }
                Event::Resize(..) => {
                    term.invalidate();
                    None
                }
                _ => None,
            };

            if let Some(command) = command {
                message = execute(game, command, &mut playback, &mut controller)?;
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            playback.tick(elapsed.as_millis() as u32);
        }
    }
}

/// Carry out one controller command and return the status line to show.
fn execute<T: TileSource>(
    game: &mut Game<T>,
    command: Command,
    playback: &mut Playback,
    controller: &mut CursorController,
) -> Result<Option<&'static str>> {
    match command {
        Command::Swap(a, b) => {
            let before = game.board().clone();
            match game.request_swap(a, b)? {
                SwapOutcome::Accepted(report) => {
                    *playback = Playback::for_turn(&before, &report);
                    Ok((report.combo() > 1).then_some("combo!"))
                }
                SwapOutcome::Rejected(SwapRejection::NoMatch) => {
                    *playback = Playback::for_rejected_swap(&before, a, b);
                    Ok(Some(SwapRejection::NoMatch.message()))
                }
                SwapOutcome::Rejected(reason) => Ok(Some(reason.message())),
            }
        }
        Command::Hint => Ok(Some(match game.hint() {
            Some(_) => "try the marked pair",
            None => "no moves left",
        })),
        Command::Restart => {
            game.restart()?;
            controller.clear();
            *playback = Playback::default();
            Ok(None)
        }
    }
}
