//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and renders into a simple framebuffer that
//! is diff-flushed to a terminal backend.
//!
//! - [`GameView`] draws a snapshot (or a playback frame) into a [`FrameBuffer`]
//! - [`Playback`] paces a resolved turn as swap, flash and fall steps
//! - [`TerminalRenderer`] owns raw mode, the alternate screen and mouse capture

pub mod fb;
pub mod frame;
pub mod game_view;
pub mod playback;
pub mod renderer;

pub use calculo_crush_core as core;
pub use calculo_crush_engine as engine;
pub use calculo_crush_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use frame::{BoardFrame, Tally};
pub use game_view::{tile_color, GameView, Marks, Viewport};
pub use playback::Playback;
pub use renderer::{changed_spans, encode_spans, Span, TerminalRenderer};
