//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and turns actions
//! and mouse gestures into engine commands through a [`CursorController`]. No UI
//! framework is involved; the controller only knows the board's dimensions.

pub mod cursor;
pub mod map;

pub use calculo_crush_types as types;

pub use cursor::{Command, CursorController};
pub use map::{handle_key_event, should_quit};
