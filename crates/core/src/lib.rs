//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the board-state resolution engine for a number-product
//! match-three puzzle. It has **zero dependencies** on UI, input, or timing, making it:
//!
//! - **Deterministic**: the same seed produces identical games
//! - **Headless**: every operation runs to completion and returns a full description
//!   of what happened, so presentation can replay it at any pace
//! - **Testable**: fixtures are plain rows of integers
//!
//! # Module Structure
//!
//! - [`board`]: `rows x cols` grid of integer tiles
//! - [`rng`]: seeded LCG and the weighted tile generator
//! - [`matcher`]: product-rule match detection and the [`MatchSet`] bitset
//! - [`probe`]: swap validation and hint search via a restoring swap guard
//! - [`gravity`]: per-column drop and refill
//! - [`cascade`]: repeated resolution passes to a settled fixed point
//! - [`session`]: score, move budget, outcome
//! - [`config`]: session parameters from defaults, JSON and environment
//! - [`snapshot`]: immutable view for presentation
//!
//! # Game Rules
//!
//! - Three contiguous tiles in a row or column match when `first * second == third`
//!   (reading left to right or top to bottom)
//! - A swap is only accepted when it creates at least one match
//! - Matched tiles are scored by value, removed, the columns collapse, and the holes
//!   are refilled from the top; new matches resolve again as a combo
//! - Every accepted swap costs one move; when the budget is spent the game ends,
//!   won if the score reached the target
//!
//! # Example
//!
//! ```
//! use calculo_crush_core::{find_matches, is_valid_swap, resolve_cascade, Board, WeightedTiles};
//! use calculo_crush_types::Position;
//!
//! let mut board = Board::from_rows(&[
//!     [2, 6, 3, 1],
//!     [1, 4, 2, 5],
//!     [7, 5, 9, 1],
//! ]);
//! assert!(find_matches(&board).is_empty());
//!
//! // Swapping the 6 and the 3 gives 2 * 3 == 6 on the top row.
//! let (a, b) = (Position::new(0, 1), Position::new(0, 2));
//! assert!(is_valid_swap(&mut board, a, b).unwrap());
//! board.swap(a, b).unwrap();
//!
//! let mut tiles = WeightedTiles::classic(7);
//! let report = resolve_cascade(&mut board, &mut tiles, 1000).unwrap();
//! assert!(report.score_gain >= 11);
//! assert!(find_matches(&board).is_empty());
//! ```

pub mod board;
pub mod cascade;
pub mod config;
pub mod error;
pub mod gravity;
pub mod matcher;
pub mod probe;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use calculo_crush_types as types;

pub use board::Board;
pub use cascade::{remove_matched, resolve_cascade, CascadeReport, PassEffects};
pub use config::GameConfig;
pub use error::{ConfigError, EngineError};
pub use gravity::{collapse, drop_tiles, refill};
pub use matcher::{find_matches, has_match, is_product_triple, MatchSet};
pub use probe::{find_hint, is_valid_swap, probe_partners, valid_swaps, SwapProbe};
pub use rng::{classic_weights, SimpleRng, TileSource, TileWeight, WeightedTiles};
pub use session::GameSession;
pub use snapshot::GameSnapshot;
