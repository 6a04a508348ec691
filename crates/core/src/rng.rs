//! RNG module - weighted tile generation
//!
//! Replacement tiles are drawn from a weighted discrete distribution over a small
//! fixed set of integers. Low values dominate so that products remain reachable;
//! composites such as 12 or 36 are rare and mostly serve as the third cell of a match.
//!
//! Sampling is driven by a small seeded LCG so that a seed reproduces a whole game,
//! which keeps the engine deterministic for tests and the headless autoplay runner.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{Tile, CLASSIC_TILE_WEIGHTS, EMPTY_TILE};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // The increment is odd, so every state (zero included) lies on the full period
        Self { state: seed }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of an LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }
}

/// Anything that hands out one tile per call.
///
/// Calls are independent; the board never feeds state back into the source.
pub trait TileSource {
    fn next_tile(&mut self) -> Tile;
}

impl<F> TileSource for F
where
    F: FnMut() -> Tile,
{
    fn next_tile(&mut self) -> Tile {
        self()
    }
}

/// One entry of a tile distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileWeight {
    pub value: Tile,
    pub weight: u32,
}

impl TileWeight {
    pub const fn new(value: Tile, weight: u32) -> Self {
        Self { value, weight }
    }
}

/// The classic distribution as an owned table.
pub fn classic_weights() -> Vec<TileWeight> {
    CLASSIC_TILE_WEIGHTS
        .iter()
        .map(|&(value, weight)| TileWeight::new(value, weight))
        .collect()
}

/// Check a distribution table: non-empty, positive values and weights, no overflow.
pub fn validate_weights(weights: &[TileWeight]) -> Result<(), ConfigError> {
    if weights.is_empty() {
        return Err(ConfigError::Invalid("tile distribution is empty".into()));
    }
    let mut total: u32 = 0;
    for w in weights {
        if w.value == EMPTY_TILE {
            return Err(ConfigError::Invalid(
                "tile value 0 is reserved for empty cells".into(),
            ));
        }
        if w.weight == 0 {
            return Err(ConfigError::Invalid(format!(
                "tile {} has zero weight",
                w.value
            )));
        }
        total = total
            .checked_add(w.weight)
            .ok_or_else(|| ConfigError::Invalid("tile weights overflow".into()))?;
    }
    Ok(())
}

/// Weighted tile generator backed by a cumulative-weight table.
#[derive(Debug, Clone)]
pub struct WeightedTiles {
    values: Vec<Tile>,
    /// Running sum of weights; `cumulative[i]` is the exclusive upper bound for `values[i]`
    cumulative: Vec<u32>,
    rng: SimpleRng,
}

impl WeightedTiles {
    pub fn new(weights: &[TileWeight], seed: u32) -> Result<Self, ConfigError> {
        validate_weights(weights)?;
        Ok(Self::from_table(weights, seed))
    }

    /// Classic distribution with the given seed
    pub fn classic(seed: u32) -> Self {
        Self::from_table(&classic_weights(), seed)
    }

    fn from_table(weights: &[TileWeight], seed: u32) -> Self {
        let mut values = Vec::with_capacity(weights.len());
        let mut cumulative = Vec::with_capacity(weights.len());
        let mut total = 0u32;
        for w in weights {
            total += w.weight;
            values.push(w.value);
            cumulative.push(total);
        }
        Self {
            values,
            cumulative,
            rng: SimpleRng::new(seed),
        }
    }

    /// Sum of all weights
    pub fn total_weight(&self) -> u32 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Draw a tile
    pub fn draw(&mut self) -> Tile {
        let roll = self.rng.next_range(self.total_weight());
        let idx = self.cumulative.partition_point(|&bound| bound <= roll);
        self.values[idx]
    }

    /// Every value this generator can produce
    pub fn values(&self) -> &[Tile] {
        &self.values
    }
}

impl TileSource for WeightedTiles {
    fn next_tile(&mut self) -> Tile {
        self.draw()
    }
}
