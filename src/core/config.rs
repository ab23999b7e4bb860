//! Engine configuration.
//!
//! The core itself has no timing: these values drive the `Scheduler` that
//! turns wall-clock (or virtual) time into render and chain ticks, plus the
//! seed for random play.

use serde::{Deserialize, Serialize};

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Period of the cosmetic render tick in milliseconds.
    pub render_tick_ms: u64,

    /// Period of the chain tick in milliseconds.
    /// One chain step happens per period while a chain is propagating.
    pub chain_tick_ms: u64,

    /// Seed for `RandomPlayer`.
    /// Same seed produces the same sequence of moves.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            render_tick_ms: 30,
            chain_tick_ms: 1000,
            seed: 42,
        }
    }
}

impl EngineConfig {
    pub fn with_render_tick_ms(mut self, ms: u64) -> Self {
        self.render_tick_ms = ms;
        self
    }

    pub fn with_chain_tick_ms(mut self, ms: u64) -> Self {
        self.chain_tick_ms = ms;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
