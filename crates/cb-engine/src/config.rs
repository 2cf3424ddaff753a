//! Balancer configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use cb_types::CbResult;

use crate::refine::DEFAULT_REFINE_ROUNDS;
use crate::search::StrategyKind;

/// Tunables for a [`Balancer`](crate::Balancer).
///
/// Roster size bounds and scoring weights are deliberately absent: they are
/// fixed constants of the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalancerConfig {
    /// Strategy producing the seed partition.
    pub strategy: StrategyKind,
    /// Maximum swap-refinement rounds. `0` skips refinement entirely.
    pub refine_rounds: usize,
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Exhaustive,
            refine_rounds: DEFAULT_REFINE_ROUNDS,
        }
    }
}

impl BalancerConfig {
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_refine_rounds(mut self, rounds: usize) -> Self {
        self.refine_rounds = rounds;
        self
    }

    pub fn from_json_str(json: &str) -> CbResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> CbResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
