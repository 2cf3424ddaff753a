//! # cb-engine
//!
//! Team balancing engine for CustomBalance.
//!
//! Converts per-player statistics into a composite score, searches the
//! equal(-ish)-sized bipartitions of a roster for the smallest score
//! differential, and polishes the result with a bounded swap pass.
//!
//! For odd rosters `TeamB` is always the larger team by one player.

pub mod balancer;
pub mod config;
pub mod refine;
pub mod scoring;
pub mod search;

pub use balancer::Balancer;
pub use config::BalancerConfig;
pub use refine::{Refinement, SwapRefiner, DEFAULT_REFINE_ROUNDS};
pub use scoring::{ScoreBreakdown, ScoreCalculator, NO_HISTORY_SCORE};
pub use search::{
    binomial, AlternatingDraft, Combinations, ExhaustiveSearch, PartitionStrategy, StrategyKind,
};

use cb_types::{CbResult, Outcome, PlayerRecord};

/// Balance `roster` with the default configuration.
pub fn balance(roster: &[PlayerRecord]) -> CbResult<Outcome> {
    Balancer::default().balance(roster)
}
