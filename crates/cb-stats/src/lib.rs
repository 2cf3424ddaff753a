//! Per-match statistics aggregation for CustomBalance.
//!
//! Provides:
//! - Folding fetched match rows into averaged player records
//! - Change detection between two refreshes of the same player

pub mod aggregate;
pub mod change;

pub use aggregate::{
    AggregationConfig, MatchParticipation, StatsAggregator, ARAM_QUEUE_ID, DEFAULT_MAX_MATCHES,
};
pub use change::{stats_changed, StatDelta};
