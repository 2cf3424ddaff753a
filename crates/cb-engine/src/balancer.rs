//! The balancing facade: validate, score, partition, refine.

use std::collections::HashSet;
use tracing::{debug, info, warn};

use cb_types::{
    BalanceDiagnostics, BalanceError, CbResult, Outcome, PlayerRecord, ScoredPlayer,
    MAX_ROSTER_SIZE, MIN_ROSTER_SIZE,
};

use crate::config::BalancerConfig;
use crate::refine::SwapRefiner;
use crate::scoring::ScoreCalculator;
use crate::search::{PartitionStrategy, StrategyKind};

/// Splits rosters into two balanced teams.
///
/// Holds only configuration; every call works on its own data, so one
/// balancer can serve concurrent callers.
pub struct Balancer {
    config: BalancerConfig,
    strategy: Box<dyn PartitionStrategy>,
    refiner: SwapRefiner,
}

impl Balancer {
    pub fn new(config: BalancerConfig) -> Self {
        Self {
            strategy: config.strategy.build(),
            refiner: SwapRefiner::new(config.refine_rounds),
            config,
        }
    }

    pub fn config(&self) -> &BalancerConfig {
        &self.config
    }

    /// Balance a roster of raw player records.
    pub fn balance(&self, roster: &[PlayerRecord]) -> CbResult<Outcome> {
        check_roster_size(roster.len())?;
        for record in roster {
            record.validate()?;
        }
        check_unique_ids(roster.iter().map(|record| record.id.as_str()))?;

        let scored = ScoreCalculator::score_roster(roster);
        check_scores(&scored)?;
        self.run(scored)
    }

    /// Balance players whose composite scores were computed elsewhere.
    pub fn balance_scored(&self, roster: Vec<ScoredPlayer>) -> CbResult<Outcome> {
        check_roster_size(roster.len())?;
        check_scores(&roster)?;
        check_unique_ids(roster.iter().map(|player| player.id()))?;

        self.run(roster)
    }

    fn run(&self, roster: Vec<ScoredPlayer>) -> CbResult<Outcome> {
        info!(
            "Balancing roster of {} players with {} strategy",
            roster.len(),
            self.strategy.name()
        );

        let seed = self.strategy.partition(&roster)?;
        seed.check_covers(roster.len())?;
        let initial_diff = seed.diff(&roster);
        let candidates_evaluated = seed.candidates_evaluated;
        debug!(
            "Seed partition diff {} after {} candidates",
            initial_diff, candidates_evaluated
        );

        let refinement = self.refiner.refine(&roster, seed)?;
        if refinement.swaps_committed > 0 && self.config.strategy == StrategyKind::Exhaustive {
            warn!(
                "Swap refinement improved an exhaustive partition: {} -> {}",
                initial_diff, refinement.diff
            );
        }

        let (team_a, team_b) = refinement.partition.materialize(&roster);
        let (team_a_score, team_b_score) = refinement.partition.totals(&roster);
        info!(
            "Balanced {} vs {} players, score diff {}",
            team_a.len(),
            team_b.len(),
            refinement.diff
        );

        Ok(Outcome {
            team_a,
            team_b,
            team_a_score,
            team_b_score,
            score_diff: refinement.diff,
            diagnostics: BalanceDiagnostics {
                strategy: self.strategy.name().to_string(),
                candidates_evaluated,
                initial_diff,
                refine_rounds_run: refinement.rounds_run,
                swaps_committed: refinement.swaps_committed,
            },
        })
    }
}

impl Default for Balancer {
    fn default() -> Self {
        Self::new(BalancerConfig::default())
    }
}

fn check_roster_size(size: usize) -> Result<(), BalanceError> {
    if (MIN_ROSTER_SIZE..=MAX_ROSTER_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(BalanceError::RosterSize {
            size,
            min: MIN_ROSTER_SIZE,
            max: MAX_ROSTER_SIZE,
        })
    }
}

/// Every score must be finite, and so must the sum of their magnitudes: that
/// bounds both team totals and their differential.
fn check_scores(roster: &[ScoredPlayer]) -> Result<(), BalanceError> {
    let mut magnitude = 0.0_f64;
    for player in roster {
        magnitude += player.score.abs();
        if !magnitude.is_finite() {
            return Err(BalanceError::InvalidStat {
                player_id: player.id().to_string(),
                field: "score",
                value: player.score,
            });
        }
    }
    Ok(())
}

fn check_unique_ids<'a>(ids: impl Iterator<Item = &'a str>) -> Result<(), BalanceError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(BalanceError::DuplicatePlayer { id: id.to_string() });
        }
    }
    Ok(())
}
