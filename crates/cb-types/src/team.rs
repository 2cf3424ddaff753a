use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{BalanceError, CbResult};
use crate::validation_error;
use crate::player::ScoredPlayer;

/// Smallest roster the engine accepts.
pub const MIN_ROSTER_SIZE: usize = 2;

/// Largest roster the engine accepts.
pub const MAX_ROSTER_SIZE: usize = 10;

/// One of the two teams of a bipartition.
///
/// `TeamA` always holds `⌊N/2⌋` players; for odd rosters `TeamB` is the
/// larger team by exactly one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    TeamA,
    TeamB,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TeamA => write!(f, "A"),
            Self::TeamB => write!(f, "B"),
        }
    }
}

/// Size of `TeamA` for a roster of `n` players.
pub fn team_a_size(n: usize) -> usize {
    n / 2
}

/// Score totals of the players flagged in `in_team_a` and of the rest.
///
/// Both sums are accumulated in roster order, so a given split always yields
/// the same bits regardless of how the team lists happen to be ordered.
pub fn split_totals(roster: &[ScoredPlayer], in_team_a: &[bool]) -> (f64, f64) {
    let mut team_a = 0.0;
    let mut team_b = 0.0;
    for (player, &on_a) in roster.iter().zip(in_team_a) {
        if on_a {
            team_a += player.score;
        } else {
            team_b += player.score;
        }
    }
    (team_a, team_b)
}

/// Score differential between the players flagged in `in_team_a` and the rest.
pub fn split_diff(roster: &[ScoredPlayer], in_team_a: &[bool]) -> f64 {
    let (team_a, team_b) = split_totals(roster, in_team_a);
    (team_a - team_b).abs()
}

/// A bipartition expressed as positions into a scored roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub team_a: Vec<usize>,
    pub team_b: Vec<usize>,
    /// How many candidate splits the producing strategy examined.
    pub candidates_evaluated: u64,
}

impl Partition {
    pub fn new(team_a: Vec<usize>, team_b: Vec<usize>) -> Self {
        Self {
            team_a,
            team_b,
            candidates_evaluated: 0,
        }
    }

    pub fn with_candidates_evaluated(mut self, count: u64) -> Self {
        self.candidates_evaluated = count;
        self
    }

    pub fn len(&self) -> usize {
        self.team_a.len() + self.team_b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Membership mask over a roster of `n` players (`true` = `TeamA`).
    pub fn membership(&self, n: usize) -> Vec<bool> {
        let mut mask = vec![false; n];
        for &idx in &self.team_a {
            if let Some(slot) = mask.get_mut(idx) {
                *slot = true;
            }
        }
        mask
    }

    pub fn diff(&self, roster: &[ScoredPlayer]) -> f64 {
        split_diff(roster, &self.membership(roster.len()))
    }

    /// `(team_a, team_b)` score totals, summed in roster order.
    pub fn totals(&self, roster: &[ScoredPlayer]) -> (f64, f64) {
        split_totals(roster, &self.membership(roster.len()))
    }

    /// Check that neither team is empty.
    pub fn ensure_non_empty(&self) -> Result<(), BalanceError> {
        if self.team_a.is_empty() {
            return Err(BalanceError::EmptyTeam { side: Side::TeamA });
        }
        if self.team_b.is_empty() {
            return Err(BalanceError::EmptyTeam { side: Side::TeamB });
        }
        Ok(())
    }

    /// Check that the two teams are non-empty, disjoint and together cover
    /// every position of a roster of `n` players.
    pub fn check_covers(&self, n: usize) -> CbResult<()> {
        self.ensure_non_empty()?;

        let mut seen = vec![false; n];
        for &idx in self.team_a.iter().chain(&self.team_b) {
            match seen.get_mut(idx) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => return Err(validation_error!("roster position {} is on both teams", idx)),
                None => {
                    return Err(validation_error!(
                        "roster position {} is out of range for {} players",
                        idx,
                        n
                    ))
                }
            }
        }

        if self.len() != n {
            return Err(validation_error!(
                "partition covers {} of {} players",
                self.len(),
                n
            ));
        }
        Ok(())
    }

    /// Clone the referenced players out of `roster`, preserving list order.
    pub fn materialize(&self, roster: &[ScoredPlayer]) -> (Vec<ScoredPlayer>, Vec<ScoredPlayer>) {
        let pick = |indices: &[usize]| -> Vec<ScoredPlayer> {
            indices
                .iter()
                .filter_map(|&idx| roster.get(idx).cloned())
                .collect()
        };
        (pick(&self.team_a), pick(&self.team_b))
    }
}

/// How an outcome was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceDiagnostics {
    /// Name of the strategy that produced the seed partition.
    pub strategy: String,
    pub candidates_evaluated: u64,
    /// Differential of the seed partition, before refinement.
    pub initial_diff: f64,
    pub refine_rounds_run: usize,
    pub swaps_committed: usize,
}

/// Result of one balancing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub team_a: Vec<ScoredPlayer>,
    pub team_b: Vec<ScoredPlayer>,
    /// Team totals, summed in roster order rather than team list order.
    pub team_a_score: f64,
    pub team_b_score: f64,
    /// `|team_a_score - team_b_score|`
    pub score_diff: f64,
    pub diagnostics: BalanceDiagnostics,
}

impl Outcome {
    pub fn team(&self, side: Side) -> &[ScoredPlayer] {
        match side {
            Side::TeamA => &self.team_a,
            Side::TeamB => &self.team_b,
        }
    }
}
