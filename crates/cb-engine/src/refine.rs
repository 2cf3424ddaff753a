//! Bounded first-improvement hill climbing over one-for-one swaps.
//!
//! Fed the output of [`ExhaustiveSearch`](crate::search::ExhaustiveSearch) the
//! refiner never finds a strictly better neighbour, since every swap lands on
//! a split the search already scored. It still runs in full so the cost of
//! the call does not depend on the seed strategy.

use serde::{Deserialize, Serialize};
use tracing::debug;

use cb_types::{split_diff, CbResult, Partition, ScoredPlayer};

/// Default number of refinement rounds.
pub const DEFAULT_REFINE_ROUNDS: usize = 10;

/// Result of a refinement pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Refinement {
    pub partition: Partition,
    pub diff: f64,
    /// Rounds scanned, including the final one that found nothing.
    pub rounds_run: usize,
    pub swaps_committed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapRefiner {
    max_rounds: usize,
}

impl SwapRefiner {
    pub fn new(max_rounds: usize) -> Self {
        Self { max_rounds }
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    /// Refine `partition` of `roster`.
    ///
    /// Each round scans `(TeamA[i], TeamB[j])` pairs in list order and commits
    /// the first swap that strictly lowers the differential. A committed swap
    /// exchanges the two players in place, so list positions are kept. The
    /// pass stops after a round without a commit or after `max_rounds`.
    pub fn refine(&self, roster: &[ScoredPlayer], partition: Partition) -> CbResult<Refinement> {
        partition.check_covers(roster.len())?;

        let mut mask = partition.membership(roster.len());
        let Partition {
            mut team_a,
            mut team_b,
            candidates_evaluated,
        } = partition;

        let mut rounds_run = 0;
        let mut swaps_committed = 0;

        for round in 0..self.max_rounds {
            rounds_run += 1;
            let current_diff = split_diff(roster, &mask);
            let mut improved = false;

            'scan: for i in 0..team_a.len() {
                for j in 0..team_b.len() {
                    let (p1, p2) = (team_a[i], team_b[j]);

                    // tentative swap
                    mask[p1] = false;
                    mask[p2] = true;
                    let new_diff = split_diff(roster, &mask);

                    if new_diff < current_diff {
                        team_a[i] = p2;
                        team_b[j] = p1;
                        swaps_committed += 1;
                        improved = true;
                        debug!(
                            "Round {}: swapped {} <-> {}, diff {} -> {}",
                            round,
                            roster[p1].id(),
                            roster[p2].id(),
                            current_diff,
                            new_diff
                        );
                        break 'scan;
                    }

                    // revert
                    mask[p1] = true;
                    mask[p2] = false;
                }
            }

            if !improved {
                break;
            }
        }

        let diff = split_diff(roster, &mask);
        Ok(Refinement {
            partition: Partition {
                team_a,
                team_b,
                candidates_evaluated,
            },
            diff,
            rounds_run,
            swaps_committed,
        })
    }
}

impl Default for SwapRefiner {
    fn default() -> Self {
        Self::new(DEFAULT_REFINE_ROUNDS)
    }
}
