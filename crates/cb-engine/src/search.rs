//! Partition strategies: how the seed split of a scored roster is chosen.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use cb_types::{
    internal_error, split_diff, team_a_size, BalanceError, CbResult, Partition, ScoredPlayer,
    Side,
};

/// Common trait for all partition strategies.
pub trait PartitionStrategy: Send + Sync {
    /// Split `roster` into `TeamA` (`⌊N/2⌋` players) and `TeamB` (the rest).
    fn partition(&self, roster: &[ScoredPlayer]) -> CbResult<Partition>;

    /// Human-readable strategy name.
    fn name(&self) -> &str;
}

/// Which strategy produces the seed partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    Exhaustive,
    AlternatingDraft,
}

impl StrategyKind {
    pub fn build(self) -> Box<dyn PartitionStrategy> {
        match self {
            Self::Exhaustive => Box::new(ExhaustiveSearch),
            Self::AlternatingDraft => Box::new(AlternatingDraft),
        }
    }
}

/// Number of ways to choose `k` of `n`, `None` on overflow.
pub fn binomial(n: usize, k: usize) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k) as u64;
    let n = n as u64;
    let mut result: u64 = 1;
    for i in 0..k {
        // result * (n - i) is always divisible by (i + 1) here
        result = result.checked_mul(n - i)? / (i + 1);
    }
    Some(result)
}

/// Lexicographic `k`-of-`n` index combinations.
///
/// Yields index lists in increasing order, each list itself ascending, so the
/// relative order of the source sequence is preserved: for `(4, 2)` the
/// sequence is `[0,1] [0,2] [0,3] [1,2] [1,3] [2,3]`.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();

        // Advance the rightmost index that still has room, then pack the
        // following ones directly behind it.
        let k = self.indices.len();
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if self.indices[i] != i + self.n - k {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
        }

        Some(current)
    }
}

// ---- Exhaustive search ----

/// Evaluates every size-constrained split and keeps the one with the smallest
/// differential. The first candidate to reach the minimum wins ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustiveSearch;

impl PartitionStrategy for ExhaustiveSearch {
    fn partition(&self, roster: &[ScoredPlayer]) -> CbResult<Partition> {
        let n = roster.len();
        let k = team_a_size(n);
        if k == 0 {
            return Err(BalanceError::EmptyTeam { side: Side::TeamA }.into());
        }

        debug!(
            "Exhaustive search over {:?} candidate splits of {} players",
            binomial(n, k),
            n
        );

        let mut mask = vec![false; n];
        let mut best: Option<(f64, Vec<usize>)> = None;
        let mut evaluated: u64 = 0;

        for candidate in Combinations::new(n, k) {
            mask.iter_mut().for_each(|slot| *slot = false);
            for &idx in &candidate {
                mask[idx] = true;
            }

            let diff = split_diff(roster, &mask);
            evaluated += 1;

            let improves = match &best {
                None => true,
                Some((best_diff, _)) => diff < *best_diff,
            };
            if improves {
                trace!("New best split {:?} with diff {}", candidate, diff);
                best = Some((diff, candidate));
            }
        }

        let (diff, team_a) =
            best.ok_or_else(|| internal_error!("no candidate split for {} players", n))?;

        let mut on_a = vec![false; n];
        for &idx in &team_a {
            on_a[idx] = true;
        }
        let team_b: Vec<usize> = (0..n).filter(|&idx| !on_a[idx]).collect();

        debug!("Exhaustive search settled on diff {} after {} candidates", diff, evaluated);
        Ok(Partition::new(team_a, team_b).with_candidates_evaluated(evaluated))
    }

    fn name(&self) -> &str {
        "exhaustive"
    }
}

// ---- Alternating draft ----

/// Sorts players strongest first and deals them out alternately.
///
/// For odd rosters the strongest player goes to `TeamB` so that `TeamA`
/// still ends up with `⌊N/2⌋` players.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlternatingDraft;

impl PartitionStrategy for AlternatingDraft {
    fn partition(&self, roster: &[ScoredPlayer]) -> CbResult<Partition> {
        let n = roster.len();
        if team_a_size(n) == 0 {
            return Err(BalanceError::EmptyTeam { side: Side::TeamA }.into());
        }

        // Stable: equal scores keep roster order.
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| roster[b].score.total_cmp(&roster[a].score));

        let mut team_a = Vec::with_capacity(n / 2);
        let mut team_b = Vec::with_capacity(n - n / 2);
        for (i, idx) in order.into_iter().enumerate() {
            if (i + n) % 2 == 0 {
                team_a.push(idx);
            } else {
                team_b.push(idx);
            }
        }

        Ok(Partition::new(team_a, team_b).with_candidates_evaluated(1))
    }

    fn name(&self) -> &str {
        "alternating_draft"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cb_types::{CbError, PlayerRecord};

    fn roster(scores: &[f64]) -> Vec<ScoredPlayer> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| ScoredPlayer::new(PlayerRecord::new(format!("p{i}")), score))
            .collect()
    }

    fn named(entries: &[(&str, f64)]) -> Vec<ScoredPlayer> {
        entries
            .iter()
            .map(|&(id, score)| ScoredPlayer::new(PlayerRecord::new(id), score))
            .collect()
    }

    fn ids(roster: &[ScoredPlayer], indices: &[usize]) -> Vec<String> {
        indices.iter().map(|&i| roster[i].id().to_string()).collect()
    }

    #[test]
    fn combinations_are_lexicographic() {
        let combos: Vec<Vec<usize>> = Combinations::new(4, 2).collect();
        assert_eq!(
            combos,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }

    #[test]
    fn combinations_edge_cases() {
        assert_eq!(Combinations::new(3, 0).collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
        assert_eq!(Combinations::new(3, 3).collect::<Vec<_>>(), vec![vec![0, 1, 2]]);
        assert_eq!(Combinations::new(2, 3).count(), 0);
        assert_eq!(Combinations::new(10, 5).count(), 252);
    }

    #[test]
    fn binomial_counts() {
        assert_eq!(binomial(10, 5), Some(252));
        assert_eq!(binomial(9, 4), Some(126));
        assert_eq!(binomial(2, 1), Some(2));
        assert_eq!(binomial(3, 5), Some(0));
        assert_eq!(binomial(40, 20), Some(137_846_528_820));
    }

    #[test]
    fn exhaustive_finds_perfect_split() {
        let players = roster(&[10.0, 20.0, 30.0, 40.0]);
        let partition = ExhaustiveSearch.partition(&players).unwrap();

        assert_eq!(partition.team_a, vec![0, 3]);
        assert_eq!(partition.team_b, vec![1, 2]);
        assert_eq!(partition.diff(&players), 0.0);
        assert_eq!(partition.candidates_evaluated, 6);
    }

    #[test]
    fn exhaustive_first_candidate_wins_ties() {
        // [a, b] and [c, d] both split 20 / 20; [a, b] is enumerated first.
        let players = named(&[("a", 10.0), ("b", 10.0), ("c", 15.0), ("d", 5.0)]);
        let partition = ExhaustiveSearch.partition(&players).unwrap();
        assert_eq!(ids(&players, &partition.team_a), vec!["a", "b"]);

        let again = ExhaustiveSearch.partition(&players).unwrap();
        assert_eq!(partition, again);
    }

    #[test]
    fn exhaustive_tie_break_follows_input_order_not_id() {
        let forward = named(&[("zed", 10.0), ("amy", 10.0)]);
        let partition = ExhaustiveSearch.partition(&forward).unwrap();
        assert_eq!(ids(&forward, &partition.team_a), vec!["zed"]);

        let reversed = named(&[("amy", 10.0), ("zed", 10.0)]);
        let partition = ExhaustiveSearch.partition(&reversed).unwrap();
        assert_eq!(ids(&reversed, &partition.team_a), vec!["amy"]);
    }

    #[test]
    fn exhaustive_odd_roster_puts_extra_player_on_team_b() {
        let players = roster(&[7.0, 3.0, 5.0, 1.0, 9.0]);
        let partition = ExhaustiveSearch.partition(&players).unwrap();

        assert_eq!(partition.team_a.len(), 2);
        assert_eq!(partition.team_b.len(), 3);
        assert_eq!(partition.candidates_evaluated, 10);
        // 25 total: best is 12 vs 13
        assert_eq!(partition.diff(&players), 1.0);
    }

    #[test]
    fn exhaustive_counts_every_candidate_at_max_roster() {
        let players = roster(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        let partition = ExhaustiveSearch.partition(&players).unwrap();
        assert_eq!(partition.candidates_evaluated, 252);
        assert!(partition.check_covers(players.len()).is_ok());
    }

    #[test]
    fn exhaustive_is_not_limited_to_ten_players() {
        let scores: Vec<f64> = (1..=12).map(f64::from).collect();
        let players = roster(&scores);
        let partition = ExhaustiveSearch.partition(&players).unwrap();
        assert_eq!(partition.candidates_evaluated, 924);
        assert_eq!(partition.diff(&players), 0.0);
    }

    #[test]
    fn exhaustive_rejects_single_player() {
        let players = roster(&[42.0]);
        match ExhaustiveSearch.partition(&players) {
            Err(CbError::Balance(BalanceError::EmptyTeam { side })) => {
                assert_eq!(side, Side::TeamA)
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn alternating_draft_even_roster() {
        let players = roster(&[40.0, 10.0, 30.0, 20.0]);
        let partition = AlternatingDraft.partition(&players).unwrap();

        assert_eq!(partition.team_a, vec![0, 3]);
        assert_eq!(partition.team_b, vec![2, 1]);
        assert_eq!(partition.diff(&players), 20.0);
        assert_eq!(partition.candidates_evaluated, 1);
    }

    #[test]
    fn alternating_draft_odd_roster_keeps_team_sizes() {
        let players = roster(&[30.0, 20.0, 10.0]);
        let partition = AlternatingDraft.partition(&players).unwrap();

        assert_eq!(partition.team_a, vec![1]);
        assert_eq!(partition.team_b, vec![0, 2]);
    }

    #[test]
    fn alternating_draft_ties_keep_roster_order() {
        let players = named(&[("x", 5.0), ("y", 5.0)]);
        let partition = AlternatingDraft.partition(&players).unwrap();
        assert_eq!(ids(&players, &partition.team_a), vec!["x"]);
        assert_eq!(ids(&players, &partition.team_b), vec!["y"]);
    }

    #[test]
    fn strategy_kind_builds_named_strategies() {
        assert_eq!(StrategyKind::default(), StrategyKind::Exhaustive);
        assert_eq!(StrategyKind::Exhaustive.build().name(), "exhaustive");
        assert_eq!(
            StrategyKind::AlternatingDraft.build().name(),
            "alternating_draft"
        );
    }
}
