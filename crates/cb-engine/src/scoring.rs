//! Composite player scoring.
//!
//! Five weighted sub-scores are blended into one comparable scalar. The
//! weights and sub-score formulas are fixed; changing them changes which
//! teams the engine produces.

use serde::{Deserialize, Serialize};

use cb_types::{PlayerRecord, ScoredPlayer};

/// Score assigned to players without any recorded games.
pub const NO_HISTORY_SCORE: f64 = 50.0;

pub const WIN_RATE_WEIGHT: f64 = 0.25;
pub const KDA_WEIGHT: f64 = 0.20;
pub const DAMAGE_WEIGHT: f64 = 0.20;
pub const TANKINESS_WEIGHT: f64 = 0.10;
pub const UTILITY_WEIGHT: f64 = 0.15;
pub const PERFORMANCE_WEIGHT: f64 = 0.10;

/// Unweighted sub-scores plus the weighted total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// wins / games * 100
    pub win_rate: f64,
    /// avg KDA * 10
    pub kda: f64,
    /// avg damage dealt / 1000
    pub damage: f64,
    /// avg damage taken / 1000
    pub tankiness: f64,
    /// avg healing / 1000 + avg CC score * 2
    pub utility: f64,
    /// prior performance score * 10
    pub performance: f64,
    pub total: f64,
}

/// Stateless calculator for composite scores.
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Sub-score breakdown, `None` for players with no games.
    pub fn breakdown(record: &PlayerRecord) -> Option<ScoreBreakdown> {
        if record.games_played == 0 {
            return None;
        }

        let win_rate = record.wins as f64 / record.games_played as f64 * 100.0;
        let kda = record.avg_kda * 10.0;
        let damage = record.avg_damage_dealt / 1000.0;
        let tankiness = record.avg_damage_taken / 1000.0;
        let utility = (record.avg_healing / 1000.0) + (record.avg_cc_score * 2.0);
        let performance = record.prior_performance_score * 10.0;

        let total = WIN_RATE_WEIGHT * win_rate
            + KDA_WEIGHT * kda
            + DAMAGE_WEIGHT * damage
            + TANKINESS_WEIGHT * tankiness
            + UTILITY_WEIGHT * utility
            + PERFORMANCE_WEIGHT * performance;

        Some(ScoreBreakdown {
            win_rate,
            kda,
            damage,
            tankiness,
            utility,
            performance,
            total,
        })
    }

    pub fn score(record: &PlayerRecord) -> f64 {
        Self::breakdown(record)
            .map(|breakdown| breakdown.total)
            .unwrap_or(NO_HISTORY_SCORE)
    }

    /// Derive a fresh `ScoredPlayer` for every record, keeping input order.
    pub fn score_roster(roster: &[PlayerRecord]) -> Vec<ScoredPlayer> {
        roster
            .iter()
            .map(|record| ScoredPlayer::new(record.clone(), Self::score(record)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn no_history_gets_default_score() {
        let record = PlayerRecord::new("rookie")
            .with_kda(9.0)
            .with_damage(50_000.0, 40_000.0);
        assert_eq!(ScoreCalculator::score(&record), NO_HISTORY_SCORE);
        assert!(ScoreCalculator::breakdown(&record).is_none());
    }

    #[test]
    fn weighted_blend_matches_formula() {
        let record = PlayerRecord::new("veteran")
            .with_record(20, 12, 8)
            .with_kda(3.5)
            .with_damage(25_000.0, 20_000.0)
            .with_healing(5_000.0)
            .with_cc_score(12.0)
            .with_performance_score(2.0);

        let breakdown = ScoreCalculator::breakdown(&record).unwrap();
        assert!(approx_eq(breakdown.win_rate, 60.0));
        assert!(approx_eq(breakdown.kda, 35.0));
        assert!(approx_eq(breakdown.damage, 25.0));
        assert!(approx_eq(breakdown.tankiness, 20.0));
        assert!(approx_eq(breakdown.utility, 29.0));
        assert!(approx_eq(breakdown.performance, 20.0));

        // 15 + 7 + 5 + 2 + 4.35 + 2
        assert!(approx_eq(breakdown.total, 35.35));
        assert_eq!(ScoreCalculator::score(&record), breakdown.total);
    }

    #[test]
    fn all_zero_stats_with_games_scores_zero() {
        let record = PlayerRecord::new("afk").with_record(5, 0, 5);
        assert_eq!(ScoreCalculator::score(&record), 0.0);
    }

    #[test]
    fn optional_stats_contribute_only_when_present() {
        let base = PlayerRecord::new("support").with_record(10, 5, 5);
        let with_cc = base.clone().with_cc_score(10.0);

        let delta = ScoreCalculator::score(&with_cc) - ScoreCalculator::score(&base);
        assert!(approx_eq(delta, UTILITY_WEIGHT * 20.0));
    }

    #[test]
    fn score_roster_keeps_order_and_does_not_touch_input() {
        let roster = vec![
            PlayerRecord::new("a").with_record(4, 4, 0),
            PlayerRecord::new("b"),
        ];
        let before = roster.clone();
        let scored = ScoreCalculator::score_roster(&roster);

        assert_eq!(roster, before);
        assert_eq!(scored[0].id(), "a");
        assert!(approx_eq(scored[0].score, 25.0));
        assert_eq!(scored[1].score, NO_HISTORY_SCORE);
    }
}
