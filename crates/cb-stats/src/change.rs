//! Comparing two snapshots of the same player.

use serde::{Deserialize, Serialize};

use cb_types::PlayerRecord;

/// True when any statistic that players care about moved between refreshes.
pub fn stats_changed(old: &PlayerRecord, new: &PlayerRecord) -> bool {
    old.games_played != new.games_played
        || old.wins != new.wins
        || old.losses != new.losses
        || old.avg_kda != new.avg_kda
        || old.prior_performance_score != new.prior_performance_score
}

/// Difference between two snapshots, `new - old`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatDelta {
    pub games_played: i64,
    /// Percentage points; a player without games counts as 0%.
    pub win_rate: f64,
    pub performance_score: f64,
}

impl StatDelta {
    pub fn between(old: &PlayerRecord, new: &PlayerRecord) -> Self {
        Self {
            games_played: i64::from(new.games_played) - i64::from(old.games_played),
            win_rate: new.win_rate().unwrap_or(0.0) - old.win_rate().unwrap_or(0.0),
            performance_score: new.prior_performance_score - old.prior_performance_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> PlayerRecord {
        PlayerRecord::new("p")
            .with_record(10, 5, 5)
            .with_kda(3.0)
            .with_damage(20_000.0, 15_000.0)
            .with_performance_score(4.0)
    }

    #[test]
    fn unchanged_snapshot() {
        assert!(!stats_changed(&snapshot(), &snapshot()));
    }

    #[test]
    fn damage_alone_is_not_a_change() {
        let new = snapshot().with_damage(25_000.0, 15_000.0);
        assert!(!stats_changed(&snapshot(), &new));
    }

    #[test]
    fn tracked_fields_are_changes() {
        assert!(stats_changed(&snapshot(), &snapshot().with_record(11, 6, 5)));
        assert!(stats_changed(&snapshot(), &snapshot().with_kda(3.1)));
        assert!(stats_changed(&snapshot(), &snapshot().with_performance_score(4.5)));
    }

    #[test]
    fn delta_between_snapshots() {
        let new = snapshot().with_record(20, 15, 5).with_performance_score(5.5);
        let delta = StatDelta::between(&snapshot(), &new);

        assert_eq!(delta.games_played, 10);
        assert_eq!(delta.win_rate, 25.0);
        assert_eq!(delta.performance_score, 1.5);
    }

    #[test]
    fn delta_from_empty_history() {
        let old = PlayerRecord::new("p");
        let delta = StatDelta::between(&old, &snapshot());
        assert_eq!(delta.games_played, 10);
        assert_eq!(delta.win_rate, 50.0);
    }
}
