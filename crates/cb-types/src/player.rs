use serde::{Deserialize, Serialize};

use crate::errors::BalanceError;

/// Historical performance statistics for one player.
///
/// Optional statistics are resolved to their documented defaults when the
/// record is built: `avg_cc_score` and `prior_performance_score` are `0.0`
/// when the stats source has no value for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Opaque unique identifier, used only for membership checks.
    pub id: String,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    /// (kills + assists) / max(1, deaths)
    pub avg_kda: f64,
    pub avg_damage_dealt: f64,
    pub avg_damage_taken: f64,
    pub avg_healing: f64,
    #[serde(default)]
    pub avg_cc_score: f64,
    /// Legacy scalar carried over from the previous scoring scheme.
    #[serde(default, alias = "performance_score")]
    pub prior_performance_score: f64,
}

impl PlayerRecord {
    /// A player with no game history.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            games_played: 0,
            wins: 0,
            losses: 0,
            avg_kda: 0.0,
            avg_damage_dealt: 0.0,
            avg_damage_taken: 0.0,
            avg_healing: 0.0,
            avg_cc_score: 0.0,
            prior_performance_score: 0.0,
        }
    }

    pub fn with_record(mut self, games_played: u32, wins: u32, losses: u32) -> Self {
        self.games_played = games_played;
        self.wins = wins;
        self.losses = losses;
        self
    }

    pub fn with_kda(mut self, avg_kda: f64) -> Self {
        self.avg_kda = avg_kda;
        self
    }

    pub fn with_damage(mut self, dealt: f64, taken: f64) -> Self {
        self.avg_damage_dealt = dealt;
        self.avg_damage_taken = taken;
        self
    }

    pub fn with_healing(mut self, avg_healing: f64) -> Self {
        self.avg_healing = avg_healing;
        self
    }

    pub fn with_cc_score(mut self, avg_cc_score: f64) -> Self {
        self.avg_cc_score = avg_cc_score;
        self
    }

    pub fn with_performance_score(mut self, score: f64) -> Self {
        self.prior_performance_score = score;
        self
    }

    pub fn has_history(&self) -> bool {
        self.games_played > 0
    }

    /// Win rate in percent, `None` when no games have been played.
    pub fn win_rate(&self) -> Option<f64> {
        if self.has_history() {
            Some(self.wins as f64 / self.games_played as f64 * 100.0)
        } else {
            None
        }
    }

    /// Reject negative or non-finite statistics.
    pub fn validate(&self) -> Result<(), BalanceError> {
        let fields = [
            ("avg_kda", self.avg_kda),
            ("avg_damage_dealt", self.avg_damage_dealt),
            ("avg_damage_taken", self.avg_damage_taken),
            ("avg_healing", self.avg_healing),
            ("avg_cc_score", self.avg_cc_score),
            ("prior_performance_score", self.prior_performance_score),
        ];

        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(BalanceError::InvalidStat {
                    player_id: self.id.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// A player record paired with the composite score derived from it.
///
/// Built once per balancing call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPlayer {
    #[serde(flatten)]
    pub record: PlayerRecord,
    pub score: f64,
}

impl ScoredPlayer {
    pub fn new(record: PlayerRecord, score: f64) -> Self {
        Self { record, score }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }
}
