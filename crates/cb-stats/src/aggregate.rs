//! Per-match aggregation.
//!
//! [`StatsAggregator`] folds already-fetched match participation rows into the
//! averaged [`PlayerRecord`] the balancing engine consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

use cb_types::{CbResult, PlayerRecord, StatsError};

/// Queue id of ARAM games.
pub const ARAM_QUEUE_ID: u32 = 450;

/// How many of the most recent matches are considered.
pub const DEFAULT_MAX_MATCHES: usize = 20;

/// One player's line in one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchParticipation {
    pub match_id: String,
    pub queue_id: u32,
    pub played_at: DateTime<Utc>,
    pub win: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub total_damage_dealt_to_champions: u64,
    pub total_damage_taken: u64,
    pub total_heal: u64,
    #[serde(default)]
    pub total_damage_self_mitigated: u64,
    /// Seconds of crowd control applied to enemies.
    #[serde(default, rename = "timeCCingOthers")]
    pub time_ccing_others: u64,
}

/// Which matches feed an aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Only matches from this queue count. `None` = every queue.
    pub queue_id: Option<u32>,
    /// Size of the recent-match window, applied before the queue filter.
    pub max_matches: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            queue_id: Some(ARAM_QUEUE_ID),
            max_matches: DEFAULT_MAX_MATCHES,
        }
    }
}

impl AggregationConfig {
    pub fn with_queue(mut self, queue_id: Option<u32>) -> Self {
        self.queue_id = queue_id;
        self
    }

    pub fn with_max_matches(mut self, max_matches: usize) -> Self {
        self.max_matches = max_matches;
        self
    }
}

#[derive(Debug, Default)]
struct MatchTotals {
    games: u64,
    wins: u64,
    kills: u64,
    deaths: u64,
    assists: u64,
    damage_dealt: u64,
    damage_taken: u64,
    healing: u64,
    cc: u64,
}

impl MatchTotals {
    fn add(&mut self, m: &MatchParticipation) -> Option<()> {
        self.games = self.games.checked_add(1)?;
        self.wins = self.wins.checked_add(u64::from(m.win))?;
        self.kills = self.kills.checked_add(u64::from(m.kills))?;
        self.deaths = self.deaths.checked_add(u64::from(m.deaths))?;
        self.assists = self.assists.checked_add(u64::from(m.assists))?;
        self.damage_dealt = self
            .damage_dealt
            .checked_add(m.total_damage_dealt_to_champions)?;
        self.damage_taken = self.damage_taken.checked_add(m.total_damage_taken)?;
        self.healing = self
            .healing
            .checked_add(m.total_heal)?
            .checked_add(m.total_damage_self_mitigated)?;
        self.cc = self.cc.checked_add(m.time_ccing_others)?;
        Some(())
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Stateless aggregation of match rows into player records.
#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    config: AggregationConfig,
}

impl StatsAggregator {
    pub fn new(config: AggregationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Build the record for `player_id` from its match history.
    ///
    /// Rows may arrive in any order; the newest `max_matches` by `played_at`
    /// are kept before filtering by queue. A history with no qualifying games
    /// yields a zero-history record.
    pub fn aggregate(
        &self,
        player_id: &str,
        matches: &[MatchParticipation],
    ) -> CbResult<PlayerRecord> {
        let mut seen = HashSet::new();
        for m in matches {
            if !seen.insert(m.match_id.as_str()) {
                return Err(StatsError::DuplicateMatch {
                    match_id: m.match_id.clone(),
                }
                .into());
            }
        }

        let mut recent: Vec<&MatchParticipation> = matches.iter().collect();
        recent.sort_by(|a, b| b.played_at.cmp(&a.played_at));
        recent.truncate(self.config.max_matches);

        let mut totals = MatchTotals::default();
        for m in recent {
            if self.config.queue_id.is_some_and(|queue| queue != m.queue_id) {
                continue;
            }
            totals.add(m).ok_or_else(|| StatsError::Overflow {
                player_id: player_id.to_string(),
                field: "match totals",
            })?;
        }

        if totals.games == 0 {
            warn!(
                "No qualifying games for {} among {} matches",
                player_id,
                matches.len()
            );
            return Ok(PlayerRecord::new(player_id));
        }

        let games_played = u32::try_from(totals.games).map_err(|_| StatsError::Overflow {
            player_id: player_id.to_string(),
            field: "games played",
        })?;
        // wins <= games, so this cannot fail once games fits
        let wins = u32::try_from(totals.wins).unwrap_or(games_played);

        let games = totals.games as f64;
        let kda = (totals.kills as f64 + totals.assists as f64) / totals.deaths.max(1) as f64;
        let damage_dealt = totals.damage_dealt as f64 / games;
        let damage_taken = totals.damage_taken as f64 / games;
        let healing = totals.healing as f64 / games;
        let cc = totals.cc as f64 / games;

        let performance = kda * 0.3
            + (totals.wins as f64 / games) * 0.3
            + (damage_dealt / 1000.0) * 0.2
            + (healing / 1000.0) * 0.1
            + (cc / 10.0) * 0.1;

        debug!("Aggregated {} games for {}", totals.games, player_id);

        Ok(PlayerRecord::new(player_id)
            .with_record(games_played, wins, games_played - wins)
            .with_kda(round_to(kda, 2))
            .with_damage(round_to(damage_dealt, 0), round_to(damage_taken, 0))
            .with_healing(round_to(healing, 0))
            .with_cc_score(round_to(cc, 1))
            .with_performance_score(round_to(performance, 2)))
    }
}
