use thiserror::Error;

use crate::team::Side;

/// Main error type for the CustomBalance system
#[derive(Error, Debug)]
pub enum CbError {
    #[error("Balance error: {0}")]
    Balance(#[from] BalanceError),

    #[error("Stats error: {0}")]
    Stats(#[from] StatsError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised by the balancing engine.
///
/// Every variant is fatal to the call: no partial partition is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BalanceError {
    #[error("Roster size {size} is outside the allowed range [{min}, {max}]")]
    RosterSize { size: usize, min: usize, max: usize },

    #[error("Team {side} would be empty")]
    EmptyTeam { side: Side },

    #[error("Player {id} appears more than once in the roster")]
    DuplicatePlayer { id: String },

    #[error("Player {player_id} has invalid {field}: {value}")]
    InvalidStat {
        player_id: String,
        field: &'static str,
        value: f64,
    },
}

/// Errors raised while aggregating per-match statistics
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("Match {match_id} appears more than once")]
    DuplicateMatch { match_id: String },

    #[error("Total {field} for player {player_id} overflows")]
    Overflow {
        player_id: String,
        field: &'static str,
    },
}

/// Result type alias for CustomBalance operations
pub type CbResult<T> = Result<T, CbError>;

/// Macro for creating validation errors
#[macro_export]
macro_rules! validation_error {
    ($($arg:tt)*) => {
        $crate::CbError::Validation(format!($($arg)*))
    };
}

/// Macro for creating internal errors
#[macro_export]
macro_rules! internal_error {
    ($($arg:tt)*) => {
        $crate::CbError::Internal(format!($($arg)*))
    };
}

/// Macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::CbError::Config(format!($($arg)*))
    };
}
