//! Error type shared by table loading and request validation

use thiserror::Error;

/// Errors reported by the engine
///
/// Calculations themselves never fail on numeric input; everything here is
/// either a caller contract violation or a broken table set.
#[derive(Debug, Error)]
pub enum SupportError {
    #[error("beneficiary age must be a non-negative integer (got {0})")]
    InvalidAge(i64),

    #[error("unknown guideline preset '{raw}'; expected one of: {expected:?}")]
    UnknownGuideline {
        raw: String,
        expected: &'static [&'static str],
    },

    #[error("a calculation needs at least one beneficiary")]
    NoBeneficiaries,

    #[error("invalid rate table: {0}")]
    InvalidTable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SupportError>;
