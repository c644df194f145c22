//! Engine error taxonomy
//!
//! Only input problems surface as errors. A failed or infeasible equal-profit
//! solve is recovered inside the engine and never reaches the caller.

use thiserror::Error;

use crate::types::Label;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Outcome count must be between {min} and {max}, got {got}")]
    InvalidOutcomeCount { min: usize, max: usize, got: usize },

    #[error("Invalid outcome {label}: {reason}")]
    InvalidOutcome { label: Label, reason: String },

    #[error("Invalid stake for outcome {label}: {value}")]
    InvalidStake { label: Label, value: f64 },

    #[error("No usable anchor stake: {0}")]
    MissingAnchor(String),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
