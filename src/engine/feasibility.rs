//! Feasibility Validator
//!
//! Every live line needs a real bet, so a derived stake of exactly zero is
//! as unusable as a negative one.

use tracing::debug;

use super::solver::SolveOutcome;
use crate::types::StakeAssignment;

pub fn is_feasible_stake(stake: f64) -> bool {
    stake.is_finite() && stake > 0.0
}

pub fn is_feasible(derived: &StakeAssignment) -> bool {
    derived.values().all(|&s| is_feasible_stake(s))
}

/// Downgrade a `Solved` candidate with any non-positive stake to `Infeasible`
pub fn validate(outcome: SolveOutcome) -> SolveOutcome {
    match outcome {
        SolveOutcome::Solved(derived) if !is_feasible(&derived) => {
            debug!(?derived, "equal-profit solution rejected: non-positive stake");
            SolveOutcome::Infeasible(derived)
        }
        other => other,
    }
}
