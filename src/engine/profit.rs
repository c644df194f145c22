//! Profit Model
//!
//! Profit when outcome `w` wins, written as a linear function of the stakes:
//!
//! ```text
//! profit(w) = stake(w)·odds(w) + Σ_{o≠w} stake(o)·cashback(o) − Σ_all stake(o)
//! ```
//!
//! which rearranges to one coefficient per stake:
//!     `odds(w) − 1` for the winner, `cashback(o) − 1` for every loser.
//!
//! Anchored stakes fold into the constant term; every other stake is an
//! unknown with its own column.

use super::outcomes::OutcomeSet;
use crate::types::{Label, Outcome, StakeAssignment};

/// Coefficient of `stake(o)` in the profit expression where `winner` wins
pub fn stake_coefficient(winner: Label, outcome: &Outcome) -> f64 {
    if outcome.label == winner {
        outcome.odds - 1.0
    } else {
        outcome.cashback_rate - 1.0
    }
}

/// `constant + Σ coefficients[i] · unknown[i]`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProfit {
    pub winner: Label,
    pub constant: f64,
    pub coefficients: Vec<f64>,
}

impl LinearProfit {
    pub fn evaluate(&self, unknowns: &[f64]) -> f64 {
        self.constant
            + self
                .coefficients
                .iter()
                .zip(unknowns)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

/// One profit expression per winning hypothesis, sharing the same unknowns
#[derive(Debug, Clone, PartialEq)]
pub struct ProfitModel {
    /// Labels solved for, in label order; column `i` of every expression
    pub unknowns: Vec<Label>,
    /// Expressions in label order of the winning outcome
    pub expressions: Vec<LinearProfit>,
}

impl ProfitModel {
    /// Every outcome without an entry in `anchored` becomes an unknown
    pub fn build(outcomes: &OutcomeSet, anchored: &StakeAssignment) -> Self {
        let unknowns: Vec<Label> = outcomes
            .labels()
            .filter(|label| !anchored.contains_key(label))
            .collect();

        let expressions = outcomes
            .labels()
            .map(|winner| {
                let mut constant = 0.0;
                let mut coefficients = vec![0.0; unknowns.len()];
                for outcome in outcomes.iter() {
                    let coefficient = stake_coefficient(winner, outcome);
                    match anchored.get(&outcome.label) {
                        Some(stake) => constant += coefficient * stake,
                        None => {
                            if let Some(col) = unknowns.iter().position(|l| *l == outcome.label) {
                                coefficients[col] = coefficient;
                            }
                        }
                    }
                }
                LinearProfit {
                    winner,
                    constant,
                    coefficients,
                }
            })
            .collect();

        Self {
            unknowns,
            expressions,
        }
    }

    /// Scenario profits for a fully anchored model (no unknowns left)
    pub fn constants(&self) -> Vec<f64> {
        self.expressions.iter().map(|e| e.constant).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn two_way() -> OutcomeSet {
        let odds: HashMap<Label, f64> = [(Label::A, 3.0), (Label::B, 1.5)].into_iter().collect();
        let cashback: HashMap<Label, f64> = [(Label::B, 10.0)].into_iter().collect();
        OutcomeSet::build(2, &odds, &cashback).unwrap()
    }

    #[test]
    fn anchored_stake_folds_into_constant() {
        let set = two_way();
        let anchored: StakeAssignment = [(Label::A, 100.0)].into_iter().collect();
        let model = ProfitModel::build(&set, &anchored);

        assert_eq!(model.unknowns, vec![Label::B]);
        // A wins: 100·(3 − 1) + stake_B·(0.10 − 1)
        assert!((model.expressions[0].constant - 200.0).abs() < 1e-12);
        assert!((model.expressions[0].coefficients[0] + 0.9).abs() < 1e-12);
        // B wins: 100·(0 − 1) + stake_B·(1.5 − 1)
        assert!((model.expressions[1].constant + 100.0).abs() < 1e-12);
        assert!((model.expressions[1].coefficients[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn fully_anchored_model_matches_direct_formula() {
        let set = two_way();
        let stakes: StakeAssignment = [(Label::A, 100.0), (Label::B, 150.0)].into_iter().collect();
        let profits = ProfitModel::build(&set, &stakes).constants();

        // A wins: 300 + 150·0.10 − 250
        assert!((profits[0] - 65.0).abs() < 1e-9);
        // B wins: 225 − 250
        assert!((profits[1] + 25.0).abs() < 1e-9);
    }

    #[test]
    fn evaluate_applies_unknown_values() {
        let set = two_way();
        let anchored: StakeAssignment = [(Label::A, 100.0)].into_iter().collect();
        let model = ProfitModel::build(&set, &anchored);
        let p = model.expressions[1].evaluate(&[200.0]);
        assert!((p - 0.0).abs() < 1e-9);
    }
}
