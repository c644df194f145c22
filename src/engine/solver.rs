//! Equal-Profit Solver
//!
//! Requires every winning-outcome profit to equal the first outcome's profit:
//!
//! ```text
//! profit(first) − profit(other) = 0      for every other outcome
//! ```
//!
//! The system is linear in the unknown stakes, so it is written as a
//! coefficient matrix and solved by Gauss-Jordan elimination with partial
//! pivoting. A system without a unique solution is reported as `Degenerate`
//! and left to the caller's fallback.

use ndarray::{Array1, Array2};
use tracing::debug;

use super::outcomes::OutcomeSet;
use super::profit::ProfitModel;
use crate::types::StakeAssignment;

/// Pivots below this fraction of the largest matrix entry count as zero
const PIVOT_EPSILON: f64 = 1e-12;

/// Result of an equal-profit solve
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// Unique solution; holds the derived stakes only
    Solved(StakeAssignment),
    /// Unique solution with at least one non-positive stake
    Infeasible(StakeAssignment),
    /// Singular or inconsistent system
    Degenerate,
}

impl SolveOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }
}

/// Equal-profit constraints as `matrix · unknowns = rhs`
pub fn equal_profit_system(model: &ProfitModel) -> (Array2<f64>, Array1<f64>) {
    let rows = model.expressions.len().saturating_sub(1);
    let cols = model.unknowns.len();
    let mut matrix = Array2::<f64>::zeros((rows, cols));
    let mut rhs = Array1::<f64>::zeros(rows);

    if let Some((base, others)) = model.expressions.split_first() {
        for (row, other) in others.iter().enumerate() {
            for col in 0..cols {
                matrix[[row, col]] = base.coefficients[col] - other.coefficients[col];
            }
            rhs[row] = other.constant - base.constant;
        }
    }

    (matrix, rhs)
}

/// Solve `a · x = b`, returning `None` unless the solution is unique
pub fn solve_linear_system(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let (rows, cols) = a.dim();
    if b.len() != rows {
        return None;
    }

    let mut aug = Array2::<f64>::zeros((rows, cols + 1));
    for r in 0..rows {
        for c in 0..cols {
            aug[[r, c]] = a[[r, c]];
        }
        aug[[r, cols]] = b[r];
    }

    let scale = aug.iter().fold(0.0_f64, |m, v| m.max(v.abs())).max(1.0);
    let tolerance = PIVOT_EPSILON * scale;

    let mut pivot_cols = Vec::with_capacity(cols);
    let mut pivot_row = 0;
    for col in 0..cols {
        if pivot_row == rows {
            break;
        }

        let best = (pivot_row..rows)
            .max_by(|&x, &y| aug[[x, col]].abs().total_cmp(&aug[[y, col]].abs()))?;
        if aug[[best, col]].abs() <= tolerance {
            continue;
        }

        if best != pivot_row {
            for c in 0..=cols {
                aug.swap([best, c], [pivot_row, c]);
            }
        }

        let pivot = aug[[pivot_row, col]];
        for c in col..=cols {
            aug[[pivot_row, c]] /= pivot;
        }

        for r in 0..rows {
            if r == pivot_row {
                continue;
            }
            let factor = aug[[r, col]];
            if factor == 0.0 {
                continue;
            }
            for c in col..=cols {
                let v = aug[[pivot_row, c]];
                aug[[r, c]] -= factor * v;
            }
        }

        pivot_cols.push(col);
        pivot_row += 1;
    }

    // Free columns mean a parametrized family of solutions
    if pivot_cols.len() < cols {
        return None;
    }

    // Leftover rows must reduce to 0 = 0
    if (pivot_row..rows).any(|r| aug[[r, cols]].abs() > tolerance) {
        return None;
    }

    let mut x = Array1::<f64>::zeros(cols);
    for (row, &col) in pivot_cols.iter().enumerate() {
        x[col] = aug[[row, cols]];
    }
    Some(x)
}

/// Derive every stake missing from `anchored` so all scenario profits match.
///
/// The returned assignment holds the derived stakes only. Feasibility is not
/// checked here; see `feasibility::validate`.
pub fn solve_equal_profit(outcomes: &OutcomeSet, anchored: &StakeAssignment) -> SolveOutcome {
    let model = ProfitModel::build(outcomes, anchored);
    if model.unknowns.is_empty() {
        return SolveOutcome::Solved(StakeAssignment::new());
    }

    let (matrix, rhs) = equal_profit_system(&model);
    match solve_linear_system(&matrix, &rhs) {
        Some(solution) => {
            let derived: StakeAssignment = model
                .unknowns
                .iter()
                .copied()
                .zip(solution.iter().copied())
                .collect();
            debug!(unknowns = model.unknowns.len(), ?derived, "equal-profit system solved");
            SolveOutcome::Solved(derived)
        }
        None => {
            debug!(
                unknowns = model.unknowns.len(),
                "equal-profit system has no unique solution"
            );
            SolveOutcome::Degenerate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Label;
    use ndarray::array;
    use std::collections::HashMap;

    fn outcome_set(odds: &[f64], cashback: &[f64]) -> OutcomeSet {
        let labels = Label::first(odds.len());
        let odds: HashMap<Label, f64> = labels.iter().copied().zip(odds.iter().copied()).collect();
        let cashback: HashMap<Label, f64> =
            labels.iter().copied().zip(cashback.iter().copied()).collect();
        OutcomeSet::build(labels.len(), &odds, &cashback).unwrap()
    }

    fn anchor(label: Label, stake: f64) -> StakeAssignment {
        [(label, stake)].into_iter().collect()
    }

    #[test]
    fn solves_square_system_with_pivoting() {
        let a = array![[0.0, 2.0], [1.0, 1.0]];
        let b = array![4.0, 3.0];
        let x = solve_linear_system(&a, &b).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn singular_system_has_no_unique_solution() {
        let a = array![[1.0, 2.0], [2.0, 4.0]];
        let b = array![3.0, 6.0];
        assert!(solve_linear_system(&a, &b).is_none());
    }

    #[test]
    fn inconsistent_system_is_rejected() {
        let a = array![[1.0], [1.0]];
        let b = array![1.0, 2.0];
        assert!(solve_linear_system(&a, &b).is_none());
    }

    #[test]
    fn two_way_even_odds() {
        let set = outcome_set(&[2.0, 2.0], &[0.0, 0.0]);
        match solve_equal_profit(&set, &anchor(Label::A, 100.0)) {
            SolveOutcome::Solved(derived) => {
                assert!((derived[&Label::B] - 100.0).abs() < 1e-9);
            }
            other => panic!("expected solution, got {:?}", other),
        }
    }

    #[test]
    fn two_way_uneven_odds() {
        let set = outcome_set(&[3.0, 1.5], &[0.0, 0.0]);
        match solve_equal_profit(&set, &anchor(Label::A, 100.0)) {
            SolveOutcome::Solved(derived) => {
                assert!((derived[&Label::B] - 200.0).abs() < 1e-9);
            }
            other => panic!("expected solution, got {:?}", other),
        }
    }

    #[test]
    fn three_way_with_cashback_equalizes_profit() {
        let set = outcome_set(&[3.2, 3.5, 3.8], &[0.0, 0.10, 0.05]);
        let anchored = anchor(Label::A, 100.0);
        let SolveOutcome::Solved(derived) = solve_equal_profit(&set, &anchored) else {
            panic!("expected solution");
        };

        let mut stakes = anchored.clone();
        stakes.extend(derived);
        let profits = ProfitModel::build(&set, &stakes).constants();
        for p in &profits {
            assert!((p - profits[0]).abs() < 1e-6, "profits diverge: {:?}", profits);
        }
    }

    #[test]
    fn non_primary_anchor_solves_remaining_lines() {
        let set = outcome_set(&[2.5, 3.0, 6.0], &[0.0, 0.0, 0.0]);
        let SolveOutcome::Solved(derived) = solve_equal_profit(&set, &anchor(Label::B, 50.0))
        else {
            panic!("expected solution");
        };
        // Without cashback every return matches: stake·odds = 150
        assert!((derived[&Label::A] - 60.0).abs() < 1e-9);
        assert!((derived[&Label::C] - 25.0).abs() < 1e-9);
        assert!(!derived.contains_key(&Label::B));
    }

    #[test]
    fn full_refund_at_even_odds_is_degenerate() {
        // odds 1.0 with 100% cashback zeroes B's column
        let set = outcome_set(&[2.0, 1.0], &[0.0, 1.0]);
        assert_eq!(
            solve_equal_profit(&set, &anchor(Label::A, 100.0)),
            SolveOutcome::Degenerate
        );
    }
}
