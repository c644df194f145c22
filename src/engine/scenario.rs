//! Scenario Evaluator
//!
//! Evaluates a final stake set against every "this outcome wins" scenario and
//! classifies it as a perfect hedge or not.

use super::outcomes::OutcomeSet;
use super::profit::ProfitModel;
use crate::types::{Label, StakeAssignment, Status};

/// Scenario profits within this many currency units count as equal
pub const PERFECT_HEDGE_TOLERANCE: f64 = 0.01;

/// Why a result fell short of a perfect hedge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImperfectReason {
    /// The caller pinned stakes by hand
    ManualEdit,
    /// No positive equal-profit allocation exists for these odds
    Unhedgeable,
}

impl ImperfectReason {
    fn describe(&self) -> &'static str {
        match self {
            ImperfectReason::ManualEdit => "Stakes edited manually.",
            ImperfectReason::Unhedgeable => "Could not guarantee profit on every line.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    pub total_invested: f64,
    pub cashback_values: StakeAssignment,
    /// Profit if each outcome wins, in label order
    pub scenario_profits: Vec<f64>,
    pub status: Status,
    pub profit: f64,
    pub roi: f64,
    pub message: Option<String>,
}

/// Profit if each outcome wins, in label order.
///
/// Outcomes missing from `stakes` count as a zero stake.
pub fn scenario_profits(outcomes: &OutcomeSet, stakes: &StakeAssignment) -> Vec<f64> {
    let complete: StakeAssignment = outcomes
        .labels()
        .map(|label| (label, stakes.get(&label).copied().unwrap_or(0.0)))
        .collect();
    ProfitModel::build(outcomes, &complete).constants()
}

pub fn is_perfect_hedge(profits: &[f64]) -> bool {
    match profits.first() {
        Some(&first) => {
            first > 0.0
                && profits
                    .iter()
                    .all(|p| (p - first).abs() < PERFECT_HEDGE_TOLERANCE)
        }
        None => false,
    }
}

fn roi_pct(profit: f64, total_invested: f64) -> f64 {
    if total_invested > 0.0 {
        profit / total_invested * 100.0
    } else {
        0.0
    }
}

pub fn evaluate(
    outcomes: &OutcomeSet,
    stakes: &StakeAssignment,
    reason: ImperfectReason,
) -> ScenarioReport {
    let total_invested: f64 = outcomes
        .labels()
        .map(|label| stakes.get(&label).copied().unwrap_or(0.0))
        .sum();

    let cashback_values: StakeAssignment = outcomes
        .iter()
        .map(|o| {
            let stake = stakes.get(&o.label).copied().unwrap_or(0.0);
            (o.label, stake * o.cashback_rate)
        })
        .collect();

    let profits = scenario_profits(outcomes, stakes);

    if is_perfect_hedge(&profits) {
        let profit = profits[0];
        return ScenarioReport {
            total_invested,
            cashback_values,
            roi: roi_pct(profit, total_invested),
            scenario_profits: profits,
            status: Status::Ok,
            profit,
            message: None,
        };
    }

    let profit = if profits.is_empty() {
        0.0
    } else {
        profits.iter().sum::<f64>() / profits.len() as f64
    };
    let roi = roi_pct(profit, total_invested);
    let status = if profit < 0.0 { Status::Loss } else { Status::Ok };
    let message = format!(
        "{} Mean profit/loss: {:.2} ({:.2}%)",
        reason.describe(),
        profit,
        roi
    );

    ScenarioReport {
        total_invested,
        cashback_values,
        scenario_profits: profits,
        status,
        profit,
        roi,
        message: Some(message),
    }
}

/// Profit when `winner` wins, looked up from an evaluated report
pub fn profit_if(report: &ScenarioReport, outcomes: &OutcomeSet, winner: Label) -> Option<f64> {
    outcomes
        .index_of(winner)
        .and_then(|i| report.scenario_profits.get(i).copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn outcome_set(odds: &[f64], cashback: &[f64]) -> OutcomeSet {
        let labels = Label::first(odds.len());
        let odds: HashMap<Label, f64> = labels.iter().copied().zip(odds.iter().copied()).collect();
        let cashback: HashMap<Label, f64> =
            labels.iter().copied().zip(cashback.iter().copied()).collect();
        OutcomeSet::build(labels.len(), &odds, &cashback).unwrap()
    }

    fn stakes(values: &[(Label, f64)]) -> StakeAssignment {
        values.iter().copied().collect()
    }

    #[test]
    fn positive_equal_profits_are_a_perfect_hedge() {
        let set = outcome_set(&[2.1, 2.1], &[0.0, 0.0]);
        let report = evaluate(
            &set,
            &stakes(&[(Label::A, 100.0), (Label::B, 100.0)]),
            ImperfectReason::Unhedgeable,
        );

        assert_eq!(report.status, Status::Ok);
        assert!(report.message.is_none());
        assert!((report.profit - 10.0).abs() < 1e-9);
        assert!((report.roi - 5.0).abs() < 1e-9);
        assert!((report.total_invested - 200.0).abs() < 1e-9);
    }

    #[test]
    fn zero_profit_is_not_a_perfect_hedge() {
        let set = outcome_set(&[2.0, 2.0], &[0.0, 0.0]);
        let report = evaluate(
            &set,
            &stakes(&[(Label::A, 100.0), (Label::B, 100.0)]),
            ImperfectReason::Unhedgeable,
        );

        assert_eq!(report.status, Status::Ok);
        assert_eq!(report.profit, 0.0);
        assert_eq!(report.roi, 0.0);
        let message = report.message.expect("imperfect result carries a message");
        assert!(message.contains("Could not guarantee"));
        assert!(message.contains("0.00 (0.00%)"));
    }

    #[test]
    fn negative_mean_is_a_loss() {
        let set = outcome_set(&[1.5, 1.5], &[0.0, 0.0]);
        let report = evaluate(
            &set,
            &stakes(&[(Label::A, 100.0), (Label::B, 100.0)]),
            ImperfectReason::ManualEdit,
        );

        assert_eq!(report.status, Status::Loss);
        assert!((report.profit + 50.0).abs() < 1e-9);
        assert!((report.roi + 25.0).abs() < 1e-9);
        let message = report.message.unwrap();
        assert!(message.starts_with("Stakes edited manually."));
        assert!(message.contains("-50.00 (-25.00%)"));
    }

    #[test]
    fn cashback_is_paid_on_losing_lines_only() {
        let set = outcome_set(&[2.0, 3.0], &[10.0, 20.0]);
        let s = stakes(&[(Label::A, 100.0), (Label::B, 50.0)]);
        let report = evaluate(&set, &s, ImperfectReason::ManualEdit);

        assert!((report.cashback_values[&Label::A] - 10.0).abs() < 1e-9);
        assert!((report.cashback_values[&Label::B] - 10.0).abs() < 1e-9);
        // A wins: 200 + 10 (B's cashback) − 150
        assert!((profit_if(&report, &set, Label::A).unwrap() - 60.0).abs() < 1e-9);
        // B wins: 150 + 10 (A's cashback) − 150
        assert!((profit_if(&report, &set, Label::B).unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn tolerance_is_one_cent() {
        assert!(is_perfect_hedge(&[5.0, 5.009]));
        assert!(!is_perfect_hedge(&[5.0, 5.02]));
        assert!(!is_perfect_hedge(&[]));
    }
}
