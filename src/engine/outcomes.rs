//! Outcome Set Builder
//!
//! Normalizes caller odds and cashback into a validated, ordered outcome set.

use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::types::{Label, Outcome};

pub const MIN_OUTCOMES: usize = 2;
pub const MAX_OUTCOMES: usize = 5;

/// Cashback above 1 is read as a percentage, otherwise as a fraction
pub fn normalize_cashback(value: f64) -> f64 {
    if value > 1.0 {
        value / 100.0
    } else {
        value
    }
}

/// Validated outcomes in label order
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeSet {
    outcomes: Vec<Outcome>,
}

impl OutcomeSet {
    /// Build the first `count` outcomes from raw per-label inputs.
    ///
    /// Missing odds count as 0 and are rejected; missing cashback is 0.
    pub fn build(
        count: usize,
        odds: &HashMap<Label, f64>,
        cashback: &HashMap<Label, f64>,
    ) -> EngineResult<Self> {
        if !(MIN_OUTCOMES..=MAX_OUTCOMES).contains(&count) {
            return Err(EngineError::InvalidOutcomeCount {
                min: MIN_OUTCOMES,
                max: MAX_OUTCOMES,
                got: count,
            });
        }

        let mut outcomes = Vec::with_capacity(count);
        for &label in Label::first(count) {
            let odds_value = odds.get(&label).copied().unwrap_or(0.0);
            if !odds_value.is_finite() || odds_value <= 0.0 {
                return Err(EngineError::InvalidOutcome {
                    label,
                    reason: format!("odds must be greater than 0, got {}", odds_value),
                });
            }

            let raw_cashback = cashback.get(&label).copied().unwrap_or(0.0);
            let cashback_rate = normalize_cashback(raw_cashback);
            if !(0.0..=1.0).contains(&cashback_rate) {
                return Err(EngineError::InvalidOutcome {
                    label,
                    reason: format!("cashback must be between 0% and 100%, got {}", raw_cashback),
                });
            }

            outcomes.push(Outcome {
                label,
                odds: odds_value,
                cashback_rate,
            });
        }

        Ok(Self { outcomes })
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.outcomes.iter().map(|o| o.label)
    }

    pub fn get(&self, label: Label) -> Option<&Outcome> {
        self.outcomes.iter().find(|o| o.label == label)
    }

    pub fn contains(&self, label: Label) -> bool {
        self.get(label).is_some()
    }

    /// Position of `label` in the set, used as its column in the profit model
    pub fn index_of(&self, label: Label) -> Option<usize> {
        self.outcomes.iter().position(|o| o.label == label)
    }
}
