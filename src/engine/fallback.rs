//! Proportional Fallback Allocator
//!
//! Allocates stakes by implied probability (1 / odds) when an equal-profit
//! hedge is unavailable, or when the caller has pinned some but not all
//! stakes by hand. Neither variant equalizes profit.

use tracing::debug;

use super::outcomes::OutcomeSet;
use crate::types::{Label, StakeAssignment};

/// Share of the anchored total assigned to the un-anchored lines in hybrid mode.
///
/// Heuristic filler only; it has no equal-profit derivation.
pub const HYBRID_REMAINING_BUDGET_FRACTION: f64 = 0.3;

/// Implied probabilities of the given labels, normalized to sum to 1
pub fn normalized_implied_probabilities(
    outcomes: &OutcomeSet,
    labels: impl IntoIterator<Item = Label>,
) -> StakeAssignment {
    let mut probs: StakeAssignment = labels
        .into_iter()
        .filter_map(|label| outcomes.get(label).map(|o| (label, o.implied_probability())))
        .collect();

    let total: f64 = probs.values().sum();
    if total > 0.0 {
        for p in probs.values_mut() {
            *p /= total;
        }
    }
    probs
}

/// Scale a fully proportional book so that `anchor` keeps `anchor_stake`.
///
/// The anchor's own entry is the caller's value, not a recomputed one.
pub fn allocate_single_anchor(
    outcomes: &OutcomeSet,
    anchor: Label,
    anchor_stake: f64,
) -> StakeAssignment {
    let probs = normalized_implied_probabilities(outcomes, outcomes.labels());
    let anchor_prob = probs.get(&anchor).copied().unwrap_or(0.0);
    if anchor_prob <= 0.0 {
        return [(anchor, anchor_stake)].into_iter().collect();
    }

    let total_budget = anchor_stake / anchor_prob;
    debug!(%anchor, anchor_stake, total_budget, "single-anchor proportional allocation");

    probs
        .into_iter()
        .map(|(label, p)| {
            if label == anchor {
                (label, anchor_stake)
            } else {
                (label, total_budget * p)
            }
        })
        .collect()
}

/// Keep every anchored stake and fill the remaining lines from a budget of
/// `HYBRID_REMAINING_BUDGET_FRACTION` × the anchored total, split by implied
/// probability normalized over the remaining lines only.
pub fn allocate_multi_anchor(outcomes: &OutcomeSet, anchored: &StakeAssignment) -> StakeAssignment {
    let mut stakes = anchored.clone();
    let remaining: Vec<Label> = outcomes
        .labels()
        .filter(|label| !anchored.contains_key(label))
        .collect();
    if remaining.is_empty() {
        return stakes;
    }

    let known_total: f64 = anchored.values().sum();
    let budget = known_total * HYBRID_REMAINING_BUDGET_FRACTION;
    debug!(
        known_total,
        budget,
        remaining = remaining.len(),
        "multi-anchor proportional allocation"
    );

    for (label, p) in normalized_implied_probabilities(outcomes, remaining) {
        stakes.insert(label, budget * p);
    }
    stakes
}
