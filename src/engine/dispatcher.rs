//! Mode Dispatcher
//!
//! Picks the allocation path for a request and runs it end to end:
//!
//! - **Dynamic**: a caller-chosen line is the sole anchor; every other stake
//!   is solved, falling back to a proportional book re-anchored on that line.
//! - **Hybrid**: the primary stake plus every hand-edited stake are pinned;
//!   the remaining lines get the multi-anchor heuristic. No solve.
//! - **Automatic**: the primary line is the sole anchor; solve, validate,
//!   fall back to a proportional book.

use std::collections::HashMap;
use tracing::{debug, warn};

use super::fallback::{allocate_multi_anchor, allocate_single_anchor};
use super::feasibility::{is_feasible_stake, validate};
use super::outcomes::OutcomeSet;
use super::scenario::{evaluate, ImperfectReason};
use super::solver::{solve_equal_profit, SolveOutcome};
use crate::error::{EngineError, EngineResult};
use crate::types::{AllocationMethod, ComputationResult, Label, Mode, StakeAssignment};

/// Everything a single computation needs, already extracted from the request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputeRequest {
    pub outcome_count: usize,
    pub odds: HashMap<Label, f64>,
    /// Percentage (> 1) or fraction (≤ 1) per label
    pub cashback: HashMap<Label, f64>,
    /// Stake on the primary line (`A`)
    pub primary_stake: Option<f64>,
    /// Stakes the caller pinned by hand
    pub edited_stakes: HashMap<Label, f64>,
    /// Caller is editing stakes manually
    pub edit_mode: bool,
    /// Line to anchor on in dynamic mode
    pub anchor: Option<Label>,
}

impl ComputeRequest {
    /// Automatic-mode request: primary stake only
    pub fn automatic(odds: &[f64], cashback: &[f64], primary_stake: f64) -> Self {
        let labels = Label::first(odds.len());
        Self {
            outcome_count: labels.len(),
            odds: labels.iter().copied().zip(odds.iter().copied()).collect(),
            cashback: labels.iter().copied().zip(cashback.iter().copied()).collect(),
            primary_stake: Some(primary_stake),
            ..Self::default()
        }
    }

    pub fn with_edits(mut self, edits: &[(Label, f64)]) -> Self {
        self.edit_mode = true;
        self.edited_stakes.extend(edits.iter().copied());
        self
    }

    pub fn with_anchor(mut self, label: Label, stake: f64) -> Self {
        self.anchor = Some(label);
        self.edited_stakes.insert(label, stake);
        self
    }

    /// Stake recorded for `label`; the primary stake stands in for an unedited `A`
    fn stake_for(&self, label: Label) -> Option<f64> {
        match self.edited_stakes.get(&label) {
            Some(&stake) => Some(stake),
            None if label.is_primary() => self.primary_stake,
            None => None,
        }
    }
}

/// Path chosen for a request, with its anchors
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Automatic { stake: f64 },
    Hybrid { anchored: StakeAssignment },
    Dynamic { anchor: Label, stake: f64 },
}

impl Dispatch {
    pub fn mode(&self) -> Mode {
        match self {
            Dispatch::Automatic { .. } => Mode::Automatic,
            Dispatch::Hybrid { .. } => Mode::Hybrid,
            Dispatch::Dynamic { .. } => Mode::Dynamic,
        }
    }
}

fn positive_primary(request: &ComputeRequest) -> EngineResult<f64> {
    match request.primary_stake {
        Some(stake) if is_feasible_stake(stake) => Ok(stake),
        Some(stake) => Err(EngineError::MissingAnchor(format!(
            "stake {} must be greater than 0, got {}",
            Label::PRIMARY,
            stake
        ))),
        None => Err(EngineError::MissingAnchor(format!(
            "stake {} is required",
            Label::PRIMARY
        ))),
    }
}

/// Select the allocation path for `request` over `outcomes`
pub fn dispatch(request: &ComputeRequest, outcomes: &OutcomeSet) -> EngineResult<Dispatch> {
    if let Some(anchor) = request.anchor {
        if outcomes.contains(anchor) {
            if let Some(stake) = request.stake_for(anchor) {
                if !is_feasible_stake(stake) {
                    return Err(EngineError::MissingAnchor(format!(
                        "anchor stake {} must be greater than 0, got {}",
                        anchor, stake
                    )));
                }
                return Ok(Dispatch::Dynamic { anchor, stake });
            }
        } else {
            warn!(%anchor, outcomes = outcomes.len(), "anchor outside outcome set ignored");
        }
    }

    let edited: StakeAssignment = request
        .edited_stakes
        .iter()
        .filter(|(label, _)| !label.is_primary())
        .filter(|(label, _)| {
            let live = outcomes.contains(**label);
            if !live {
                warn!(label = %label, "edited stake outside outcome set ignored");
            }
            live
        })
        .map(|(label, stake)| (*label, *stake))
        .collect();

    // Any edited entry switches to hybrid, even one only on the primary line
    if request.edit_mode && !request.edited_stakes.is_empty() {
        let primary = positive_primary(request)?;
        if let Some((&label, &value)) = edited.iter().find(|(_, s)| !is_feasible_stake(**s)) {
            return Err(EngineError::InvalidStake { label, value });
        }
        let mut anchored = edited;
        anchored.insert(Label::PRIMARY, primary);
        return Ok(Dispatch::Hybrid { anchored });
    }

    Ok(Dispatch::Automatic {
        stake: positive_primary(request)?,
    })
}

/// Solve with `anchor` pinned, falling back to a proportional book
fn allocate_anchored(
    outcomes: &OutcomeSet,
    anchor: Label,
    stake: f64,
) -> (StakeAssignment, AllocationMethod) {
    let anchored: StakeAssignment = [(anchor, stake)].into_iter().collect();
    match validate(solve_equal_profit(outcomes, &anchored)) {
        SolveOutcome::Solved(derived) => {
            let mut stakes = anchored;
            stakes.extend(derived);
            (stakes, AllocationMethod::EqualProfit)
        }
        fallback_cause => {
            debug!(%anchor, ?fallback_cause, "falling back to proportional allocation");
            (
                allocate_single_anchor(outcomes, anchor, stake),
                AllocationMethod::ProportionalFallback,
            )
        }
    }
}

/// Compute stakes, cashback and profit for one request
pub fn compute(request: &ComputeRequest) -> EngineResult<ComputationResult> {
    let outcomes = OutcomeSet::build(request.outcome_count, &request.odds, &request.cashback)?;
    let route = dispatch(request, &outcomes)?;
    let mode = route.mode();

    let (stakes, method) = match route {
        Dispatch::Automatic { stake } => allocate_anchored(&outcomes, Label::PRIMARY, stake),
        Dispatch::Dynamic { anchor, stake } => allocate_anchored(&outcomes, anchor, stake),
        Dispatch::Hybrid { anchored } => (
            allocate_multi_anchor(&outcomes, &anchored),
            AllocationMethod::ManualBlend,
        ),
    };

    let reason = if request.edit_mode {
        ImperfectReason::ManualEdit
    } else {
        ImperfectReason::Unhedgeable
    };
    let report = evaluate(&outcomes, &stakes, reason);
    debug!(
        %mode,
        ?method,
        status = %report.status,
        profit = report.profit,
        roi = report.roi,
        "stake computation finished"
    );

    Ok(ComputationResult {
        status: report.status,
        profit: report.profit,
        roi: report.roi,
        message: report.message,
        total_invested: report.total_invested,
        stakes,
        cashback_values: report.cashback_values,
        scenario_profits: report.scenario_profits,
        mode,
        method,
    })
}
