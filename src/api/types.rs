//! Wire types for the calculation endpoint
//!
//! Field names follow the calculator front end (`numeroVias`, `oddA`, `cbA`,
//! `stakeA`, `modoEdicao`, `stakesEditaveis`).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

use crate::engine::ComputeRequest;
use crate::types::{AllocationMethod, ComputationResult, Label, Mode, Status};

/// POST /calcular body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CalculationRequest {
    #[serde(rename = "numeroVias")]
    pub outcome_count: Option<usize>,

    #[serde(rename = "oddA")]
    pub odd_a: Option<f64>,
    #[serde(rename = "oddB")]
    pub odd_b: Option<f64>,
    #[serde(rename = "oddC")]
    pub odd_c: Option<f64>,
    #[serde(rename = "oddD")]
    pub odd_d: Option<f64>,
    #[serde(rename = "oddE")]
    pub odd_e: Option<f64>,

    #[serde(rename = "cbA")]
    pub cb_a: Option<f64>,
    #[serde(rename = "cbB")]
    pub cb_b: Option<f64>,
    #[serde(rename = "cbC")]
    pub cb_c: Option<f64>,
    #[serde(rename = "cbD")]
    pub cb_d: Option<f64>,
    #[serde(rename = "cbE")]
    pub cb_e: Option<f64>,

    #[serde(rename = "stakeA")]
    pub stake_a: Option<f64>,
    #[serde(rename = "modoEdicao")]
    pub edit_mode: bool,
    #[serde(rename = "stakesEditaveis")]
    pub edited_stakes: HashMap<String, f64>,
    /// Line to anchor on in dynamic mode
    #[serde(rename = "viaAncora")]
    pub anchor: Option<String>,
}

impl CalculationRequest {
    fn odds_for(&self, label: Label) -> Option<f64> {
        match label {
            Label::A => self.odd_a,
            Label::B => self.odd_b,
            Label::C => self.odd_c,
            Label::D => self.odd_d,
            Label::E => self.odd_e,
        }
    }

    fn cashback_for(&self, label: Label) -> Option<f64> {
        match label {
            Label::A => self.cb_a,
            Label::B => self.cb_b,
            Label::C => self.cb_c,
            Label::D => self.cb_d,
            Label::E => self.cb_e,
        }
    }

    /// Fill defaults and convert to the engine's input
    pub fn into_compute_request(self, default_outcome_count: usize) -> ComputeRequest {
        let outcome_count = self.outcome_count.unwrap_or(default_outcome_count);
        let labels = Label::first(outcome_count);

        let odds = labels
            .iter()
            .filter_map(|&l| self.odds_for(l).map(|v| (l, v)))
            .collect();
        let cashback = labels
            .iter()
            .filter_map(|&l| self.cashback_for(l).map(|v| (l, v)))
            .collect();

        let edited_stakes = self
            .edited_stakes
            .iter()
            .filter_map(|(key, &value)| match Label::from_str(key) {
                Some(label) => Some((label, value)),
                None => {
                    warn!(key = %key, "unknown label in stakesEditaveis ignored");
                    None
                }
            })
            .collect();

        let anchor = self.anchor.as_deref().and_then(|raw| {
            let parsed = Label::from_str(raw);
            if parsed.is_none() && !raw.trim().is_empty() {
                warn!(anchor = %raw, "unknown anchor label ignored");
            }
            parsed
        });

        ComputeRequest {
            outcome_count,
            odds,
            cashback,
            primary_stake: self.stake_a,
            edited_stakes,
            edit_mode: self.edit_mode,
            anchor,
        }
    }
}

/// POST /calcular response; per-line `stakeX` / `cbX` fields are flattened in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResponse {
    pub status: Status,
    pub lucro: f64,
    pub roi: f64,
    pub message: Option<String>,
    pub total_invested: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<AllocationMethod>,
    #[serde(flatten)]
    pub lines: BTreeMap<String, f64>,
}

impl CalculationResponse {
    pub fn from_result(result: &ComputationResult) -> Self {
        let mut lines = BTreeMap::new();
        for (label, stake) in &result.stakes {
            lines.insert(format!("stake{}", label), *stake);
        }
        for (label, cashback) in &result.cashback_values {
            lines.insert(format!("cb{}", label), *cashback);
        }

        Self {
            status: result.status,
            lucro: result.profit,
            roi: result.roi,
            message: result.message.clone(),
            total_invested: result.total_invested,
            mode: Some(result.mode),
            method: Some(result.method),
            lines,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            lucro: 0.0,
            roi: 0.0,
            message: Some(msg.into()),
            total_invested: 0.0,
            mode: None,
            method: None,
            lines: BTreeMap::new(),
        }
    }
}

/// GET /api/health response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_outcome_count_uses_default() {
        let body = r#"{"oddA": 2.0, "oddB": 2.0, "oddC": 9.0, "stakeA": 100}"#;
        let request: CalculationRequest = serde_json::from_str(body).unwrap();
        let compute = request.into_compute_request(2);

        assert_eq!(compute.outcome_count, 2);
        assert_eq!(compute.odds.len(), 2);
        assert_eq!(compute.primary_stake, Some(100.0));
        assert!(!compute.edit_mode);
    }

    #[test]
    fn edited_stakes_and_anchor_are_parsed() {
        let body = r#"{
            "numeroVias": 3,
            "oddA": 2.0, "oddB": 3.0, "oddC": 4.0,
            "cbB": 10,
            "stakeA": 100,
            "modoEdicao": true,
            "stakesEditaveis": {"B": 40.0, "Z": 1.0},
            "viaAncora": "b"
        }"#;
        let request: CalculationRequest = serde_json::from_str(body).unwrap();
        let compute = request.into_compute_request(2);

        assert_eq!(compute.outcome_count, 3);
        assert_eq!(compute.cashback.get(&Label::B), Some(&10.0));
        assert_eq!(compute.edited_stakes.len(), 1);
        assert_eq!(compute.edited_stakes.get(&Label::B), Some(&40.0));
        assert_eq!(compute.anchor, Some(Label::B));
    }

    #[test]
    fn error_response_has_zeroed_figures() {
        let json = serde_json::to_value(CalculationResponse::error("boom")).unwrap();
        assert_eq!(json["status"], "erro");
        assert_eq!(json["lucro"], 0.0);
        assert_eq!(json["roi"], 0.0);
        assert_eq!(json["total_invested"], 0.0);
        assert_eq!(json["message"], "boom");
        assert!(json.get("mode").is_none());
    }
}
