//! Core types used throughout StakeHedge
//!
//! Defines outcome labels, stake assignments and computation results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Outcome label, drawn from a fixed ordered alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Label {
    A,
    B,
    C,
    D,
    E,
}

impl Default for Label {
    fn default() -> Self {
        Label::PRIMARY
    }
}

impl Label {
    /// Every label, in order
    pub const ALL: [Label; 5] = [Label::A, Label::B, Label::C, Label::D, Label::E];

    /// The primary outcome, anchored in automatic and hybrid modes
    pub const PRIMARY: Label = Label::A;

    /// First `count` labels of the alphabet (clamped to the alphabet size)
    pub fn first(count: usize) -> &'static [Label] {
        static ORDERED: [Label; 5] = Label::ALL;
        &ORDERED[..count.min(ORDERED.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::A => "A",
            Label::B => "B",
            Label::C => "C",
            Label::D => "D",
            Label::E => "E",
        }
    }

    /// Parse from string (case-insensitive, surrounding whitespace ignored)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "A" => Some(Label::A),
            "B" => Some(Label::B),
            "C" => Some(Label::C),
            "D" => Some(Label::D),
            "E" => Some(Label::E),
            _ => None,
        }
    }

    pub fn is_primary(&self) -> bool {
        *self == Self::PRIMARY
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single betting line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub label: Label,
    /// Decimal odds paid on the winning stake
    pub odds: f64,
    /// Fraction of the stake refunded when this outcome loses (0.0 - 1.0)
    pub cashback_rate: f64,
}

impl Outcome {
    /// Un-normalized implied probability (1 / odds)
    pub fn implied_probability(&self) -> f64 {
        1.0 / self.odds
    }
}

/// Stake per outcome label, kept in label order
pub type StakeAssignment = BTreeMap<Label, f64>;

/// Classification of a finished computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "ok")]
    Ok,
    #[serde(rename = "perda")]
    Loss,
    #[serde(rename = "erro")]
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => write!(f, "ok"),
            Status::Loss => write!(f, "perda"),
            Status::Error => write!(f, "erro"),
        }
    }
}

/// Allocation path selected by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Primary outcome anchored, every other stake solved
    Automatic,
    /// Primary plus user-edited stakes anchored, the rest filled heuristically
    Hybrid,
    /// A single caller-chosen outcome anchored, every other stake solved
    Dynamic,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Automatic => write!(f, "automatic"),
            Mode::Hybrid => write!(f, "hybrid"),
            Mode::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// How the non-anchored stakes were produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMethod {
    EqualProfit,
    ProportionalFallback,
    ManualBlend,
}

/// Final result of one stake computation
#[derive(Debug, Clone, PartialEq)]
pub struct ComputationResult {
    pub status: Status,
    /// Reported profit: the common hedge profit, or the scenario mean otherwise
    pub profit: f64,
    /// Profit over total invested, in percent
    pub roi: f64,
    pub message: Option<String>,
    pub total_invested: f64,
    pub stakes: StakeAssignment,
    pub cashback_values: StakeAssignment,
    /// Profit if each outcome wins, in label order
    pub scenario_profits: Vec<f64>,
    pub mode: Mode,
    pub method: AllocationMethod,
}

impl ComputationResult {
    pub fn is_perfect_hedge(&self) -> bool {
        self.status == Status::Ok && self.message.is_none()
    }
}
