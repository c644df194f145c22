//! Stake Allocation Engine
//!
//! Derives hedged stakes for N mutually exclusive lines from odds, cashback
//! and one or more caller-pinned stakes. Pure and synchronous; every call
//! builds its state from scratch.

pub mod dispatcher;
pub mod fallback;
pub mod feasibility;
pub mod outcomes;
pub mod profit;
pub mod scenario;
pub mod solver;

pub use dispatcher::{compute, dispatch, ComputeRequest, Dispatch};
pub use fallback::{
    allocate_multi_anchor, allocate_single_anchor, normalized_implied_probabilities,
    HYBRID_REMAINING_BUDGET_FRACTION,
};
pub use feasibility::{is_feasible, validate};
pub use outcomes::{normalize_cashback, OutcomeSet, MAX_OUTCOMES, MIN_OUTCOMES};
pub use profit::{LinearProfit, ProfitModel};
pub use scenario::{evaluate, ImperfectReason, ScenarioReport, PERFECT_HEDGE_TOLERANCE};
pub use solver::{solve_equal_profit, solve_linear_system, SolveOutcome};
