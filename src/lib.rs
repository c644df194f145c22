//! StakeHedge Library
//!
//! Equal-profit stake allocation across mutually exclusive betting lines

pub mod config;
pub mod engine;
pub mod error;
pub mod types;

#[cfg(feature = "server")]
pub mod api;

pub use engine::{compute, ComputeRequest};
pub use error::EngineError;
