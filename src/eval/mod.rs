//! Position evaluation.
//!
//! Scores a snapshot from our perspective as a weighted feature sum,
//! with weights keyed to the current game phase.

pub(crate) mod heuristic;
pub mod weights;

pub use heuristic::evaluate;
pub use weights::{unit_value, WeightProfile};
