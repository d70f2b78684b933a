//! Offensive action planning.
//!
//! Defines the candidate action sum type and the phase/resource-gated
//! generator that search expands at every node.

pub mod action;
pub mod generate;

pub use action::{CandidateAction, Deployment, FOLLOW_UP_SCOUTS};
pub use generate::{generate, MAX_CANDIDATES};
