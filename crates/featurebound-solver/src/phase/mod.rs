//! Search phases.
//!
//! - [`exhaustive::BranchAndBoundPhase`]: exact minimum-cardinality search
//! - [`greedy::GreedyForwardPhase`]: forward-selection baseline

pub mod exhaustive;
pub mod greedy;
