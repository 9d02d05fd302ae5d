//! Featurebound Solver Engine
//!
//! This crate finds a minimum-cardinality feature subset whose score meets
//! a goal. It provides:
//! - [`ScoreDirector`]: counting wrapper around an [`Evaluator`](featurebound_core::Evaluator)
//! - [`TreeLedger`]: append-only audit trail of every search node
//! - [`SolutionTracker`]: best-known solution and feasible-solution timeline
//! - [`BranchAndBoundPhase`]: depth-first binary branch-and-bound
//! - [`GreedyForwardPhase`]: forward-selection baseline for comparison
//! - Termination conditions (optional wall-clock and node limits)
//! - [`run_selection`]: greedy baseline then search, with metrics

pub mod director;
pub mod ledger;
pub mod phase;
pub mod run;
pub mod scope;
pub mod statistics;
pub mod termination;
pub mod tracker;

pub use director::ScoreDirector;
pub use ledger::{Node, NodeStatus, TreeLedger, ROOT_DECISION, ROOT_PARENT_ID};
pub use phase::{
    exhaustive::{BranchAndBoundPhase, BranchOrder, PendingNode, SearchOutcome},
    greedy::GreedyForwardPhase,
};
pub use run::{run_selection, RunOptions, RunOutcome};
pub use scope::SearchScope;
pub use statistics::ExecutionMetrics;
pub use termination::{
    NoTermination, NodeCountTermination, OrTermination, Termination, TimeTermination,
};
pub use tracker::{BestKnown, SolutionTracker};
