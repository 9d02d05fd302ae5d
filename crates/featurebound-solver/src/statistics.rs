//! Run statistics reported alongside the search tree.

use std::time::Duration;

use crate::phase::exhaustive::SearchOutcome;

/// Execution metrics of one branch-and-bound search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecutionMetrics {
    /// Wall-clock time of the search, excluding the greedy baseline.
    pub elapsed: Duration,
    /// Evaluator calls made by the search.
    pub nodes_visited: u64,
    /// Feasible solutions recorded in the timeline.
    pub solutions_found: u64,
    /// The goal the search ran against.
    pub goal: f64,
}

impl ExecutionMetrics {
    /// Extracts the metrics of a finished search.
    pub fn from_outcome(outcome: &SearchOutcome) -> Self {
        Self {
            elapsed: outcome.elapsed,
            nodes_visited: outcome.nodes_visited,
            solutions_found: outcome.solutions_found(),
            goal: outcome.goal,
        }
    }

    /// Returns the elapsed time in fractional seconds.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Returns evaluations per second, zero for an instant run.
    pub fn nodes_per_second(&self) -> f64 {
        let secs = self.elapsed_seconds();
        if secs > 0.0 {
            self.nodes_visited as f64 / secs
        } else {
            0.0
        }
    }
}
