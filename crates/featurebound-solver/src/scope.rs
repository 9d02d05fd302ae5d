//! Search scope: the mutable state shared by one branch-and-bound run.

use std::time::{Duration, Instant};

use featurebound_core::{Evaluator, FitnessScore};

use crate::director::ScoreDirector;
use crate::ledger::TreeLedger;
use crate::tracker::SolutionTracker;

/// Owns the score director, tree ledger and solution tracker of a search.
///
/// A scope is single-use: one search fills one ledger.
#[derive(Debug)]
pub struct SearchScope<E> {
    director: ScoreDirector<E>,
    goal: f64,
    ledger: TreeLedger,
    tracker: SolutionTracker,
    start_time: Option<Instant>,
}

impl<E> SearchScope<E> {
    /// Creates a scope evaluating with `evaluator` against `goal`.
    pub fn new(evaluator: E, goal: f64) -> Self {
        Self::with_director(ScoreDirector::new(evaluator), goal)
    }

    /// Creates a scope around an existing director.
    ///
    /// The director's count is kept until [`start_search`](Self::start_search).
    pub fn with_director(director: ScoreDirector<E>, goal: f64) -> Self {
        Self {
            director,
            goal,
            ledger: TreeLedger::new(),
            tracker: SolutionTracker::new(),
            start_time: None,
        }
    }

    /// Marks the start of the search: resets the calculation count and
    /// starts the clock.
    pub fn start_search(&mut self) {
        self.director.reset_calculation_count();
        self.start_time = Some(Instant::now());
    }

    /// Returns time since [`start_search`](Self::start_search), if started.
    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn goal(&self) -> f64 {
        self.goal
    }

    pub fn ledger(&self) -> &TreeLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut TreeLedger {
        &mut self.ledger
    }

    pub fn tracker(&self) -> &SolutionTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut SolutionTracker {
        &mut self.tracker
    }

    /// Returns how many nodes have been appended to the ledger.
    pub fn nodes_created(&self) -> u64 {
        self.ledger.len() as u64
    }

    /// Returns how many evaluations were made since the search started.
    pub fn nodes_visited(&self) -> u64 {
        self.director.calculation_count()
    }

    /// Consumes the scope, returning its ledger and tracker.
    pub fn into_parts(self) -> (TreeLedger, SolutionTracker) {
        (self.ledger, self.tracker)
    }
}

impl<E: Evaluator> SearchScope<E> {
    /// Scores a subset through the director.
    pub fn calculate_score(&mut self, features: &[String]) -> FitnessScore {
        self.director.calculate_score(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use featurebound_test::{features, CardinalityEvaluator};

    #[test]
    fn test_start_search_resets_count() {
        let mut scope = SearchScope::new(CardinalityEvaluator::new(3), 0.3);
        scope.calculate_score(&features(&["a"]));
        scope.calculate_score(&features(&["b"]));
        assert_eq!(scope.nodes_visited(), 2);
        assert!(scope.elapsed().is_none());

        scope.start_search();
        assert_eq!(scope.nodes_visited(), 0);
        assert!(scope.elapsed().is_some());
    }

    #[test]
    fn test_fresh_scope() {
        let scope = SearchScope::new(CardinalityEvaluator::new(3), 0.5);
        assert_eq!(scope.goal(), 0.5);
        assert_eq!(scope.nodes_created(), 0);
        assert!(scope.tracker().timeline().is_empty());
    }
}
