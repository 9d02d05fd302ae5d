//! Best-known solution and feasible-solution timeline.

use featurebound_core::Solution;

/// The single pruning bound of a search.
///
/// Starts at "+infinity" (no solution) and only ever decreases: it is
/// replaced only by a solution with strictly fewer features.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BestKnown {
    feature_count: Option<u32>,
    features: Vec<String>,
}

impl BestKnown {
    /// Returns the best feature count, `None` while still unset.
    #[inline]
    pub fn feature_count(&self) -> Option<u32> {
        self.feature_count
    }

    /// Returns the best feature set (empty while unset).
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Returns true once a solution has been found.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.feature_count.is_some()
    }

    /// Returns true if a node with `feature_count` features cannot improve
    /// on this bound.
    #[inline]
    pub fn prunes(&self, feature_count: u32) -> bool {
        self.feature_count.is_some_and(|best| feature_count >= best)
    }
}

/// Holds the best solution and every feasible solution ever found.
///
/// Ties among equally small solutions go to the one discovered first;
/// later ones are recorded in the timeline but never replace the best.
///
/// # Examples
///
/// ```
/// use featurebound_core::{FitnessScore, Solution};
/// use featurebound_solver::SolutionTracker;
///
/// let mut tracker = SolutionTracker::new();
/// let first = Solution::new(vec!["a".into(), "b".into()], FitnessScore::of(0.4));
/// let smaller = Solution::new(vec!["c".into()], FitnessScore::of(0.35));
///
/// tracker.record(first.clone());
/// assert!(tracker.update_best(&first));
/// tracker.record(smaller.clone());
/// assert!(tracker.update_best(&smaller));
///
/// assert_eq!(tracker.best().feature_count(), Some(1));
/// assert_eq!(tracker.solutions_found(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolutionTracker {
    best: BestKnown,
    timeline: Vec<Solution>,
}

impl SolutionTracker {
    /// Creates a tracker with no best solution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a feasible solution to the timeline unconditionally.
    pub fn record(&mut self, solution: Solution) {
        self.timeline.push(solution);
    }

    /// Returns true iff `feature_count` is strictly smaller than the best.
    #[inline]
    pub fn is_new_best(&self, feature_count: u32) -> bool {
        !self.best.prunes(feature_count)
    }

    /// Replaces the best solution if `solution` is strictly smaller.
    ///
    /// Returns whether the best changed.
    pub fn update_best(&mut self, solution: &Solution) -> bool {
        let count = solution.feature_count();
        if !self.is_new_best(count) {
            return false;
        }
        self.best = BestKnown {
            feature_count: Some(count),
            features: solution.features.clone(),
        };
        true
    }

    /// Returns the best-known cell.
    pub fn best(&self) -> &BestKnown {
        &self.best
    }

    /// Returns the best solution with its score, if one was found.
    ///
    /// The score comes from the first timeline entry with the best features.
    pub fn best_solution(&self) -> Option<Solution> {
        if !self.best.is_set() {
            return None;
        }
        self.timeline
            .iter()
            .find(|s| s.features == self.best.features)
            .cloned()
    }

    /// Returns every feasible solution in discovery order.
    pub fn timeline(&self) -> &[Solution] {
        &self.timeline
    }

    /// Returns how many feasible solutions were recorded.
    pub fn solutions_found(&self) -> u64 {
        self.timeline.len() as u64
    }

    /// Consumes the tracker, returning the best cell and the timeline.
    pub fn into_parts(self) -> (BestKnown, Vec<Solution>) {
        (self.best, self.timeline)
    }
}
