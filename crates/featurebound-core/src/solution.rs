//! Value types produced by the search phases.

use crate::score::FitnessScore;
use crate::universe::subset_size;

/// A feasible feature subset: its score met the goal when evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Features in universe order.
    pub features: Vec<String>,
    /// Score reported by the evaluator.
    pub score: FitnessScore,
}

impl Solution {
    /// Creates a new solution.
    pub fn new(features: Vec<String>, score: FitnessScore) -> Self {
        Self { features, score }
    }

    /// Returns the number of features in this solution.
    #[inline]
    pub fn feature_count(&self) -> u32 {
        subset_size(&self.features)
    }
}

/// One accepted step of the greedy forward-selection baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct GreedyStep {
    /// Selected features in selection order.
    pub features: Vec<String>,
    /// Score of the selected set after this step.
    pub score: FitnessScore,
}

impl GreedyStep {
    /// Creates a new greedy step.
    pub fn new(features: Vec<String>, score: FitnessScore) -> Self {
        Self { features, score }
    }

    /// Returns the number of selected features after this step.
    #[inline]
    pub fn feature_count(&self) -> u32 {
        subset_size(&self.features)
    }
}
