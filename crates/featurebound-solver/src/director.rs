//! Score director: the only path from a search phase to the evaluator.

use featurebound_core::{Evaluator, FitnessScore};
use tracing::trace;

/// Wraps an [`Evaluator`] and counts every score calculation.
///
/// The count is the run's "nodes visited" metric. It is meaningful only
/// within one phase and is reset at the start of each search.
///
/// # Examples
///
/// ```
/// use featurebound_core::{FitnessScore, FnEvaluator};
/// use featurebound_solver::ScoreDirector;
///
/// let eval = FnEvaluator::new(|f: &[String]| FitnessScore::of(f.len() as f64));
/// let mut director = ScoreDirector::new(&eval);
///
/// director.calculate_score(&[]);
/// director.calculate_score(&["a".to_string()]);
/// assert_eq!(director.calculation_count(), 2);
///
/// director.reset_calculation_count();
/// assert_eq!(director.calculation_count(), 0);
/// ```
#[derive(Debug)]
pub struct ScoreDirector<E> {
    evaluator: E,
    calculation_count: u64,
}

impl<E> ScoreDirector<E> {
    /// Creates a director with a zero count.
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            calculation_count: 0,
        }
    }

    /// Returns how many scores have been calculated since the last reset.
    pub fn calculation_count(&self) -> u64 {
        self.calculation_count
    }

    /// Resets the calculation count to zero.
    pub fn reset_calculation_count(&mut self) {
        self.calculation_count = 0;
    }
}

impl<E: Evaluator> ScoreDirector<E> {
    /// Evaluates `features`, counting the call exactly once.
    pub fn calculate_score(&mut self, features: &[String]) -> FitnessScore {
        self.calculation_count += 1;
        let score = self.evaluator.evaluate(features);
        trace!(
            event = "score_calculated",
            count = self.calculation_count,
            feature_count = features.len() as u64,
            score = %score,
        );
        score
    }
}
