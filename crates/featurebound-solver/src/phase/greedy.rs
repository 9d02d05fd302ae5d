//! Greedy forward-selection baseline.
//!
//! Each round tries every unselected feature added to the current set and
//! keeps the one with the strictly highest score. The baseline stops at the
//! first round that does not strictly improve on the previous one.

use featurebound_core::{Evaluator, FeatureUniverse, FitnessScore, GreedyStep};
use tracing::info;

use crate::director::ScoreDirector;

/// Forward-selection baseline used to validate the branch-and-bound result.
///
/// Ties within a round go to the first candidate in universe order.
///
/// # Example
///
/// ```
/// use featurebound_core::{FeatureUniverse, FitnessScore, FnEvaluator};
/// use featurebound_solver::{GreedyForwardPhase, ScoreDirector};
///
/// let universe = FeatureUniverse::new(["a", "b"]).unwrap();
/// let eval = FnEvaluator::new(|f: &[String]| FitnessScore::of(f.len() as f64 / 2.0));
/// let mut director = ScoreDirector::new(eval);
///
/// let steps = GreedyForwardPhase::new(&universe).solve(&mut director);
/// assert_eq!(steps.len(), 2);
/// assert_eq!(steps[0].features, vec!["a".to_string()]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GreedyForwardPhase<'a> {
    universe: &'a FeatureUniverse,
}

impl<'a> GreedyForwardPhase<'a> {
    pub fn new(universe: &'a FeatureUniverse) -> Self {
        Self { universe }
    }

    /// Runs the baseline, returning one step per accepted round.
    pub fn solve<E: Evaluator>(&self, director: &mut ScoreDirector<E>) -> Vec<GreedyStep> {
        info!(event = "greedy_start", feature_count = self.universe.len());

        let mut selected: Vec<String> = Vec::new();
        let mut remaining: Vec<&str> = self.universe.iter().collect();
        let mut best_score = FitnessScore::WORST;
        let mut steps = Vec::new();

        while !remaining.is_empty() {
            let mut round_best: Option<(usize, FitnessScore)> = None;
            for (position, candidate) in remaining.iter().enumerate() {
                let mut trial = selected.clone();
                trial.push(candidate.to_string());
                let score = director.calculate_score(&trial);
                if round_best.map_or(true, |(_, s)| score > s) {
                    round_best = Some((position, score));
                }
            }

            let Some((position, score)) = round_best else {
                break;
            };
            if score <= best_score {
                break;
            }

            let added = remaining.remove(position);
            selected.push(added.to_string());
            best_score = score;
            info!(
                event = "greedy_step",
                feature_count = selected.len(),
                score = %score,
                added,
            );
            steps.push(GreedyStep::new(selected.clone(), score));
        }

        info!(
            event = "greedy_end",
            steps = steps.len(),
            evaluations = director.calculation_count(),
            best_score = %best_score,
        );
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use featurebound_test::{abc_universe, features, universe, CardinalityEvaluator, TableEvaluator};

    fn run(universe: &FeatureUniverse, eval: impl Evaluator) -> Vec<GreedyStep> {
        let mut director = ScoreDirector::new(eval);
        GreedyForwardPhase::new(universe).solve(&mut director)
    }

    #[test]
    fn test_abc_cardinality_steps() {
        let steps = run(&abc_universe(), CardinalityEvaluator::new(3));

        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].features, features(&["a"]));
        assert_eq!(steps[1].features, features(&["a", "b"]));
        assert_eq!(steps[2].features, features(&["a", "b", "c"]));
        assert!((steps[0].score.value() - 1.0 / 3.0).abs() < 1e-12);
        assert!((steps[1].score.value() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(steps[2].score, FitnessScore::of(1.0));
    }

    #[test]
    fn test_steps_grow_by_one_and_improve_strictly() {
        let steps = run(&universe(&["a", "b", "c", "d", "e"]), CardinalityEvaluator::new(5));
        for pair in steps.windows(2) {
            assert_eq!(pair[1].feature_count(), pair[0].feature_count() + 1);
            assert!(pair[1].score > pair[0].score);
        }
        assert_eq!(steps[0].feature_count(), 1);
    }

    #[test]
    fn test_picks_strictly_best_candidate() {
        let eval = TableEvaluator::new()
            .with(&["a"], 0.1)
            .with(&["b"], 0.3)
            .with(&["c"], 0.2)
            .with(&["a", "b"], 0.35)
            .with(&["b", "c"], 0.5);
        let steps = run(&abc_universe(), eval);

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].features, features(&["b"]));
        // Selection order, not universe order
        assert_eq!(steps[1].features, features(&["b", "c"]));
    }

    #[test]
    fn test_stops_without_strict_improvement() {
        let eval = TableEvaluator::new()
            .with(&["a"], 0.4)
            .with(&["a", "b"], 0.4)
            .with(&["a", "c"], 0.39);
        let steps = run(&abc_universe(), eval);

        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].features, features(&["a"]));
    }

    #[test]
    fn test_all_worst_yields_no_steps() {
        let steps = run(&abc_universe(), TableEvaluator::new());
        assert!(steps.is_empty());
    }

    #[test]
    fn test_empty_universe() {
        let mut director = ScoreDirector::new(CardinalityEvaluator::new(0));
        let steps = GreedyForwardPhase::new(&FeatureUniverse::empty()).solve(&mut director);
        assert!(steps.is_empty());
        assert_eq!(director.calculation_count(), 0);
    }

    #[test]
    fn test_evaluation_count() {
        let mut director = ScoreDirector::new(CardinalityEvaluator::new(3));
        GreedyForwardPhase::new(&abc_universe()).solve(&mut director);
        // 3 + 2 + 1 candidates over three rounds
        assert_eq!(director.calculation_count(), 6);
    }

    #[test]
    fn test_deterministic() {
        let first = run(&abc_universe(), CardinalityEvaluator::new(3));
        let second = run(&abc_universe(), CardinalityEvaluator::new(3));
        assert_eq!(first, second);
    }
}
