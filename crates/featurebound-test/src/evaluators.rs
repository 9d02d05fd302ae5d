//! Deterministic evaluators with closed-form scores.

use std::collections::HashMap;

use featurebound_core::{Evaluator, FitnessScore};

/// Scores a subset as `|S| / n`.
///
/// With `n = 3` and goal `0.3`, every single feature is feasible.
#[derive(Debug, Clone, Copy)]
pub struct CardinalityEvaluator {
    universe_size: usize,
}

impl CardinalityEvaluator {
    /// Creates an evaluator normalised by `universe_size`.
    pub fn new(universe_size: usize) -> Self {
        Self { universe_size }
    }
}

impl Evaluator for CardinalityEvaluator {
    fn evaluate(&self, features: &[String]) -> FitnessScore {
        if features.is_empty() || self.universe_size == 0 {
            return FitnessScore::WORST;
        }
        FitnessScore::of(features.len() as f64 / self.universe_size as f64)
    }
}

/// Scores subsets from an explicit table; unlisted subsets score worst.
///
/// Keys are order-insensitive: `["b", "a"]` and `["a", "b"]` are the same
/// entry.
#[derive(Debug, Clone, Default)]
pub struct TableEvaluator {
    scores: HashMap<Vec<String>, f64>,
}

impl TableEvaluator {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subset score.
    pub fn with(mut self, subset: &[&str], score: f64) -> Self {
        self.scores.insert(key(subset.iter().map(|s| s.to_string())), score);
        self
    }
}

impl Evaluator for TableEvaluator {
    fn evaluate(&self, features: &[String]) -> FitnessScore {
        if features.is_empty() {
            return FitnessScore::WORST;
        }
        self.scores
            .get(&key(features.iter().cloned()))
            .map_or(FitnessScore::WORST, |&score| FitnessScore::of(score))
    }
}

fn key(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut key: Vec<String> = names.collect();
    key.sort();
    key
}

/// Scores every non-empty subset the same.
#[derive(Debug, Clone, Copy)]
pub struct ConstantEvaluator {
    score: f64,
}

impl ConstantEvaluator {
    /// Creates an evaluator returning `score` for every non-empty subset.
    pub fn new(score: f64) -> Self {
        Self { score }
    }
}

impl Evaluator for ConstantEvaluator {
    fn evaluate(&self, features: &[String]) -> FitnessScore {
        if features.is_empty() {
            FitnessScore::WORST
        } else {
            FitnessScore::of(self.score)
        }
    }
}
