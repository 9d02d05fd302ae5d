//! The subset evaluation capability consumed by every search phase.

use std::fmt::{self, Debug};

use crate::score::FitnessScore;

/// Scores a subset of named features against a fixed training dataset.
///
/// Implementations must be pure with respect to their input: the same
/// subset always yields the same score. The empty subset must score
/// [`FitnessScore::WORST`]. Internal failures (degenerate fits, numerical
/// singularities) are never propagated; they are reported as
/// [`FitnessScore::WORST`] so the search continues unaffected.
pub trait Evaluator: Debug {
    /// Scores the given subset. Features are in universe order.
    fn evaluate(&self, features: &[String]) -> FitnessScore;
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    fn evaluate(&self, features: &[String]) -> FitnessScore {
        (**self).evaluate(features)
    }
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn evaluate(&self, features: &[String]) -> FitnessScore {
        (**self).evaluate(features)
    }
}

/// Adapts a closure into an [`Evaluator`].
///
/// The closure is only called for non-empty subsets; the empty subset
/// always scores [`FitnessScore::WORST`].
///
/// # Examples
///
/// ```
/// use featurebound_core::{Evaluator, FitnessScore, FnEvaluator};
///
/// let eval = FnEvaluator::new(|features: &[String]| FitnessScore::of(features.len() as f64));
/// assert_eq!(eval.evaluate(&["x".to_string()]), FitnessScore::of(1.0));
/// assert!(eval.evaluate(&[]).is_worst());
/// ```
pub struct FnEvaluator<F> {
    score_fn: F,
}

impl<F> FnEvaluator<F>
where
    F: Fn(&[String]) -> FitnessScore,
{
    /// Wraps a scoring closure.
    pub fn new(score_fn: F) -> Self {
        Self { score_fn }
    }
}

impl<F> Debug for FnEvaluator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnEvaluator").finish_non_exhaustive()
    }
}

impl<F> Evaluator for FnEvaluator<F>
where
    F: Fn(&[String]) -> FitnessScore,
{
    fn evaluate(&self, features: &[String]) -> FitnessScore {
        if features.is_empty() {
            return FitnessScore::WORST;
        }
        (self.score_fn)(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_evaluator_empty_subset_is_worst() {
        let eval = FnEvaluator::new(|_: &[String]| FitnessScore::of(1.0));
        assert!(eval.evaluate(&[]).is_worst());
        assert_eq!(eval.evaluate(&["a".to_string()]), FitnessScore::of(1.0));
    }

    #[test]
    fn test_reference_and_box_delegate() {
        let eval = FnEvaluator::new(|f: &[String]| FitnessScore::of(f.len() as f64));
        let by_ref: &dyn Evaluator = &eval;
        let boxed: Box<dyn Evaluator> = Box::new(FnEvaluator::new(|_: &[String]| {
            FitnessScore::of(7.0)
        }));
        let subset = vec!["a".to_string(), "b".to_string()];
        assert_eq!(by_ref.evaluate(&subset), FitnessScore::of(2.0));
        assert_eq!(boxed.evaluate(&subset), FitnessScore::of(7.0));
    }

    #[test]
    fn test_debug_does_not_expose_closure() {
        let eval = FnEvaluator::new(|_: &[String]| FitnessScore::WORST);
        assert!(format!("{eval:?}").contains("FnEvaluator"));
    }
}
