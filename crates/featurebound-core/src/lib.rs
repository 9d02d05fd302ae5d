//! Featurebound Core - Core types and traits for feature subset selection
//!
//! This crate provides the fundamental abstractions shared by every
//! featurebound crate:
//! - [`FeatureUniverse`]: the ordered, fixed set of candidate features
//! - [`FitnessScore`]: the scalar score of a feature subset, with a worst sentinel
//! - [`Evaluator`]: the injected capability that scores a feature subset
//! - [`Solution`] and [`GreedyStep`]: value types produced by the search phases

pub mod error;
pub mod evaluator;
pub mod score;
pub mod solution;
pub mod universe;

pub use error::FeatureBoundError;
pub use evaluator::{Evaluator, FnEvaluator};
pub use score::FitnessScore;
pub use solution::{GreedyStep, Solution};
pub use universe::{subset_size, FeatureUniverse};
