//! Shared test fixtures for featurebound crates.
//!
//! This crate provides deterministic evaluators and small universes for
//! testing. It depends only on `featurebound-core`.
//!
//! - [`evaluators`] - closed-form evaluators with known optima
//! - [`abc_universe`] - the three-feature universe `{a, b, c}`
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! featurebound-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use featurebound_test::{abc_universe, CardinalityEvaluator};
//! ```

pub mod evaluators;

pub use evaluators::{CardinalityEvaluator, ConstantEvaluator, TableEvaluator};

use featurebound_core::FeatureUniverse;

/// The universe `{a, b, c}` in that order.
pub fn abc_universe() -> FeatureUniverse {
    universe(&["a", "b", "c"])
}

/// Builds a universe from string literals.
///
/// # Panics
///
/// Panics if the names are not distinct; fixtures are expected to be valid.
pub fn universe(names: &[&str]) -> FeatureUniverse {
    FeatureUniverse::new(names.iter().copied()).expect("fixture universe must be valid")
}

/// Converts string literals into an owned feature list.
pub fn features(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
