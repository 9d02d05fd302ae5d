//! Error types for featurebound

use thiserror::Error;

/// Main error type for featurebound core operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeatureBoundError {
    /// The same feature identifier appears twice in a universe
    #[error("Duplicate feature: {0}")]
    DuplicateFeature(String),

    /// A feature identifier is empty or only whitespace
    #[error("Feature names must not be empty")]
    EmptyFeatureName,

    /// A universe has more features than a `u32` feature count can hold
    #[error("Too many features: {0}")]
    TooManyFeatures(usize),

    /// A feature was referenced that is not part of the universe
    #[error("Unknown feature: {0}")]
    UnknownFeature(String),
}

/// Result type alias for featurebound core operations
pub type Result<T> = std::result::Result<T, FeatureBoundError>;
