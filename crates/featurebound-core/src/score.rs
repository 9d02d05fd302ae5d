//! FitnessScore - scalar subset fitness with a worst sentinel

use std::cmp::Ordering;
use std::fmt;

/// The fitness of a feature subset, higher is better.
///
/// Evaluators report every failure (and the empty subset) as
/// [`FitnessScore::WORST`], which compares below any finite goal.
/// `NaN` is never stored: [`FitnessScore::of`] maps it to the sentinel.
///
/// # Examples
///
/// ```
/// use featurebound_core::FitnessScore;
///
/// let fit = FitnessScore::of(0.42);
/// assert!(fit.meets(0.30));
/// assert!(!FitnessScore::WORST.meets(-1.0e300));
/// assert!(FitnessScore::of(f64::NAN).is_worst());
/// assert!(fit > FitnessScore::WORST);
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct FitnessScore {
    value: f64,
}

impl FitnessScore {
    /// The worst possible score; used for the empty subset and failed fits.
    pub const WORST: FitnessScore = FitnessScore {
        value: f64::NEG_INFINITY,
    };

    /// Creates a score from a raw value. `NaN` becomes [`FitnessScore::WORST`].
    #[inline]
    pub fn of(value: f64) -> Self {
        if value.is_nan() {
            Self::WORST
        } else {
            FitnessScore { value }
        }
    }

    /// Returns the raw value (negative infinity for the sentinel).
    #[inline]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Returns true if this is the worst sentinel.
    #[inline]
    pub fn is_worst(&self) -> bool {
        self.value == f64::NEG_INFINITY
    }

    /// Returns the value if it is finite.
    #[inline]
    pub fn finite(&self) -> Option<f64> {
        self.value.is_finite().then_some(self.value)
    }

    /// Returns true if this score meets or exceeds `goal`.
    #[inline]
    pub fn meets(&self, goal: f64) -> bool {
        self.value >= goal
    }
}

impl Default for FitnessScore {
    fn default() -> Self {
        Self::WORST
    }
}

impl PartialOrd for FitnessScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl From<f64> for FitnessScore {
    fn from(value: f64) -> Self {
        Self::of(value)
    }
}

impl fmt::Debug for FitnessScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FitnessScore({})", self.value)
    }
}

impl fmt::Display for FitnessScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.finite() {
            Some(v) => write!(f, "{v:.4}"),
            None if self.is_worst() => write!(f, "-inf"),
            None => write!(f, "{}", self.value),
        }
    }
}
