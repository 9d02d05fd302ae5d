//! The ordered set of candidate features for a run.

use std::collections::HashSet;

use crate::error::{FeatureBoundError, Result};

/// An ordered sequence of distinct feature identifiers.
///
/// The order is fixed for the duration of a run. It determines the
/// branching order of the search tree (and therefore node ids), not
/// which subsets are feasible.
///
/// # Examples
///
/// ```
/// use featurebound_core::FeatureUniverse;
///
/// let universe = FeatureUniverse::new(["alcohol", "sulphates", "pH"]).unwrap();
/// assert_eq!(universe.len(), 3);
/// assert_eq!(universe.get(1), Some("sulphates"));
/// assert_eq!(universe.index_of("pH"), Some(2));
///
/// assert!(FeatureUniverse::new(["a", "a"]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureUniverse {
    features: Vec<String>,
}

impl FeatureUniverse {
    /// Creates a universe from feature names, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is empty or appears more than once, or if
    /// there are more than `u32::MAX` names.
    pub fn new<I, S>(features: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let features: Vec<String> = features.into_iter().map(Into::into).collect();
        check_len(features.len())?;
        let mut seen = HashSet::with_capacity(features.len());
        for name in &features {
            if name.trim().is_empty() {
                return Err(FeatureBoundError::EmptyFeatureName);
            }
            if !seen.insert(name.as_str()) {
                return Err(FeatureBoundError::DuplicateFeature(name.clone()));
            }
        }
        Ok(Self { features })
    }

    /// Creates a universe with no candidate features.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of candidate features.
    #[inline]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if there are no candidate features.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Returns the feature at `index` in universe order.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.features.get(index).map(String::as_str)
    }

    /// Returns the position of `name` in universe order.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.features.iter().position(|f| f == name)
    }

    /// Returns true if `name` is part of this universe.
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Iterates over the features in universe order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(String::as_str)
    }

    /// Returns the features as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.features
    }

    /// Checks that every name in `subset` belongs to this universe.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureBoundError::UnknownFeature`] for the first stranger.
    pub fn check_subset(&self, subset: &[String]) -> Result<()> {
        match subset.iter().find(|name| !self.contains(name)) {
            Some(name) => Err(FeatureBoundError::UnknownFeature(name.clone())),
            None => Ok(()),
        }
    }
}

/// Returns the size of a feature subset as a node feature count.
///
/// Subsets are drawn from a [`FeatureUniverse`], whose length is checked to
/// fit in a `u32`, so this never saturates for a subset of a valid universe.
pub fn subset_size(features: &[String]) -> u32 {
    u32::try_from(features.len()).unwrap_or(u32::MAX)
}

fn check_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| FeatureBoundError::TooManyFeatures(len))
}

impl<'a> IntoIterator for &'a FeatureUniverse {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_order() {
        let universe = FeatureUniverse::new(["c", "a", "b"]).unwrap();
        let names: Vec<&str> = universe.iter().collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = FeatureUniverse::new(["a", "b", "a"]).unwrap_err();
        assert_eq!(err, FeatureBoundError::DuplicateFeature("a".to_string()));
    }

    #[test]
    fn test_rejects_blank_names() {
        let err = FeatureUniverse::new(["a", "  "]).unwrap_err();
        assert_eq!(err, FeatureBoundError::EmptyFeatureName);
    }

    #[test]
    fn test_empty_universe() {
        let universe = FeatureUniverse::empty();
        assert!(universe.is_empty());
        assert_eq!(universe.get(0), None);
    }

    #[test]
    fn test_length_bound() {
        assert_eq!(check_len(3), Ok(3));
        assert_eq!(check_len(u32::MAX as usize), Ok(u32::MAX));
        if let Some(over) = (u32::MAX as usize).checked_add(1) {
            assert_eq!(check_len(over), Err(FeatureBoundError::TooManyFeatures(over)));
        }
    }

    #[test]
    fn test_subset_size() {
        assert_eq!(subset_size(&[]), 0);
        assert_eq!(subset_size(&["a".to_string(), "b".to_string()]), 2);
    }

    #[test]
    fn test_check_subset() {
        let universe = FeatureUniverse::new(["a", "b"]).unwrap();
        assert!(universe.check_subset(&["b".to_string()]).is_ok());
        assert_eq!(
            universe.check_subset(&["a".to_string(), "z".to_string()]),
            Err(FeatureBoundError::UnknownFeature("z".to_string()))
        );
    }
}
