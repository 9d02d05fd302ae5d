//! Pending search nodes.
//!
//! A pending node is a branch that has been decided but not yet visited.
//! It becomes a ledger [`Node`](crate::ledger::Node) once popped from the
//! work stack and assigned an id.

use featurebound_core::subset_size;

use crate::ledger::{ROOT_DECISION, ROOT_PARENT_ID};

/// A branch waiting on the work stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNode {
    parent_id: i64,
    decision: String,
    features: Vec<String>,
    /// Index of the next unconsidered feature in universe order.
    next_index: usize,
}

impl PendingNode {
    /// Creates the root: no features, nothing considered yet.
    pub fn root() -> Self {
        Self {
            parent_id: ROOT_PARENT_ID,
            decision: ROOT_DECISION.to_string(),
            features: Vec::new(),
            next_index: 0,
        }
    }

    /// Creates the child that skips `feature`.
    pub fn exclude_child(&self, parent_id: u64, feature: &str) -> Self {
        Self {
            parent_id: parent_id as i64,
            decision: format!("EXCLUDE {feature}"),
            features: self.features.clone(),
            next_index: self.next_index + 1,
        }
    }

    /// Creates the child that adds `feature`.
    pub fn include_child(&self, parent_id: u64, feature: &str) -> Self {
        let mut features = Vec::with_capacity(self.features.len() + 1);
        features.extend_from_slice(&self.features);
        features.push(feature.to_string());
        Self {
            parent_id: parent_id as i64,
            decision: format!("INCLUDE {feature}"),
            features,
            next_index: self.next_index + 1,
        }
    }

    #[inline]
    pub fn parent_id(&self) -> i64 {
        self.parent_id
    }

    pub fn decision(&self) -> &str {
        &self.decision
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    #[inline]
    pub fn feature_count(&self) -> u32 {
        subset_size(&self.features)
    }

    #[inline]
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Splits the node into the parts a ledger node is built from.
    pub(crate) fn into_parts(self) -> (i64, String, Vec<String>) {
        (self.parent_id, self.decision, self.features)
    }
}
