//! Node count termination.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates once the tree holds a number of nodes.
///
/// # Example
///
/// ```
/// use featurebound_solver::termination::NodeCountTermination;
///
/// // Stop after 10_000 nodes
/// let term = NodeCountTermination::new(10_000);
/// ```
#[derive(Debug, Clone)]
pub struct NodeCountTermination {
    limit: u64,
}

impl NodeCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl<E> Termination<E> for NodeCountTermination {
    fn is_terminated(&self, scope: &SearchScope<E>) -> bool {
        scope.nodes_created() >= self.limit
    }
}
