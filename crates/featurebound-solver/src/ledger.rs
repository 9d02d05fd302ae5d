//! Append-only ledger of every node the search creates.
//!
//! Nodes are created once, appended in visitation order and never mutated
//! or removed. Ids are assigned by the ledger, so they are unique and
//! strictly increasing in visitation order.

use std::fmt;

use featurebound_core::{subset_size, FitnessScore};

/// Parent id of the root node.
pub const ROOT_PARENT_ID: i64 = -1;

/// Decision label of the root node.
pub const ROOT_DECISION: &str = "ROOT";

/// Final status of a search node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeStatus {
    /// Reserved for the root in consumers that colour it separately.
    ///
    /// The search itself gives the root the status its evaluation earns.
    Root,
    /// Evaluated, infeasible, and branched on the next feature.
    Explored,
    /// Cut by the cardinality bound before evaluation; carries no score.
    BoundPruned,
    /// Feasible but not smaller than the best known solution.
    DominatedSolution,
    /// Feasible and strictly smaller than every earlier solution.
    CurrentBestSolution,
    /// Evaluated, infeasible, and no features left to branch on.
    InvalidLeaf,
}

impl NodeStatus {
    /// Returns the tag used in exported artifacts.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeStatus::Root => "ROOT",
            NodeStatus::Explored => "EXPLORED",
            NodeStatus::BoundPruned => "BOUND_PRUNED",
            NodeStatus::DominatedSolution => "DOMINATED_SOLUTION",
            NodeStatus::CurrentBestSolution => "CURRENT_BEST_SOLUTION",
            NodeStatus::InvalidLeaf => "INVALID_LEAF",
        }
    }

    /// Returns true for statuses that mark a feasible subset.
    pub fn is_solution(&self) -> bool {
        matches!(
            self,
            NodeStatus::DominatedSolution | NodeStatus::CurrentBestSolution
        )
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A visited node of the binary decision tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: u64,
    parent_id: i64,
    decision: String,
    features: Vec<String>,
    score: Option<FitnessScore>,
    status: NodeStatus,
}

impl Node {
    /// Creates a node cut by the bound. It never reaches evaluation.
    pub fn pruned(id: u64, parent_id: i64, decision: String, features: Vec<String>) -> Self {
        Self {
            id,
            parent_id,
            decision,
            features,
            score: None,
            status: NodeStatus::BoundPruned,
        }
    }

    /// Creates an evaluated node.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `status` is [`NodeStatus::BoundPruned`];
    /// pruned nodes carry no score.
    pub fn evaluated(
        id: u64,
        parent_id: i64,
        decision: String,
        features: Vec<String>,
        score: FitnessScore,
        status: NodeStatus,
    ) -> Self {
        debug_assert_ne!(status, NodeStatus::BoundPruned);
        Self {
            id,
            parent_id,
            decision,
            features,
            score: Some(score),
            status,
        }
    }

    /// Returns the node id.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the parent id, [`ROOT_PARENT_ID`] for the root.
    #[inline]
    pub fn parent_id(&self) -> i64 {
        self.parent_id
    }

    /// Returns the decision label.
    pub fn decision(&self) -> &str {
        &self.decision
    }

    /// Returns the features in universe order.
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Returns the number of features.
    #[inline]
    pub fn feature_count(&self) -> u32 {
        subset_size(&self.features)
    }

    /// Returns the score; `None` exactly when the node was bound-pruned.
    #[inline]
    pub fn score(&self) -> Option<FitnessScore> {
        self.score
    }

    /// Returns the status.
    #[inline]
    pub fn status(&self) -> NodeStatus {
        self.status
    }

    /// Returns true if this is the root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent_id == ROOT_PARENT_ID
    }
}

/// Append-only node ledger that also owns node id assignment.
#[derive(Debug, Clone, Default)]
pub struct TreeLedger {
    nodes: Vec<Node>,
    next_id: u64,
}

impl TreeLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the next node id.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Appends a finished node.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the node's id was not allocated by this
    /// ledger, or if its parent has not been appended yet.
    pub fn append(&mut self, node: Node) {
        debug_assert!(node.id < self.next_id, "node id was not allocated");
        debug_assert!(
            node.is_root() || self.get(node.parent_id as u64).is_some(),
            "parent {} not in ledger",
            node.parent_id
        );
        self.nodes.push(node);
    }

    /// Returns all nodes in visitation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the node with `id`.
    pub fn get(&self, id: u64) -> Option<&Node> {
        // Every allocated id is appended before the next one is handed out,
        // so a node's position equals its id.
        self.nodes.get(id as usize).filter(|n| n.id == id)
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no node has been appended.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of nodes with `status`.
    pub fn count_by_status(&self, status: NodeStatus) -> usize {
        self.nodes.iter().filter(|n| n.status == status).count()
    }

    /// Returns the number of nodes that reached evaluation.
    pub fn evaluated_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.score.is_some()).count()
    }

    /// Returns the number of bound-pruned nodes.
    pub fn pruned_count(&self) -> usize {
        self.count_by_status(NodeStatus::BoundPruned)
    }

    /// Consumes the ledger, returning the nodes.
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}
