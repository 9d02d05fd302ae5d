//! Exhaustive search phase using branch-and-bound.
//!
//! The search walks a binary decision tree over the feature universe: each
//! level decides whether one feature (in universe order) is excluded or
//! included. A node whose feature count already matches or exceeds the best
//! solution's is pruned without evaluation. Feasible nodes never branch,
//! because growing a feasible set can only produce larger solutions.
//!
//! Traversal is depth-first with an explicit LIFO work stack. Ids are
//! assigned when a node is popped, so they follow pre-order and match the
//! order in which the bound is observed.

mod node;

use std::fmt;
use std::time::Duration;

use featurebound_config::BranchOrderType;
use featurebound_core::{Evaluator, FeatureUniverse, Solution};
use tracing::{debug, info, trace, warn};

use crate::ledger::{Node, NodeStatus};
use crate::scope::SearchScope;
use crate::termination::{NoTermination, Termination};
use crate::tracker::BestKnown;

pub use node::PendingNode;

/// Which child of a node is explored first.
///
/// The order changes node ids and which of several equally small solutions
/// is found first, never the optimal feature count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BranchOrder {
    /// Explore the subtree without the feature first.
    #[default]
    ExcludeFirst,

    /// Explore the subtree with the feature first.
    IncludeFirst,
}

impl fmt::Display for BranchOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchOrder::ExcludeFirst => write!(f, "ExcludeFirst"),
            BranchOrder::IncludeFirst => write!(f, "IncludeFirst"),
        }
    }
}

impl From<BranchOrderType> for BranchOrder {
    fn from(order: BranchOrderType) -> Self {
        match order {
            BranchOrderType::ExcludeFirst => BranchOrder::ExcludeFirst,
            BranchOrderType::IncludeFirst => BranchOrder::IncludeFirst,
        }
    }
}

/// Everything a finished search produced.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Every created node in id order.
    pub nodes: Vec<Node>,
    /// The final pruning bound.
    pub best: BestKnown,
    /// The best solution with its score, `None` if no subset met the goal.
    pub final_solution: Option<Solution>,
    /// Every feasible solution in discovery order.
    pub timeline: Vec<Solution>,
    /// Evaluator calls made by the search.
    pub nodes_visited: u64,
    /// Wall-clock duration of the search.
    pub elapsed: Duration,
    /// Whether a termination condition cut the search short.
    pub terminated_early: bool,
    /// The goal the search ran against.
    pub goal: f64,
}

impl SearchOutcome {
    /// Returns true if some subset met the goal.
    pub fn is_feasible(&self) -> bool {
        self.final_solution.is_some()
    }

    /// Returns the best feature count, if any.
    pub fn best_feature_count(&self) -> Option<u32> {
        self.best.feature_count()
    }

    /// Returns the number of feasible solutions found.
    pub fn solutions_found(&self) -> u64 {
        self.timeline.len() as u64
    }

    /// Returns the number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of nodes with `status`.
    pub fn count_by_status(&self, status: NodeStatus) -> usize {
        self.nodes.iter().filter(|n| n.status() == status).count()
    }
}

/// Branch-and-bound phase finding a minimum-cardinality feasible subset.
///
/// # Type Parameters
/// * `T` - The termination condition, [`NoTermination`] by default
///
/// # Example
///
/// ```
/// use featurebound_core::{FeatureUniverse, FitnessScore, FnEvaluator};
/// use featurebound_solver::{BranchAndBoundPhase, SearchScope};
///
/// let universe = FeatureUniverse::new(["a", "b", "c"]).unwrap();
/// let eval = FnEvaluator::new(|f: &[String]| FitnessScore::of(f.len() as f64 / 3.0));
///
/// let phase = BranchAndBoundPhase::new(universe);
/// let outcome = phase.solve(SearchScope::new(eval, 0.3));
///
/// assert_eq!(outcome.best_feature_count(), Some(1));
/// assert_eq!(outcome.node_count(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct BranchAndBoundPhase<T = NoTermination> {
    universe: FeatureUniverse,
    order: BranchOrder,
    termination: T,
}

impl BranchAndBoundPhase {
    /// Creates an exclude-first phase that runs to completion.
    pub fn new(universe: FeatureUniverse) -> Self {
        Self {
            universe,
            order: BranchOrder::default(),
            termination: NoTermination,
        }
    }
}

impl<T> BranchAndBoundPhase<T> {
    /// Sets the branch order.
    pub fn with_order(mut self, order: BranchOrder) -> Self {
        self.order = order;
        self
    }

    /// Replaces the termination condition.
    pub fn with_termination<T2>(self, termination: T2) -> BranchAndBoundPhase<T2> {
        BranchAndBoundPhase {
            universe: self.universe,
            order: self.order,
            termination,
        }
    }

    pub fn universe(&self) -> &FeatureUniverse {
        &self.universe
    }

    pub fn order(&self) -> BranchOrder {
        self.order
    }

    /// Runs the search in `scope` and returns its outcome.
    ///
    /// The scope's calculation count is reset first, so `nodes_visited`
    /// counts this search only.
    pub fn solve<E>(&self, mut scope: SearchScope<E>) -> SearchOutcome
    where
        E: Evaluator,
        T: Termination<E>,
    {
        scope.start_search();
        let goal = scope.goal();

        info!(
            event = "search_start",
            feature_count = self.universe.len(),
            goal,
            order = %self.order,
        );

        let mut stack = vec![PendingNode::root()];
        let mut terminated_early = false;

        while let Some(pending) = stack.pop() {
            if self.termination.is_terminated(&scope) {
                terminated_early = true;
                warn!(
                    event = "search_terminated",
                    nodes_created = scope.nodes_created(),
                    pending = stack.len() + 1,
                );
                break;
            }

            let id = scope.ledger_mut().allocate_id();
            let feature_count = pending.feature_count();

            // Bound check
            if scope.tracker().best().prunes(feature_count) {
                debug!(
                    event = "bound_pruned",
                    id,
                    feature_count,
                    best = scope.tracker().best().feature_count(),
                );
                let (parent_id, decision, features) = pending.into_parts();
                scope
                    .ledger_mut()
                    .append(Node::pruned(id, parent_id, decision, features));
                continue;
            }

            let score = scope.calculate_score(pending.features());
            trace!(event = "node_evaluated", id, feature_count, score = %score);

            // Goal check
            if score.meets(goal) {
                let solution = Solution::new(pending.features().to_vec(), score);
                scope.tracker_mut().record(solution.clone());
                let status = if scope.tracker_mut().update_best(&solution) {
                    info!(
                        event = "new_best",
                        id,
                        feature_count,
                        score = %score,
                        features = ?solution.features,
                    );
                    NodeStatus::CurrentBestSolution
                } else {
                    NodeStatus::DominatedSolution
                };
                let (parent_id, decision, features) = pending.into_parts();
                scope.ledger_mut().append(Node::evaluated(
                    id, parent_id, decision, features, score, status,
                ));
                continue;
            }

            // Exhaustion check
            let Some(feature) = self.universe.get(pending.next_index()) else {
                let (parent_id, decision, features) = pending.into_parts();
                scope.ledger_mut().append(Node::evaluated(
                    id,
                    parent_id,
                    decision,
                    features,
                    score,
                    NodeStatus::InvalidLeaf,
                ));
                continue;
            };

            let exclude = pending.exclude_child(id, feature);
            let include = pending.include_child(id, feature);
            let (parent_id, decision, features) = pending.into_parts();
            scope.ledger_mut().append(Node::evaluated(
                id,
                parent_id,
                decision,
                features,
                score,
                NodeStatus::Explored,
            ));

            // The child pushed last is visited first.
            match self.order {
                BranchOrder::ExcludeFirst => {
                    stack.push(include);
                    stack.push(exclude);
                }
                BranchOrder::IncludeFirst => {
                    stack.push(exclude);
                    stack.push(include);
                }
            }
        }

        let elapsed = scope.elapsed().unwrap_or_default();
        let nodes_visited = scope.nodes_visited();
        let (ledger, tracker) = scope.into_parts();
        let final_solution = tracker.best_solution();
        let (best, timeline) = tracker.into_parts();

        info!(
            event = "search_end",
            nodes_created = ledger.len(),
            nodes_visited,
            pruned = ledger.pruned_count(),
            solutions_found = timeline.len(),
            best_feature_count = best.feature_count(),
            elapsed_ms = elapsed.as_millis() as u64,
            terminated_early,
        );
        if final_solution.is_none() {
            warn!(
                event = "no_feasible_solution",
                goal,
                "no feature subset reached the goal; consider a lower goal"
            );
        }

        SearchOutcome {
            nodes: ledger.into_nodes(),
            best,
            final_solution,
            timeline,
            nodes_visited,
            elapsed,
            terminated_early,
            goal,
        }
    }
}
