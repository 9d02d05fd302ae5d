//! End-to-end selection run: greedy baseline, then branch-and-bound.

use std::time::Duration;

use featurebound_config::SelectionConfig;
use featurebound_core::{Evaluator, FeatureUniverse, GreedyStep};
use tracing::info;

use crate::director::ScoreDirector;
use crate::phase::exhaustive::{BranchAndBoundPhase, BranchOrder, SearchOutcome};
use crate::phase::greedy::GreedyForwardPhase;
use crate::scope::SearchScope;
use crate::statistics::ExecutionMetrics;
use crate::termination::{NodeCountTermination, OrTermination, TimeTermination};

/// Parameters of one selection run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub goal: f64,
    pub branch_order: BranchOrder,
    pub time_limit: Option<Duration>,
    pub node_limit: Option<u64>,
    /// Whether to run the greedy baseline before the search.
    pub run_greedy: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            goal: featurebound_config::DEFAULT_GOAL,
            branch_order: BranchOrder::default(),
            time_limit: None,
            node_limit: None,
            run_greedy: true,
        }
    }
}

impl RunOptions {
    /// Builds options from the `[search]` and `[greedy]` config sections.
    pub fn from_config(config: &SelectionConfig) -> Self {
        Self {
            goal: config.search.goal,
            branch_order: config.search.branch_order.into(),
            time_limit: config.search.time_limit(),
            node_limit: config.search.node_limit,
            run_greedy: config.greedy.enabled,
        }
    }

    pub fn with_goal(mut self, goal: f64) -> Self {
        self.goal = goal;
        self
    }

    pub fn with_branch_order(mut self, order: BranchOrder) -> Self {
        self.branch_order = order;
        self
    }

    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn without_greedy(mut self) -> Self {
        self.run_greedy = false;
        self
    }
}

/// Results of [`run_selection`].
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub search: SearchOutcome,
    /// Greedy steps, empty when the baseline was disabled.
    pub greedy: Vec<GreedyStep>,
    pub metrics: ExecutionMetrics,
}

/// Runs the greedy baseline (if enabled) and then the exact search.
///
/// The evaluation counter is reset between the two, so the metrics
/// describe the branch-and-bound search alone.
///
/// # Example
///
/// ```
/// use featurebound_core::{FeatureUniverse, FitnessScore, FnEvaluator};
/// use featurebound_solver::{run_selection, RunOptions};
///
/// let universe = FeatureUniverse::new(["a", "b", "c"]).unwrap();
/// let eval = FnEvaluator::new(|f: &[String]| FitnessScore::of(f.len() as f64 / 3.0));
///
/// let outcome = run_selection(&universe, &eval, &RunOptions::default());
/// assert_eq!(outcome.search.best_feature_count(), Some(1));
/// assert_eq!(outcome.greedy.len(), 3);
/// assert_eq!(outcome.metrics.nodes_visited, 5);
/// ```
pub fn run_selection<E: Evaluator>(
    universe: &FeatureUniverse,
    evaluator: E,
    options: &RunOptions,
) -> RunOutcome {
    info!(
        event = "run_start",
        feature_count = universe.len(),
        goal = options.goal,
        greedy = options.run_greedy,
    );

    let mut director = ScoreDirector::new(evaluator);
    let greedy = if options.run_greedy {
        GreedyForwardPhase::new(universe).solve(&mut director)
    } else {
        Vec::new()
    };

    let termination = OrTermination::new((
        options.time_limit.map(TimeTermination::new),
        options.node_limit.map(NodeCountTermination::new),
    ));
    let search = BranchAndBoundPhase::new(universe.clone())
        .with_order(options.branch_order)
        .with_termination(termination)
        .solve(SearchScope::with_director(director, options.goal));

    let metrics = ExecutionMetrics::from_outcome(&search);
    info!(
        event = "run_end",
        nodes_visited = metrics.nodes_visited,
        solutions_found = metrics.solutions_found,
        elapsed_seconds = metrics.elapsed_seconds(),
        greedy_steps = greedy.len(),
    );

    RunOutcome {
        search,
        greedy,
        metrics,
    }
}
