//! Serialized artifact records.
//!
//! Field names are fixed by the dashboard that reads these files.

use featurebound_core::{GreedyStep, Solution};
use featurebound_solver::{ExecutionMetrics, Node, SearchOutcome};
use serde::{Deserialize, Serialize};

/// One node of `export_bnb_tree.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNodeRecord {
    pub id: u64,
    pub parent_id: i64,
    pub decision: String,
    pub features: Vec<String>,
    pub feature_count: u32,
    /// `null` for pruned nodes and for the worst-score sentinel.
    pub score: Option<f64>,
    pub status: String,
}

impl From<&Node> for TreeNodeRecord {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id(),
            parent_id: node.parent_id(),
            decision: node.decision().to_string(),
            features: node.features().to_vec(),
            feature_count: node.feature_count(),
            score: node.score().and_then(|s| s.finite()),
            status: node.status().as_str().to_string(),
        }
    }
}

/// The optimal subset, or `{}` when no subset reached the goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FinalSolution {
    Found {
        features: Vec<String>,
        feature_count: u32,
        r2_score: f64,
    },
    Empty {},
}

impl FinalSolution {
    pub fn is_found(&self) -> bool {
        matches!(self, FinalSolution::Found { .. })
    }
}

impl From<Option<&Solution>> for FinalSolution {
    fn from(solution: Option<&Solution>) -> Self {
        match solution {
            Some(s) => FinalSolution::Found {
                features: s.features.clone(),
                feature_count: s.feature_count(),
                r2_score: s.score.value(),
            },
            None => FinalSolution::Empty {},
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionMetricsRecord {
    pub total_time_seconds: f64,
    pub nodes_visited: u64,
    pub solutions_found_count: u64,
    pub r2_goal: f64,
}

impl From<&ExecutionMetrics> for ExecutionMetricsRecord {
    fn from(metrics: &ExecutionMetrics) -> Self {
        Self {
            total_time_seconds: metrics.elapsed_seconds(),
            nodes_visited: metrics.nodes_visited,
            solutions_found_count: metrics.solutions_found,
            r2_goal: metrics.goal,
        }
    }
}

/// A feasible solution in discovery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub features: Vec<String>,
    pub feature_count: u32,
    pub score: f64,
}

impl From<&Solution> for TimelineEntry {
    fn from(solution: &Solution) -> Self {
        Self {
            features: solution.features.clone(),
            feature_count: solution.feature_count(),
            score: solution.score.value(),
        }
    }
}

/// Contents of `export_bnb_summary.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub final_solution: FinalSolution,
    pub execution_metrics: ExecutionMetricsRecord,
    pub solutions_timeline: Vec<TimelineEntry>,
}

impl RunSummary {
    pub fn new(outcome: &SearchOutcome, metrics: &ExecutionMetrics) -> Self {
        Self {
            final_solution: outcome.final_solution.as_ref().into(),
            execution_metrics: metrics.into(),
            solutions_timeline: outcome.timeline.iter().map(TimelineEntry::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreedyStepRecord {
    pub feature_count: u32,
    /// `null` if the step's score is the worst-score sentinel.
    pub r2_score: Option<f64>,
    pub features: Vec<String>,
}

impl From<&GreedyStep> for GreedyStepRecord {
    fn from(step: &GreedyStep) -> Self {
        Self {
            feature_count: step.feature_count(),
            r2_score: step.score.finite(),
            features: step.features.clone(),
        }
    }
}

/// Contents of `export_heuristic_comparison.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicComparison {
    pub bnb_optimal: FinalSolution,
    pub greedy_heuristic_steps: Vec<GreedyStepRecord>,
}

impl HeuristicComparison {
    pub fn new(outcome: &SearchOutcome, greedy: &[GreedyStep]) -> Self {
        Self {
            bnb_optimal: outcome.final_solution.as_ref().into(),
            greedy_heuristic_steps: greedy.iter().map(GreedyStepRecord::from).collect(),
        }
    }
}
