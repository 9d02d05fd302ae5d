//! Featurebound - minimum feature subsets by branch and bound
//!
//! Finds the smallest set of features whose regression fit meets a goal,
//! compares it with a greedy forward-selection baseline, and exports the
//! full search tree for auditing.
//!
//! # Example
//!
//! ```rust
//! use featurebound::prelude::*;
//!
//! let universe = FeatureUniverse::new(["a", "b", "c"]).unwrap();
//! let eval = FnEvaluator::new(|f: &[String]| FitnessScore::of(f.len() as f64 / 3.0));
//!
//! let outcome = run_selection(&universe, &eval, &RunOptions::default());
//! assert_eq!(outcome.search.best_feature_count(), Some(1));
//! ```

pub use featurebound_config::{
    BranchOrderType, ConfigError, DatasetConfig, GreedyConfig, OutputConfig, SearchConfig,
    SelectionConfig,
};
pub use featurebound_core::{
    Evaluator, FeatureBoundError, FeatureUniverse, FitnessScore, FnEvaluator, GreedyStep, Solution,
};
pub use featurebound_data::{DataError, LinearRegressionEvaluator, TrainingTable};
pub use featurebound_export::{Artifact, ExportError, ExportReport, ResultExporter};
pub use featurebound_solver::{
    run_selection, BranchAndBoundPhase, BranchOrder, ExecutionMetrics, GreedyForwardPhase, Node,
    NodeStatus, RunOptions, RunOutcome, SearchOutcome, SearchScope,
};

/// Search termination conditions.
pub use featurebound_solver::termination;

#[cfg(feature = "console")]
pub use featurebound_console as console;

mod pipeline;
pub use pipeline::{load_table, select_features, PipelineError, SelectionRun};

pub mod prelude {
    pub use super::{
        run_selection, select_features, BranchOrder, Evaluator, FeatureUniverse, FitnessScore,
        FnEvaluator, LinearRegressionEvaluator, NodeStatus, ResultExporter, RunOptions,
        SelectionConfig, TrainingTable,
    };
}
