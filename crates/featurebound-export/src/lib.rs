//! JSON artifacts of a featurebound run.
//!
//! A run produces three documents, consumed by the results dashboard:
//! - the search tree ([`TreeNodeRecord`] array)
//! - the run summary ([`RunSummary`])
//! - the greedy comparison ([`HeuristicComparison`])
//!
//! Export is pure serialization. A failed artifact never affects the
//! others or the in-memory outcome.

pub mod error;
pub mod exporter;
pub mod schema;

pub use error::ExportError;
pub use exporter::{Artifact, ExportReport, ResultExporter};
pub use schema::{
    ExecutionMetricsRecord, FinalSolution, GreedyStepRecord, HeuristicComparison, RunSummary,
    TimelineEntry, TreeNodeRecord,
};
