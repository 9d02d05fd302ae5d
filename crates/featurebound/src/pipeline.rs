//! Config-driven selection: load, search, export.

use featurebound_config::{ConfigError, SelectionConfig};
use featurebound_data::{DataError, LinearRegressionEvaluator, TrainingTable};
use featurebound_export::{ExportReport, ResultExporter};
use featurebound_solver::{run_selection, RunOptions, RunOutcome};
use thiserror::Error;
use tracing::info;

/// Errors that stop a run before the search starts.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("no dataset path configured (set dataset.path or pass --data)")]
    MissingDataset,
}

/// A finished config-driven run.
#[derive(Debug)]
pub struct SelectionRun {
    pub run: RunOutcome,
    /// Per-artifact export results; export failures do not fail the run.
    pub report: ExportReport,
    pub row_count: usize,
    pub feature_count: usize,
}

/// Loads the `[dataset]` table.
pub fn load_table(config: &SelectionConfig) -> Result<TrainingTable, PipelineError> {
    let path = config
        .dataset
        .path
        .as_ref()
        .ok_or(PipelineError::MissingDataset)?;
    let table = TrainingTable::from_csv_path(path, &config.dataset.target, &config.dataset.exclude)?;
    Ok(table)
}

/// Loads the dataset, runs greedy and branch-and-bound, and exports the
/// three artifacts.
pub fn select_features(config: &SelectionConfig) -> Result<SelectionRun, PipelineError> {
    config.validate()?;
    let table = load_table(config)?;
    let row_count = table.row_count();
    let universe = table.universe().clone();

    let evaluator = LinearRegressionEvaluator::new(table);
    let run = run_selection(&universe, &evaluator, &RunOptions::from_config(config));

    let report = ResultExporter::from_config(&config.output).export_all(&run);
    info!(
        event = "pipeline_end",
        exported = report.written().count() as u64,
        failed = report.failures().count() as u64,
    );

    Ok(SelectionRun {
        run,
        report,
        row_count,
        feature_count: universe.len(),
    })
}
