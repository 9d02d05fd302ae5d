//! Writes the three run artifacts to disk.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use featurebound_config::OutputConfig;
use featurebound_core::GreedyStep;
use featurebound_solver::{ExecutionMetrics, RunOutcome, SearchOutcome};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ExportError;
use crate::schema::{HeuristicComparison, RunSummary, TreeNodeRecord};

/// The artifacts a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    Tree,
    Summary,
    Comparison,
}

impl Artifact {
    pub const ALL: [Artifact; 3] = [Artifact::Tree, Artifact::Summary, Artifact::Comparison];

    /// Returns the file name used when none is configured.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Artifact::Tree => "export_bnb_tree.json",
            Artifact::Summary => "export_bnb_summary.json",
            Artifact::Comparison => "export_heuristic_comparison.json",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Artifact::Tree => write!(f, "tree"),
            Artifact::Summary => write!(f, "summary"),
            Artifact::Comparison => write!(f, "comparison"),
        }
    }
}

/// Per-artifact outcome of [`ResultExporter::export_all`].
#[derive(Debug, Default)]
pub struct ExportReport {
    results: Vec<(Artifact, Result<PathBuf, ExportError>)>,
}

impl ExportReport {
    /// Returns true if every artifact was written.
    pub fn is_success(&self) -> bool {
        self.results.iter().all(|(_, r)| r.is_ok())
    }

    /// Returns the paths that were written.
    pub fn written(&self) -> impl Iterator<Item = (Artifact, &Path)> {
        self.results
            .iter()
            .filter_map(|(a, r)| r.as_ref().ok().map(|p| (*a, p.as_path())))
    }

    /// Returns the artifacts that failed.
    pub fn failures(&self) -> impl Iterator<Item = (Artifact, &ExportError)> {
        self.results
            .iter()
            .filter_map(|(a, r)| r.as_ref().err().map(|e| (*a, e)))
    }

    /// Returns the outcome for one artifact.
    pub fn get(&self, artifact: Artifact) -> Option<&Result<PathBuf, ExportError>> {
        self.results
            .iter()
            .find(|(a, _)| *a == artifact)
            .map(|(_, r)| r)
    }
}

/// Serializes run outcomes into the dashboard's JSON files.
///
/// # Example
///
/// ```
/// use featurebound_export::{Artifact, ResultExporter};
///
/// let exporter = ResultExporter::new("out");
/// assert!(exporter.path_for(Artifact::Tree).ends_with("export_bnb_tree.json"));
/// ```
#[derive(Debug, Clone)]
pub struct ResultExporter {
    directory: PathBuf,
    tree_file: String,
    summary_file: String,
    comparison_file: String,
}

impl ResultExporter {
    /// Creates an exporter writing default file names into `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            tree_file: Artifact::Tree.default_file_name().to_string(),
            summary_file: Artifact::Summary.default_file_name().to_string(),
            comparison_file: Artifact::Comparison.default_file_name().to_string(),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            directory: config.directory.clone(),
            tree_file: config.tree_file.clone(),
            summary_file: config.summary_file.clone(),
            comparison_file: config.comparison_file.clone(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Returns where `artifact` is written.
    pub fn path_for(&self, artifact: Artifact) -> PathBuf {
        let file = match artifact {
            Artifact::Tree => &self.tree_file,
            Artifact::Summary => &self.summary_file,
            Artifact::Comparison => &self.comparison_file,
        };
        self.directory.join(file)
    }

    /// Writes the search tree.
    pub fn export_tree(&self, outcome: &SearchOutcome) -> Result<PathBuf, ExportError> {
        let records: Vec<TreeNodeRecord> = outcome.nodes.iter().map(TreeNodeRecord::from).collect();
        self.write(Artifact::Tree, &records)
    }

    /// Writes the final solution, metrics and solution timeline.
    pub fn export_summary(
        &self,
        outcome: &SearchOutcome,
        metrics: &ExecutionMetrics,
    ) -> Result<PathBuf, ExportError> {
        self.write(Artifact::Summary, &RunSummary::new(outcome, metrics))
    }

    /// Writes the optimal solution next to the greedy steps.
    pub fn export_comparison(
        &self,
        outcome: &SearchOutcome,
        greedy: &[GreedyStep],
    ) -> Result<PathBuf, ExportError> {
        self.write(Artifact::Comparison, &HeuristicComparison::new(outcome, greedy))
    }

    /// Attempts all three artifacts; a failure never stops the others.
    pub fn export_all(&self, run: &RunOutcome) -> ExportReport {
        let results = Artifact::ALL
            .iter()
            .map(|&artifact| {
                let result = match artifact {
                    Artifact::Tree => self.export_tree(&run.search),
                    Artifact::Summary => self.export_summary(&run.search, &run.metrics),
                    Artifact::Comparison => self.export_comparison(&run.search, &run.greedy),
                };
                if let Err(err) = &result {
                    warn!(event = "export", artifact = %artifact, error = %err);
                }
                (artifact, result)
            })
            .collect();
        ExportReport { results }
    }

    fn write<T: Serialize>(&self, artifact: Artifact, value: &T) -> Result<PathBuf, ExportError> {
        let path = self.path_for(artifact);
        let json = serde_json::to_string_pretty(value).map_err(|source| ExportError::Json {
            path: path.clone(),
            source,
        })?;
        fs::create_dir_all(&self.directory)
            .and_then(|()| fs::write(&path, json))
            .map_err(|source| ExportError::Io {
                path: path.clone(),
                source,
            })?;
        info!(event = "export", artifact = %artifact, path = %path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests;
