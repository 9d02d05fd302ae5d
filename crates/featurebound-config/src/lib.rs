//! Configuration system for featurebound.
//!
//! Load a selection run's dataset, search, greedy-baseline and output
//! settings from TOML or YAML, without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use featurebound_config::{BranchOrderType, SelectionConfig};
//! use std::time::Duration;
//!
//! let config = SelectionConfig::from_toml_str(r#"
//!     [dataset]
//!     path = "wine_clean.csv"
//!     target = "quality"
//!
//!     [search]
//!     goal = 0.35
//!     branch_order = "include_first"
//!     time_limit_seconds = 30
//! "#).unwrap();
//!
//! assert_eq!(config.search.goal, 0.35);
//! assert_eq!(config.search.branch_order, BranchOrderType::IncludeFirst);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert!(config.greedy.enabled);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use featurebound_config::SelectionConfig;
//!
//! let config = SelectionConfig::load("featurebound.toml").unwrap_or_default();
//! assert_eq!(config.search.goal, 0.30);
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default goal (minimum R² a subset must reach to be feasible).
pub const DEFAULT_GOAL: f64 = 0.30;

/// Default target column.
pub const DEFAULT_TARGET: &str = "quality";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main selection run configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SelectionConfig {
    /// Training table location and column roles.
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Branch-and-bound search settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Greedy baseline settings.
    #[serde(default)]
    pub greedy: GreedyConfig,

    /// Artifact output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

impl SelectionConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, as YAML for `.yaml`/`.yml` and
    /// TOML otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, fails to parse, or is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot reject on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a non-finite goal, a zero
    /// limit, a blank target column or an empty artifact file name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.search.goal.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "search.goal must be finite, got {}",
                self.search.goal
            )));
        }
        if self.search.time_limit_seconds == Some(0) {
            return Err(ConfigError::Invalid(
                "search.time_limit_seconds must be positive".to_string(),
            ));
        }
        if self.search.node_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "search.node_limit must be positive".to_string(),
            ));
        }
        if self.dataset.target.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "dataset.target must name a column".to_string(),
            ));
        }
        for (key, name) in [
            ("output.tree_file", &self.output.tree_file),
            ("output.summary_file", &self.output.summary_file),
            ("output.comparison_file", &self.output.comparison_file),
        ] {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }

    /// Sets the dataset path.
    pub fn with_dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset.path = Some(path.into());
        self
    }

    /// Sets the goal.
    pub fn with_goal(mut self, goal: f64) -> Self {
        self.search.goal = goal;
        self
    }

    /// Sets the search time limit.
    pub fn with_time_limit_seconds(mut self, seconds: u64) -> Self {
        self.search.time_limit_seconds = Some(seconds);
        self
    }

    /// Returns the search time limit, if configured.
    ///
    /// Convenience method that delegates to `search.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.search.time_limit()
    }
}

/// Dataset configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DatasetConfig {
    /// Path to the cleaned CSV training table.
    pub path: Option<PathBuf>,

    /// Name of the target column.
    pub target: String,

    /// Columns that are neither target nor candidate feature.
    pub exclude: Vec<String>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: None,
            target: DEFAULT_TARGET.to_string(),
            exclude: vec!["Id".to_string()],
        }
    }
}

/// Branch-and-bound search configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SearchConfig {
    /// Minimum score a subset must reach to be feasible.
    pub goal: f64,

    /// Which child of a branching node is explored first.
    pub branch_order: BranchOrderType,

    /// Maximum seconds to spend in the search.
    pub time_limit_seconds: Option<u64>,

    /// Maximum number of tree nodes to create.
    pub node_limit: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            goal: DEFAULT_GOAL,
            branch_order: BranchOrderType::default(),
            time_limit_seconds: None,
            node_limit: None,
        }
    }
}

impl SearchConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_seconds.map(Duration::from_secs)
    }
}

/// Child exploration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchOrderType {
    /// Explore the subtree without the next feature first.
    #[default]
    ExcludeFirst,

    /// Explore the subtree with the next feature first.
    IncludeFirst,
}

/// Greedy baseline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GreedyConfig {
    /// Whether to run forward selection before the search.
    pub enabled: bool,
}

impl Default for GreedyConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Artifact output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct OutputConfig {
    /// Directory the artifacts are written to.
    pub directory: PathBuf,

    /// File name of the tree ledger.
    pub tree_file: String,

    /// File name of the run summary.
    pub summary_file: String,

    /// File name of the heuristic comparison.
    pub comparison_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            tree_file: "export_bnb_tree.json".to_string(),
            summary_file: "export_bnb_summary.json".to_string(),
            comparison_file: "export_heuristic_comparison.json".to_string(),
        }
    }
}
