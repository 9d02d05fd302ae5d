//! CLI command implementations.

pub(crate) mod inspect;
pub(crate) mod run;

use featurebound::{ConfigError, DataError, PipelineError};
use std::error::Error;
use std::fmt;

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<DataError> for CliError {
    fn from(e: DataError) -> Self {
        Self::new(format!("failed to load dataset: {e}"))
    }
}

impl From<PipelineError> for CliError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::Config(e) => e.into(),
            PipelineError::Data(e) => e.into(),
            PipelineError::MissingDataset => Self::new(e.to_string()),
        }
    }
}
