//! Featurebound Data - training table and concrete subset evaluator
//!
//! - [`TrainingTable`]: a numeric CSV table with one designated target column
//!   and every remaining (non-excluded) column as a candidate feature
//! - [`LinearRegressionEvaluator`]: ordinary least squares with intercept,
//!   scored as in-sample R²

mod error;
mod regression;
mod table;

pub use error::DataError;
pub use regression::LinearRegressionEvaluator;
pub use table::TrainingTable;
