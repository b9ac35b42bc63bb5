//! Error types for graph construction and data loading

use thiserror::Error;

use crate::core::Axis;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("Row {row}: column `{column}` has non-numeric value {value:?}")]
    DataParse {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("CSV header is missing column `{0}`")]
    MissingColumn(&'static str),

    #[error("Axis {axis} has a constant value; cannot derive a scale")]
    DegenerateAxis { axis: Axis },

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Failed to load {path}: {reason}")]
    ResourceLoad { path: String, reason: String },

    #[error("CSV error: {0}")]
    Csv(String),
}

impl From<csv::Error> for GraphError {
    fn from(e: csv::Error) -> Self {
        GraphError::Csv(e.to_string())
    }
}
