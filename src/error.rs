//! Error types for Virtual Businessman

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for Virtual Businessman
#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("Invalid date input '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("Transient fetch error from {source_name}: {message}")]
    TransientFetch { source_name: String, message: String },

    #[error("No data for {date} from {source_name}")]
    NoDataForDate { source_name: String, date: NaiveDate },

    #[error("{dataset} unavailable for {requested} after {attempts} attempts")]
    DataUnavailable {
        dataset: String,
        requested: NaiveDate,
        attempts: usize,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl InsightsError {
    /// A source answered but had nothing for the date asked.
    pub fn is_no_data(&self) -> bool {
        matches!(self, InsightsError::NoDataForDate { .. })
    }

    /// Network, timeout or format failure worth handing to the next source.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            InsightsError::TransientFetch { .. } | InsightsError::ParseError(_)
        )
    }
}

/// Result type alias for Virtual Businessman operations
pub type Result<T> = std::result::Result<T, InsightsError>;
