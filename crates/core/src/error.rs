//! Error types for the pricing analytics pipeline.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the pricing analytics pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// Input bytes could not be decoded or parsed under any attempted
    /// encoding or format.
    #[error("file read error: {0}")]
    FileRead(String),

    /// One or more required canonical columns unresolved after alias mapping.
    #[error("missing required column(s) {missing:?}; searched aliases: {searched:?}")]
    Schema {
        /// Canonical field names that did not resolve.
        missing: Vec<String>,
        /// Every column name that was accepted during the search.
        searched: Vec<String>,
    },

    /// The working set became empty, leaving nothing to aggregate.
    #[error("no rows left after {stage}")]
    EmptyResult {
        /// The pipeline stage that emptied the set.
        stage: String,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding/decoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a file read error.
    pub fn file_read(msg: impl Into<String>) -> Self {
        Error::FileRead(msg.into())
    }

    /// Create a schema error from the unresolved fields and the searched names.
    pub fn schema(missing: Vec<String>, searched: Vec<String>) -> Self {
        Error::Schema { missing, searched }
    }

    /// Create an empty result error for the given stage.
    pub fn empty_result(stage: impl Into<String>) -> Self {
        Error::EmptyResult { stage: stage.into() }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Whether this is the non-fatal empty-working-set condition.
    ///
    /// The session layer treats it as a warning: the run produced no output,
    /// but the user may loosen filters and trigger another run.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Error::EmptyResult { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_detection() {
        let err = Error::empty_result("revenue threshold filter");
        assert!(err.is_empty_result());
        assert!(!Error::config("bad").is_empty_result());
    }

    #[test]
    fn test_schema_error_names_missing_fields() {
        let err = Error::schema(
            vec!["unit_price".to_string()],
            vec!["price".to_string(), "Price".to_string()],
        );
        let msg = err.to_string();
        assert!(msg.contains("unit_price"));
        assert!(msg.contains("Price"));
    }
}
