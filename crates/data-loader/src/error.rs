//! Error types for the data-loader crate.
//!
//! Every failure the store collaborator can produce ends up in
//! [`DataLoadError`]. Callers above this crate treat all of them as
//! "the store is unavailable" and decide themselves whether to retry.

use thiserror::Error;

/// Errors that can occur while opening a store or reading rows from it
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Store location (directory or data file) could not be found
    #[error("Failed to open store location: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading a data file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in a data file couldn't be parsed
    ///
    /// Carries enough context to point at the offending row.
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
