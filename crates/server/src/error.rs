//! Error taxonomy for the engine entry points.
//!
//! Store failures never leave the engine as raw [`DataLoadError`]s; they are
//! wrapped in [`EngineError::StoreUnavailable`] at the entry-point boundary.

use data_loader::{DataLoadError, UserId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// The user has no history the profiler can use
    #[error("No activity found for user {user_id}")]
    NoActivity { user_id: UserId },

    /// A title query matched no catalog entry
    #[error("No movie title matches {query:?}")]
    NotFound { query: String },

    /// Opening the store or running a query failed; not retried here
    #[error("Movie store unavailable: {0}")]
    StoreUnavailable(#[source] DataLoadError),

    /// Malformed identifiers or request parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<DataLoadError> for EngineError {
    fn from(err: DataLoadError) -> Self {
        EngineError::StoreUnavailable(err)
    }
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
