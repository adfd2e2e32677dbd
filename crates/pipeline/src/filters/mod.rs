//! Filter implementations for the catalog pipeline.
//!
//! This module contains the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod already_watched;

// Re-export for convenience
pub use already_watched::AlreadyWatchedFilter;
