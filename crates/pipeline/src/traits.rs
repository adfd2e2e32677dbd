//! Core traits for the filtering stage.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to the catalog before scoring.

use data_loader::CatalogItem;
use sources::UserContext;

/// Core trait for removing catalog items before they are scored.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` lets one ranker serve requests on several threads
/// - Filters take ownership of the Vec<CatalogItem> and return a filtered Vec
/// - Filters must keep the relative order of the items they keep
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to the catalog.
    ///
    /// # Arguments
    /// * `items` - The catalog items to filter (takes ownership)
    /// * `context` - The requesting user's watched set and history size
    fn apply(&self, items: Vec<CatalogItem>, context: &UserContext) -> Vec<CatalogItem>;
}
