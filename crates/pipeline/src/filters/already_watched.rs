//! Filter to remove movies the user has already watched.
//!
//! A movie is watched once the user rated or liked it. Only applied when the
//! caller asks for it and a user is known.

use crate::traits::Filter;
use data_loader::CatalogItem;
use sources::UserContext;

/// Removes catalog items in the user's watched set.
///
/// ## Algorithm
/// Uses the HashSet in UserContext.watched_movies for O(1) lookups.
pub struct AlreadyWatchedFilter;

impl Filter for AlreadyWatchedFilter {
    fn name(&self) -> &str {
        "AlreadyWatchedFilter"
    }

    fn apply(&self, items: Vec<CatalogItem>, context: &UserContext) -> Vec<CatalogItem> {
        items
            .into_iter()
            .filter(|item| !context.has_watched(item.id))
            .collect()
    }
}
