//! Title lookup: the "movies similar to X" entry path.
//!
//! Resolves a free-text title query to one catalog item and hands its labels
//! on as the profile to rank against.

use crate::types::InterestProfile;
use data_loader::{find_title, CatalogItem, MovieStore, Result};
use tracing::debug;

/// Find the catalog item matching `query` and the profile built from it.
///
/// Matching is a case-insensitive substring search delegated to the store,
/// which picks the lowest movie id among several matches. `Ok(None)` means
/// nothing matched.
pub fn lookup_title(
    store: &dyn MovieStore,
    query: &str,
) -> Result<Option<(CatalogItem, InterestProfile)>> {
    let Some(item) = store.search_title(query.trim())? else {
        debug!("No catalog title matches {:?}", query);
        return Ok(None);
    };

    debug!("Title query {:?} resolved to movie {} ({})", query, item.id, item.title);
    let profile = InterestProfile::from_item(&item);
    Ok(Some((item, profile)))
}

/// Like [`lookup_title`], searching a catalog snapshot already in hand.
pub fn lookup_title_in(
    catalog: &[CatalogItem],
    query: &str,
) -> Option<(CatalogItem, InterestProfile)> {
    let Some(item) = find_title(catalog, query.trim()) else {
        debug!("No catalog title matches {:?}", query);
        return None;
    };

    debug!("Title query {:?} resolved to movie {} ({})", query, item.id, item.title);
    Some((item.clone(), InterestProfile::from_item(item)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::MemoryStore;

    fn create_test_store() -> MemoryStore {
        MemoryStore::new()
            .with_movie(CatalogItem::from_raw(2, "Blade Runner", "Sci-Fi,Drama", "android, rain", 8.0))
            .with_movie(CatalogItem::from_raw(1, "Blade Runner 2049", "Sci-Fi", "android", 7.5))
    }

    #[test]
    fn test_lookup_title_found() {
        let store = create_test_store();
        let (item, profile) = lookup_title(&store, "  blade runner ").unwrap().unwrap();

        // Lowest id wins among multiple matches
        assert_eq!(item.id, 1);
        assert_eq!(profile.genres, vec!["sci-fi"]);
        assert_eq!(profile.keywords, vec!["android"]);
    }

    #[test]
    fn test_lookup_title_not_found() {
        let store = create_test_store();
        assert!(lookup_title(&store, "matrix").unwrap().is_none());
    }

    #[test]
    fn test_lookup_in_snapshot_matches_store() {
        let store = create_test_store();
        let catalog = store.fetch_catalog().unwrap();

        let (item, profile) = lookup_title_in(&catalog, "BLADE runner").unwrap();
        assert_eq!(item.id, 1);
        assert_eq!(Some((item, profile)), lookup_title(&store, "BLADE runner").unwrap());
        assert!(lookup_title_in(&catalog, "matrix").is_none());
    }
}
