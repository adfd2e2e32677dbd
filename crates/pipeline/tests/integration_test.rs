//! Integration tests for the pipeline.
//!
//! These tests verify that profiling, filtering, encoding, and ranking work
//! together on a small but realistic catalog.

use data_loader::{ActivityRecord, CatalogItem, MemoryStore, MovieId, MovieStore};
use pipeline::{RankOptions, SimilarityRanker};
use sources::{user_context::build_user_context, InterestProfile, InterestProfiler};

fn create_test_store() -> MemoryStore {
    let mut store = MemoryStore::new();

    store.insert_movie(CatalogItem::from_raw(1, "Die Hard", "Action,Thriller", "hostage,skyscraper", 80.0));
    store.insert_movie(CatalogItem::from_raw(2, "Love Actually", "Comedy,Romance", "christmas,london", 60.0));
    store.insert_movie(CatalogItem::from_raw(3, "Speed", "Action,Thriller", "bus,bomb", 70.0));
    store.insert_movie(CatalogItem::from_raw(4, "The Rock", "Action,Thriller", "hostage,alcatraz", 65.0));
    store.insert_movie(CatalogItem::from_raw(5, "Notting Hill", "Comedy,Romance", "london,bookshop", 55.0));
    store.insert_movie(CatalogItem::from_raw(6, "Unlabelled Short", "", "", 1.0));

    // User 1 loves action, is lukewarm on romcoms
    store.insert_activity(ActivityRecord { user_id: 1, movie_id: 1, rating: Some(5.0), liked: true });
    store.insert_activity(ActivityRecord { user_id: 1, movie_id: 2, rating: Some(2.0), liked: false });
    store.insert_activity(ActivityRecord { user_id: 1, movie_id: 5, rating: Some(3.0), liked: false });

    store
}

fn ids(results: &[pipeline::RankedResult]) -> Vec<MovieId> {
    results.iter().map(|r| r.movie_id).collect()
}

#[test]
fn test_user_recommendations_end_to_end() {
    let store = create_test_store();
    let catalog = store.fetch_catalog().unwrap();
    let activity = store.fetch_activity(1).unwrap();

    let context = build_user_context(1, &activity);
    let profile = InterestProfiler::default()
        .build_profile(1, &activity, &catalog)
        .unwrap();
    assert_eq!(profile.genres, vec!["action", "thriller"]);
    assert_eq!(profile.keywords, vec!["hostage", "skyscraper"]);

    let options = RankOptions { filter_watched: true, rank_by_popularity: true, limit: 10 };
    let results = SimilarityRanker::new().rank(catalog, &profile, Some(&context), options);

    // Watched movies never come back
    for watched in [1, 2, 5] {
        assert!(!ids(&results).contains(&watched));
    }
    // The Rock shares a keyword with Die Hard, Speed only shares genres
    assert_eq!(ids(&results), vec![4, 3, 6]);
    assert!(results.windows(2).all(|w| w[0].similarity >= w[1].similarity));
}

#[test]
fn test_ranking_is_repeatable() {
    let store = create_test_store();
    let profile = InterestProfile::new(&["comedy"], &["london"]);
    let ranker = SimilarityRanker::new();
    let options = RankOptions::default();

    let first = ranker.rank(store.fetch_catalog().unwrap(), &profile, None, options);
    let second = ranker.rank(store.fetch_catalog().unwrap(), &profile, None, options);

    assert_eq!(first, second);
}

#[test]
fn test_similarities_are_bounded() {
    let store = create_test_store();
    let catalog = store.fetch_catalog().unwrap();
    let profile = InterestProfile::from_item(&catalog[0]);

    let results = SimilarityRanker::new().rank(catalog, &profile, None, RankOptions::default());

    assert_eq!(results[0].movie_id, 1);
    assert_eq!(results[0].similarity, 1.0);
    assert!(results.iter().all(|r| (0.0..=1.0).contains(&r.similarity)));
    assert_eq!(results.iter().filter(|r| r.similarity == 1.0).count(), 1);
}
