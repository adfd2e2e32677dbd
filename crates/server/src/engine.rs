//! # Recommendation Engine
//!
//! This module coordinates one recommendation request end to end:
//! 1. Open a store session
//! 2. Fetch the catalog (and the user's activity on the user path)
//! 3. Build the interest profile, or resolve the title query
//! 4. Filter, encode, score, and rank the catalog
//! 5. Return the top titles
//!
//! Every call opens its own session and shares no mutable state with other
//! calls, so independent requests can run on separate threads.

use std::time::Instant;

use tracing::{debug, info};

use data_loader::{CatalogItem, StoreConnector, UserId};
use pipeline::{RankOptions, RankedResult, SimilarityRanker};
use sources::{title, user_context::build_user_context, InterestProfile, InterestProfiler};

use crate::config::RecommendConfig;
use crate::error::{EngineError, EngineResult};

/// Parse a textual user id, as received from a CLI or an HTTP layer.
pub fn parse_user_id(raw: &str) -> EngineResult<UserId> {
    raw.trim()
        .parse()
        .map_err(|_| EngineError::InvalidInput(format!("user id must be a non-negative integer, got {:?}", raw)))
}

/// Main entry point for recommendations
pub struct RecommendationEngine<C: StoreConnector> {
    connector: C,
    config: RecommendConfig,
    profiler: InterestProfiler,
    ranker: SimilarityRanker,
}

impl<C: StoreConnector> RecommendationEngine<C> {
    /// Create an engine with default tuning
    pub fn new(connector: C) -> Self {
        Self::with_config(connector, RecommendConfig::default())
    }

    pub fn with_config(connector: C, config: RecommendConfig) -> Self {
        let profiler = InterestProfiler::new(config.profiler.clone());
        Self {
            connector,
            config,
            profiler,
            ranker: SimilarityRanker::new(),
        }
    }

    pub fn config(&self) -> &RecommendConfig {
        &self.config
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Titles recommended for `user_id`, best first.
    pub fn recommend_for(
        &self,
        user_id: UserId,
        limit: usize,
        filter_watched: bool,
    ) -> EngineResult<Vec<String>> {
        Ok(titles(self.recommend_for_scored(user_id, limit, filter_watched)?))
    }

    /// Like [`Self::recommend_for`], keeping the scores.
    pub fn recommend_for_scored(
        &self,
        user_id: UserId,
        limit: usize,
        filter_watched: bool,
    ) -> EngineResult<Vec<RankedResult>> {
        let start_time = Instant::now();
        let limit = self.resolve_limit(limit)?;

        let store = self.connector.connect()?;
        let catalog = store.fetch_catalog()?;
        let activity = store.fetch_activity(user_id)?;
        drop(store);
        debug!(
            "Fetched {} catalog rows and {} activity rows for user {}",
            catalog.len(),
            activity.len(),
            user_id
        );

        let profile = self
            .profiler
            .build_profile(user_id, &activity, &catalog)
            .ok_or(EngineError::NoActivity { user_id })?;
        debug!(
            "Interest profile for user {}: genres={:?} keywords={:?}",
            user_id, profile.genres, profile.keywords
        );

        let context = build_user_context(user_id, &activity);
        let options = RankOptions {
            filter_watched,
            rank_by_popularity: self.config.rank_by_popularity,
            limit,
        };
        let results = self.ranker.rank(catalog, &profile, Some(&context), options);

        info!(
            "Recommended {} movies for user {} in {:.2?}",
            results.len(),
            user_id,
            start_time.elapsed()
        );
        Ok(results)
    }

    /// Titles similar to the first catalog movie matching `title_query`.
    pub fn recommend_similar_to(&self, title_query: &str, limit: usize) -> EngineResult<Vec<String>> {
        Ok(titles(self.recommend_similar_to_scored(title_query, limit)?))
    }

    /// Like [`Self::recommend_similar_to`], keeping the scores.
    pub fn recommend_similar_to_scored(
        &self,
        title_query: &str,
        limit: usize,
    ) -> EngineResult<Vec<RankedResult>> {
        let start_time = Instant::now();
        let limit = self.resolve_limit(limit)?;
        let query = validate_query(title_query)?;

        let store = self.connector.connect()?;
        let catalog = store.fetch_catalog()?;
        drop(store);

        // Resolve against the same snapshot that gets ranked
        let (item, profile) =
            title::lookup_title_in(&catalog, query).ok_or_else(|| EngineError::NotFound {
                query: query.to_string(),
            })?;
        debug!("Ranking {} catalog rows against {:?}", catalog.len(), item.title);

        let options = RankOptions {
            filter_watched: false,
            rank_by_popularity: self.config.rank_by_popularity,
            limit,
        };
        let results = self.ranker.rank(catalog, &profile, None, options);

        info!(
            "Found {} movies similar to {:?} in {:.2?}",
            results.len(),
            item.title,
            start_time.elapsed()
        );
        Ok(results)
    }

    /// The interest profile the user path would rank against.
    pub fn interest_profile(&self, user_id: UserId) -> EngineResult<InterestProfile> {
        let store = self.connector.connect()?;
        let catalog = store.fetch_catalog()?;
        let activity = store.fetch_activity(user_id)?;
        drop(store);

        self.profiler
            .build_profile(user_id, &activity, &catalog)
            .ok_or(EngineError::NoActivity { user_id })
    }

    /// The catalog movie a title query resolves to, with its profile.
    pub fn lookup_title(&self, title_query: &str) -> EngineResult<(CatalogItem, InterestProfile)> {
        let query = validate_query(title_query)?;
        let store = self.connector.connect()?;
        title::lookup_title(&*store, query)?.ok_or_else(|| EngineError::NotFound {
            query: query.to_string(),
        })
    }

    /// Reject a zero limit, clamp anything above `max_limit`.
    fn resolve_limit(&self, limit: usize) -> EngineResult<usize> {
        if limit == 0 {
            return Err(EngineError::InvalidInput("limit must be at least 1".to_string()));
        }
        if limit > self.config.max_limit {
            debug!("Clamping limit {} to {}", limit, self.config.max_limit);
        }
        Ok(limit.min(self.config.max_limit))
    }
}

fn validate_query(title_query: &str) -> EngineResult<&str> {
    let query = title_query.trim();
    if query.is_empty() {
        return Err(EngineError::InvalidInput("title query is empty".to_string()));
    }
    Ok(query)
}

fn titles(results: Vec<RankedResult>) -> Vec<String> {
    results.into_iter().map(|r| r.title).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::MemoryStore;

    fn engine() -> RecommendationEngine<MemoryStore> {
        let store = MemoryStore::new()
            .with_movie(CatalogItem::from_raw(1, "Heat", "Action,Crime", "heist", 8.0));
        RecommendationEngine::new(store)
    }

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id(" 42 ").unwrap(), 42);
        assert!(matches!(parse_user_id("abc"), Err(EngineError::InvalidInput(_))));
        assert!(matches!(parse_user_id("-1"), Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn test_resolve_limit() {
        let engine = engine();
        assert_eq!(engine.resolve_limit(10).unwrap(), 10);
        assert_eq!(engine.resolve_limit(500).unwrap(), 50);
        assert!(matches!(engine.resolve_limit(0), Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn test_empty_title_query_is_invalid() {
        let engine = engine();
        assert!(matches!(
            engine.recommend_similar_to("   ", 10),
            Err(EngineError::InvalidInput(_))
        ));
    }
}
