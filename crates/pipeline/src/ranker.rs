//! Similarity ranking of the catalog against an interest profile.
//!
//! ## Algorithm
//! 1. Optionally drop items the user already watched
//! 2. Encode the remaining catalog and the profile against shared vocabularies
//! 3. Score every item with Jaccard similarity
//! 4. Stable sort by similarity (then popularity, when asked), truncate

use crate::encoder::FeatureEncoder;
use crate::filter_pipeline::FilterPipeline;
use crate::filters::AlreadyWatchedFilter;
use crate::similarity::jaccard;
use data_loader::{CatalogItem, MovieId};
use serde::Serialize;
use sources::{InterestProfile, UserContext};
use std::cmp::Ordering;
use tracing::debug;

/// One scored catalog item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub movie_id: MovieId,
    pub title: String,
    /// Jaccard similarity to the profile, in [0, 1]
    pub similarity: f32,
    pub popularity_score: f32,
}

/// Per-request ranking switches.
#[derive(Debug, Clone, Copy)]
pub struct RankOptions {
    /// Drop items in the user's watched set (needs a user context)
    pub filter_watched: bool,
    /// Use popularity as the secondary sort key
    pub rank_by_popularity: bool,
    pub limit: usize,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            filter_watched: false,
            rank_by_popularity: false,
            limit: 10,
        }
    }
}

/// Scores, filters, orders, and truncates a catalog snapshot.
pub struct SimilarityRanker {
    encoder: FeatureEncoder,
    watched_filters: FilterPipeline,
}

impl SimilarityRanker {
    pub fn new() -> Self {
        Self {
            encoder: FeatureEncoder::new(),
            watched_filters: FilterPipeline::new().add_filter(AlreadyWatchedFilter),
        }
    }

    /// Rank `catalog` against `profile`.
    ///
    /// `context` is `None` in title-similarity mode; watched filtering is
    /// then skipped even if requested. Items with equal keys keep their
    /// catalog order.
    pub fn rank(
        &self,
        catalog: Vec<CatalogItem>,
        profile: &InterestProfile,
        context: Option<&UserContext>,
        options: RankOptions,
    ) -> Vec<RankedResult> {
        let catalog = match context {
            Some(context) if options.filter_watched => self.watched_filters.apply(catalog, context),
            _ => catalog,
        };

        if profile.is_empty() {
            debug!("Ranking against an empty profile; every similarity will be 0");
        }

        let encoded = self.encoder.encode(profile, &catalog);
        debug!(
            "Encoded {} items into {} columns ({} genres, {} keywords)",
            encoded.items.len(),
            encoded.width(),
            encoded.genres.len(),
            encoded.keywords.len()
        );

        let mut results: Vec<RankedResult> = catalog
            .into_iter()
            .zip(&encoded.items)
            .map(|(item, vector)| RankedResult {
                movie_id: item.id,
                similarity: jaccard(vector, &encoded.profile),
                popularity_score: item.popularity_score,
                title: item.title,
            })
            .collect();

        // sort_by is stable
        results.sort_by(|a, b| compare(a, b, options.rank_by_popularity));
        results.truncate(options.limit);
        results
    }
}

impl Default for SimilarityRanker {
    fn default() -> Self {
        Self::new()
    }
}

/// Descending similarity, then descending popularity when enabled.
fn compare(a: &RankedResult, b: &RankedResult, rank_by_popularity: bool) -> Ordering {
    let by_similarity = b.similarity.total_cmp(&a.similarity);
    if rank_by_popularity {
        by_similarity.then_with(|| b.popularity_score.total_cmp(&a.popularity_score))
    } else {
        by_similarity
    }
}
