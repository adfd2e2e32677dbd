//! Pipeline for encoding, filtering, and ranking the movie catalog.
//!
//! This crate provides:
//! - FeatureEncoder for multi-label encoding of genres and keywords
//! - Jaccard similarity over the encoded vectors
//! - Filter trait and FilterPipeline for dropping items before scoring
//! - SimilarityRanker, which ties the stages together
//!
//! ## Architecture
//! The pipeline processes one catalog snapshot per request:
//! 1. Filters remove unwanted items (already watched)
//! 2. FeatureEncoder fits per-request vocabularies and encodes items and profile
//! 3. Each item is scored against the profile and the list is sorted
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{RankOptions, SimilarityRanker};
//!
//! let ranker = SimilarityRanker::new();
//! let options = RankOptions { filter_watched: true, rank_by_popularity: true, limit: 10 };
//! let results = ranker.rank(catalog, &profile, Some(&context), options);
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod encoder;
pub mod similarity;
pub mod ranker;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use encoder::{EncodedCatalog, EncodedVector, FeatureEncoder, Vocabulary};
pub use similarity::jaccard;
pub use ranker::{RankOptions, RankedResult, SimilarityRanker};
