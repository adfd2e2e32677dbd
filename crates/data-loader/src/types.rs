//! Core domain types for the movie catalog and user activity.
//!
//! These are the row shapes the store collaborator hands to the engine.
//! They are built once per request and never mutated afterwards.

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie in the catalog
pub type MovieId = u32;

// =============================================================================
// Label normalization
// =============================================================================

/// Split a raw comma-separated label string into normalized labels.
///
/// Each token is trimmed and lower-cased; empty tokens are dropped.
/// Order (and duplicates) of the input are kept.
///
/// Example: `" Action, Sci-Fi ,,"` -> `["action", "sci-fi"]`
pub fn split_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Re-normalize labels that may not have gone through [`split_labels`] yet.
///
/// Labels still containing commas are split into several labels.
pub fn normalize_labels<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    labels
        .iter()
        .flat_map(|label| split_labels(label.as_ref()))
        .collect()
}

// =============================================================================
// Catalog
// =============================================================================

/// One movie in the catalog snapshot.
///
/// `genres` and `keywords` hold normalized labels (see [`split_labels`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: MovieId,
    pub title: String,
    pub genres: Vec<String>,
    pub keywords: Vec<String>,
    /// Precomputed by the store; only used as a secondary ranking key
    pub popularity_score: f32,
}

impl CatalogItem {
    /// Build an item from the raw column values the store returns.
    pub fn from_raw(
        id: MovieId,
        title: impl Into<String>,
        genres: &str,
        keywords: &str,
        popularity_score: f32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            genres: split_labels(genres),
            keywords: split_labels(keywords),
            popularity_score,
        }
    }
}

// =============================================================================
// Activity
// =============================================================================

/// A user's interaction with one movie.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// `None` when the user liked the movie without rating it
    pub rating: Option<f32>,
    pub liked: bool,
}

impl ActivityRecord {
    /// A movie counts as watched once it was rated or liked.
    pub fn is_watched(&self) -> bool {
        self.liked || self.rating.is_some()
    }
}
