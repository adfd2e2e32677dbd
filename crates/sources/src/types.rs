//! Types shared by the profile sources.

use data_loader::{normalize_labels, CatalogItem, MovieId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ranked genre/keyword labels summarizing what to recommend against.
///
/// Built by [`crate::InterestProfiler`] from a user's history, or by
/// [`crate::title::lookup_title`] from one catalog item. Labels are normalized
/// and immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestProfile {
    pub genres: Vec<String>,
    pub keywords: Vec<String>,
}

impl InterestProfile {
    /// Create a profile, normalizing both label lists.
    pub fn new<S: AsRef<str>>(genres: &[S], keywords: &[S]) -> Self {
        Self {
            genres: normalize_labels(genres),
            keywords: normalize_labels(keywords),
        }
    }

    /// Profile carrying exactly one item's labels.
    pub fn from_item(item: &CatalogItem) -> Self {
        Self::new(&item.genres, &item.keywords)
    }

    /// True when both label lists are empty.
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty() && self.keywords.is_empty()
    }
}

/// What the engine knows about the requesting user for this call.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user_id: UserId,
    /// Movies the user rated or liked; O(1) lookups for filtering
    pub watched_movies: HashSet<MovieId>,
    /// Number of activity rows the user has, watched or not
    pub activity_count: usize,
}

impl UserContext {
    /// Create a new UserContext with no history
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            watched_movies: HashSet::new(),
            activity_count: 0,
        }
    }

    /// Whether the user has already watched a movie
    pub fn has_watched(&self, movie_id: MovieId) -> bool {
        self.watched_movies.contains(&movie_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_item() {
        let item = CatalogItem {
            id: 1,
            title: "Heat".to_string(),
            genres: vec!["Action".to_string(), "Crime ".to_string()],
            keywords: vec!["heist, robbery".to_string()],
            popularity_score: 1.0,
        };

        let profile = InterestProfile::from_item(&item);
        assert_eq!(profile.genres, vec!["action", "crime"]);
        assert_eq!(profile.keywords, vec!["heist", "robbery"]);
        assert!(!profile.is_empty());
    }

    #[test]
    fn test_empty_profile() {
        let profile = InterestProfile::default();
        assert!(profile.is_empty());
    }

    #[test]
    fn test_user_context_watched() {
        let mut context = UserContext::new(1);
        context.watched_movies.insert(42);

        assert!(context.has_watched(42));
        assert!(!context.has_watched(7));
    }
}
