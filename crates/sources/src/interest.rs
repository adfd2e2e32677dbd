//! Interest profiling from a user's rating/like history.
//!
//! ## Algorithm
//! 1. Join the user's activity rows with the catalog (rows for unknown movies drop out)
//! 2. Min-max normalize ratings across the user's own rows
//! 3. `final_score = rating_weight * normalized_rating + like_weight * liked`
//! 4. Keep the best `ceil(n / top_fraction)` rows (at least one)
//! 5. Count genre and keyword labels over the kept rows and take the most frequent

use crate::types::InterestProfile;
use data_loader::{normalize_labels, ActivityRecord, CatalogItem, MovieId, UserId};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Tuning knobs for the profiler.
#[derive(Debug, Clone)]
pub struct ProfilerConfig {
    pub rating_weight: f32,
    pub like_weight: f32,
    /// Keep the top `1 / top_fraction` of scored rows
    pub top_fraction: usize,
    pub max_genres: usize,
    pub max_keywords: usize,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            rating_weight: 0.75,
            like_weight: 0.25,
            top_fraction: 3,
            max_genres: 6,
            max_keywords: 10,
        }
    }
}

/// A joined activity row with its computed affinity.
#[derive(Debug, Clone)]
struct ScoredActivity<'a> {
    item: &'a CatalogItem,
    final_score: f32,
}

/// Derives an [`InterestProfile`] from activity rows.
#[derive(Debug, Clone, Default)]
pub struct InterestProfiler {
    config: ProfilerConfig,
}

impl InterestProfiler {
    pub fn new(config: ProfilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Build the profile for `user_id`.
    ///
    /// Returns `None` when the user has no activity rows that join with the
    /// catalog.
    pub fn build_profile(
        &self,
        user_id: UserId,
        activity: &[ActivityRecord],
        catalog: &[CatalogItem],
    ) -> Option<InterestProfile> {
        let by_id: HashMap<MovieId, &CatalogItem> =
            catalog.iter().map(|item| (item.id, item)).collect();

        let joined: Vec<(&ActivityRecord, &CatalogItem)> = activity
            .iter()
            .filter(|record| record.user_id == user_id)
            .filter_map(|record| match by_id.get(&record.movie_id) {
                Some(item) => Some((record, *item)),
                None => {
                    warn!(
                        "Skipping activity for user {}: movie {} is not in the catalog",
                        user_id, record.movie_id
                    );
                    None
                }
            })
            .collect();

        if joined.is_empty() {
            debug!("No usable activity for user {}", user_id);
            return None;
        }

        let mut scored = self.score(&joined);
        // Stable: equal scores keep the store's row order
        scored.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));

        let keep = top_count(scored.len(), self.config.top_fraction);
        scored.truncate(keep);
        debug!(
            "Kept {} of {} activity rows for user {}",
            keep,
            joined.len(),
            user_id
        );

        let genre_lists: Vec<Vec<String>> = scored
            .iter()
            .map(|s| normalize_labels(&s.item.genres))
            .collect();
        let keyword_lists: Vec<Vec<String>> = scored
            .iter()
            .map(|s| normalize_labels(&s.item.keywords))
            .collect();

        Some(InterestProfile {
            genres: most_frequent(&genre_lists, self.config.max_genres),
            keywords: most_frequent(&keyword_lists, self.config.max_keywords),
        })
    }

    /// Weighted affinity per joined row.
    fn score<'a>(&self, joined: &[(&ActivityRecord, &'a CatalogItem)]) -> Vec<ScoredActivity<'a>> {
        let normalized = normalize_ratings(joined.iter().map(|(record, _)| record.rating));

        joined
            .iter()
            .zip(normalized)
            .map(|((record, item), normalized_rating)| {
                let like_weight = if record.liked { 1.0 } else { 0.0 };
                ScoredActivity {
                    item: *item,
                    final_score: self.config.rating_weight * normalized_rating
                        + self.config.like_weight * like_weight,
                }
            })
            .collect()
    }
}

/// Min-max normalize ratings into [0, 1].
///
/// Absent and non-finite ratings take no part in min/max and map to 0. When
/// every usable rating is equal the range is empty and all values map to 0.
fn normalize_ratings(ratings: impl Iterator<Item = Option<f32>> + Clone) -> Vec<f32> {
    let (min, max) = ratings
        .clone()
        .flatten()
        .filter(|r| r.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), r| {
            (lo.min(r), hi.max(r))
        });
    let range = max - min;

    ratings
        .map(|rating| match rating {
            Some(r) if r.is_finite() && range > 0.0 => (r - min) / range,
            _ => 0.0,
        })
        .collect()
}

/// `ceil(total / fraction)`, never below one.
fn top_count(total: usize, fraction: usize) -> usize {
    total.div_ceil(fraction.max(1)).max(1)
}

/// The `n` most frequent labels, ties broken by first occurrence.
fn most_frequent(lists: &[Vec<String>], n: usize) -> Vec<String> {
    // (label, count) in first-seen order
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for label in lists.iter().flatten() {
        let pos = *positions.entry(label.as_str()).or_insert_with(|| {
            counts.push((label.as_str(), 0));
            counts.len() - 1
        });
        counts[pos].1 += 1;
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(n)
        .map(|(label, _)| label.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MovieId, genres: &str, keywords: &str) -> CatalogItem {
        CatalogItem::from_raw(id, format!("Movie {}", id), genres, keywords, 0.0)
    }

    fn record(movie_id: MovieId, rating: Option<f32>, liked: bool) -> ActivityRecord {
        ActivityRecord { user_id: 1, movie_id, rating, liked }
    }

    #[test]
    fn test_top_third_keeps_best_movie() {
        let catalog = vec![movie(1, "Action,Drama", "hero"), movie(2, "Comedy", "joke")];
        let activity = vec![record(1, Some(5.0), true), record(2, Some(1.0), false)];

        let profile = InterestProfiler::default()
            .build_profile(1, &activity, &catalog)
            .unwrap();

        assert_eq!(profile.genres, vec!["action", "drama"]);
        assert_eq!(profile.keywords, vec!["hero"]);
    }

    #[test]
    fn test_no_activity() {
        let catalog = vec![movie(1, "Action", "")];
        let profiler = InterestProfiler::default();

        assert!(profiler.build_profile(1, &[], &catalog).is_none());
        // Activity for movies outside the catalog does not count
        assert!(profiler.build_profile(1, &[record(99, Some(5.0), true)], &catalog).is_none());
    }

    #[test]
    fn test_single_record_is_kept() {
        let catalog = vec![movie(1, "Horror", "ghost")];
        let profile = InterestProfiler::default()
            .build_profile(1, &[record(1, None, false)], &catalog)
            .unwrap();

        assert_eq!(profile.genres, vec!["horror"]);
    }

    #[test]
    fn test_normalize_ratings() {
        let normalized = normalize_ratings(vec![Some(1.0), Some(3.0), None, Some(5.0)].into_iter());
        assert_eq!(normalized, vec![0.0, 0.5, 0.0, 1.0]);

        // Equal ratings must not divide by zero
        let flat = normalize_ratings(vec![Some(4.0), Some(4.0)].into_iter());
        assert_eq!(flat, vec![0.0, 0.0]);

        let absent = normalize_ratings(vec![None, None].into_iter());
        assert_eq!(absent, vec![0.0, 0.0]);
    }

    #[test]
    fn test_normalize_ratings_ignores_non_finite() {
        let normalized = normalize_ratings(
            vec![Some(f32::NAN), Some(5.0), Some(f32::INFINITY), Some(1.0), Some(f32::NEG_INFINITY)]
                .into_iter(),
        );
        assert_eq!(normalized, vec![0.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_garbage_rating_does_not_win_profile() {
        let catalog = vec![
            movie(1, "Horror", "ghost"),
            movie(2, "Action", "car"),
            movie(3, "Drama", "family"),
        ];
        for garbage in [f32::NAN, f32::INFINITY] {
            let activity = vec![
                record(1, Some(garbage), false),
                record(2, Some(5.0), true),
                record(3, Some(1.0), false),
            ];

            let profile = InterestProfiler::default()
                .build_profile(1, &activity, &catalog)
                .unwrap();

            assert_eq!(profile.genres, vec!["action"]);
            assert_eq!(profile.keywords, vec!["car"]);
        }
    }

    #[test]
    fn test_top_count() {
        assert_eq!(top_count(1, 3), 1);
        assert_eq!(top_count(2, 3), 1);
        assert_eq!(top_count(3, 3), 1);
        assert_eq!(top_count(4, 3), 2);
        assert_eq!(top_count(9, 3), 3);
        assert_eq!(top_count(10, 3), 4);
    }

    #[test]
    fn test_most_frequent_ties_keep_first_seen() {
        let lists = vec![
            vec!["drama".to_string(), "war".to_string()],
            vec!["comedy".to_string(), "war".to_string()],
            vec!["drama".to_string()],
        ];
        // drama: 2, war: 2, comedy: 1; drama was seen first
        assert_eq!(most_frequent(&lists, 2), vec!["drama", "war"]);
        assert_eq!(most_frequent(&lists, 10), vec!["drama", "war", "comedy"]);
    }

    #[test]
    fn test_profile_caps_label_counts() {
        let genres = "a,b,c,d,e,f,g,h";
        let keywords = "k1,k2,k3,k4,k5,k6,k7,k8,k9,k10,k11,k12";
        let catalog = vec![movie(1, genres, keywords)];

        let profile = InterestProfiler::default()
            .build_profile(1, &[record(1, Some(3.0), true)], &catalog)
            .unwrap();

        assert_eq!(profile.genres.len(), 6);
        assert_eq!(profile.keywords.len(), 10);
        assert_eq!(profile.genres[0], "a");
    }

    #[test]
    fn test_liked_breaks_rating_ties() {
        let catalog = vec![
            movie(1, "Western", ""),
            movie(2, "Musical", ""),
            movie(3, "Musical", ""),
        ];
        // Same rating everywhere, only movie 2 liked -> it is the single kept row
        let activity = vec![
            record(1, Some(3.0), false),
            record(2, Some(3.0), true),
            record(3, Some(3.0), false),
        ];

        let profile = InterestProfiler::default()
            .build_profile(1, &activity, &catalog)
            .unwrap();
        assert_eq!(profile.genres, vec!["musical"]);
    }
}
