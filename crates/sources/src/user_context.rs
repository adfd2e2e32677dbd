//! Helper functions to build UserContext from activity rows
//!
//! The engine fetches a user's activity once per request; the same rows feed
//! the interest profiler and this watched-set builder.

use crate::types::UserContext;
use data_loader::{ActivityRecord, UserId};

/// Build a UserContext for `user_id` from its activity rows.
///
/// Rows belonging to other users are ignored. A movie lands in the watched
/// set iff it was rated or liked.
pub fn build_user_context(user_id: UserId, activity: &[ActivityRecord]) -> UserContext {
    let mut context = UserContext::new(user_id);

    for record in activity.iter().filter(|r| r.user_id == user_id) {
        context.activity_count += 1;
        if record.is_watched() {
            context.watched_movies.insert(record.movie_id);
        }
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(user_id: UserId, movie_id: u32, rating: Option<f32>, liked: bool) -> ActivityRecord {
        ActivityRecord { user_id, movie_id, rating, liked }
    }

    #[test]
    fn test_build_user_context_basic() {
        let activity = vec![
            record(1, 10, Some(4.0), false),
            record(1, 11, None, true),
            record(1, 12, None, false),
        ];
        let context = build_user_context(1, &activity);

        assert_eq!(context.user_id, 1);
        assert_eq!(context.activity_count, 3);
        assert_eq!(context.watched_movies.len(), 2);
        assert!(context.has_watched(10));
        assert!(context.has_watched(11));
        assert!(!context.has_watched(12));
    }

    #[test]
    fn test_ignores_other_users() {
        let activity = vec![record(2, 10, Some(5.0), true)];
        let context = build_user_context(1, &activity);

        assert_eq!(context.activity_count, 0);
        assert!(context.watched_movies.is_empty());
    }
}
