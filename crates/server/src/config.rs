//! Tuning for the recommendation engine.

use sources::ProfilerConfig;

/// Engine-wide settings; every field has a usable default.
#[derive(Debug, Clone)]
pub struct RecommendConfig {
    /// Limit used by callers that do not pick one
    pub default_limit: usize,
    /// Requests above this are clamped
    pub max_limit: usize,
    /// Break similarity ties by the store's popularity score
    pub rank_by_popularity: bool,
    pub profiler: ProfilerConfig,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 50,
            rank_by_popularity: true,
            profiler: ProfilerConfig::default(),
        }
    }
}

impl RecommendConfig {
    pub fn with_rank_by_popularity(mut self, enabled: bool) -> Self {
        self.rank_by_popularity = enabled;
        self
    }

    pub fn with_max_limit(mut self, max_limit: usize) -> Self {
        self.max_limit = max_limit;
        self
    }
}
