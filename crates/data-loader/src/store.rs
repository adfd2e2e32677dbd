//! Store collaborator interface and its implementations.
//!
//! The engine never talks to storage directly. It is handed a
//! [`StoreConnector`], opens one session per request with
//! [`StoreConnector::connect`], runs its queries through [`MovieStore`], and
//! drops the session before returning. Dropping closes whatever the session
//! holds, on success and error paths alike.
//!
//! Two implementations ship with the crate:
//! - [`FileStore`]: a directory holding `movies.dat` and `activity.dat`
//! - [`MemoryStore`]: insertion-ordered rows held in memory

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Queries the engine runs against the store.
pub trait MovieStore {
    /// All catalog rows, in the store's natural order.
    fn fetch_catalog(&self) -> Result<Vec<CatalogItem>>;

    /// All activity rows for one user, in the store's natural order.
    fn fetch_activity(&self, user_id: UserId) -> Result<Vec<ActivityRecord>>;

    /// The catalog row with the lowest id whose title contains `query`
    /// (case-insensitive), or `None`.
    fn search_title(&self, query: &str) -> Result<Option<CatalogItem>>;

    /// Ids of movies the user rated or liked.
    fn fetch_watched(&self, user_id: UserId) -> Result<HashSet<MovieId>> {
        Ok(self
            .fetch_activity(user_id)?
            .iter()
            .filter(|record| record.is_watched())
            .map(|record| record.movie_id)
            .collect())
    }
}

/// Opens scoped store sessions.
///
/// Implementations must be cheap to share across threads so independent
/// requests can run in parallel, each with its own session.
pub trait StoreConnector: Send + Sync {
    fn connect(&self) -> Result<Box<dyn MovieStore + '_>>;
}

/// The lowest-id item whose title contains `query`, ignoring case.
///
/// Shared by the store implementations and by callers that already hold a
/// catalog snapshot.
pub fn find_title<'a>(
    catalog: impl IntoIterator<Item = &'a CatalogItem>,
    query: &str,
) -> Option<&'a CatalogItem> {
    let needle = query.to_lowercase();
    catalog
        .into_iter()
        .filter(|item| item.title.to_lowercase().contains(&needle))
        .min_by_key(|item| item.id)
}

// =============================================================================
// FileStore
// =============================================================================

/// Connector for a directory-backed store.
#[derive(Debug, Clone)]
pub struct FileStoreConnector {
    data_dir: PathBuf,
}

impl FileStoreConnector {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl StoreConnector for FileStoreConnector {
    fn connect(&self) -> Result<Box<dyn MovieStore + '_>> {
        Ok(Box::new(FileStore::open(&self.data_dir)?))
    }
}

/// One session against a directory of `.dat` files.
///
/// Every query re-reads its file, so a session always sees the data as it is
/// on disk at query time.
#[derive(Debug)]
pub struct FileStore {
    movies_path: PathBuf,
    activity_path: PathBuf,
}

impl FileStore {
    /// Open a session, failing if the directory or either data file is missing.
    pub fn open(data_dir: &Path) -> Result<Self> {
        if !data_dir.is_dir() {
            return Err(DataLoadError::FileNotFound {
                path: data_dir.display().to_string(),
            });
        }
        let movies_path = data_dir.join("movies.dat");
        let activity_path = data_dir.join("activity.dat");
        for path in [&movies_path, &activity_path] {
            if !path.is_file() {
                return Err(DataLoadError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
        }
        debug!("Opened file store at {:?}", data_dir);
        Ok(Self {
            movies_path,
            activity_path,
        })
    }
}

impl Drop for FileStore {
    fn drop(&mut self) {
        debug!("Closed file store session for {:?}", self.movies_path.parent());
    }
}

impl MovieStore for FileStore {
    fn fetch_catalog(&self) -> Result<Vec<CatalogItem>> {
        parser::parse_movies(&self.movies_path)
    }

    fn fetch_activity(&self, user_id: UserId) -> Result<Vec<ActivityRecord>> {
        let records = parser::parse_activity(&self.activity_path)?;
        Ok(records
            .into_iter()
            .filter(|record| record.user_id == user_id)
            .collect())
    }

    fn search_title(&self, query: &str) -> Result<Option<CatalogItem>> {
        let catalog = self.fetch_catalog()?;
        Ok(find_title(&catalog, query).cloned())
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory store; rows keep the order they were inserted in.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    movies: Vec<CatalogItem>,
    activity: Vec<ActivityRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_movie(&mut self, movie: CatalogItem) {
        self.movies.push(movie);
    }

    pub fn insert_activity(&mut self, record: ActivityRecord) {
        self.activity.push(record);
    }

    /// Builder-style variant of [`MemoryStore::insert_movie`].
    pub fn with_movie(mut self, movie: CatalogItem) -> Self {
        self.insert_movie(movie);
        self
    }

    /// Builder-style variant of [`MemoryStore::insert_activity`].
    pub fn with_activity(mut self, record: ActivityRecord) -> Self {
        self.insert_activity(record);
        self
    }

    /// Get counts for debugging/validation
    pub fn counts(&self) -> (usize, usize) {
        (self.movies.len(), self.activity.len())
    }
}

impl MovieStore for MemoryStore {
    fn fetch_catalog(&self) -> Result<Vec<CatalogItem>> {
        Ok(self.movies.clone())
    }

    fn fetch_activity(&self, user_id: UserId) -> Result<Vec<ActivityRecord>> {
        Ok(self
            .activity
            .iter()
            .filter(|record| record.user_id == user_id)
            .copied()
            .collect())
    }

    fn search_title(&self, query: &str) -> Result<Option<CatalogItem>> {
        Ok(find_title(&self.movies, query).cloned())
    }
}

impl StoreConnector for MemoryStore {
    fn connect(&self) -> Result<Box<dyn MovieStore + '_>> {
        Ok(Box::new(self))
    }
}

impl<S: MovieStore + ?Sized> MovieStore for &S {
    fn fetch_catalog(&self) -> Result<Vec<CatalogItem>> {
        (**self).fetch_catalog()
    }

    fn fetch_activity(&self, user_id: UserId) -> Result<Vec<ActivityRecord>> {
        (**self).fetch_activity(user_id)
    }

    fn search_title(&self, query: &str) -> Result<Option<CatalogItem>> {
        (**self).search_title(query)
    }

    fn fetch_watched(&self, user_id: UserId) -> Result<HashSet<MovieId>> {
        (**self).fetch_watched(user_id)
    }
}
