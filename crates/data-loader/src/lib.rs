//! # Data Loader Crate
//!
//! This crate is the boundary to the movie store: the catalog of movies and
//! the per-user activity log the recommendation engine reads from.
//!
//! ## Main Components
//!
//! - **types**: Row types (CatalogItem, ActivityRecord) and label normalization
//! - **parser**: Parse the flat `.dat` files into those rows
//! - **store**: The `MovieStore`/`StoreConnector` traits plus file and memory stores
//! - **error**: Error types for store access
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{FileStoreConnector, StoreConnector};
//!
//! let connector = FileStoreConnector::new("data/moviehub");
//! let store = connector.connect()?;
//!
//! let catalog = store.fetch_catalog()?;
//! let watched = store.fetch_watched(1)?;
//! println!("{} movies, user 1 watched {}", catalog.len(), watched.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod store;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    UserId,
    MovieId,
    // Core types
    CatalogItem,
    ActivityRecord,
    // Helpers
    normalize_labels,
    split_labels,
};
pub use store::{find_title, FileStore, FileStoreConnector, MemoryStore, MovieStore, StoreConnector};
