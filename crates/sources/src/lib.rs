//! # Sources Crate
//!
//! This crate produces the interest profile a recommendation is ranked
//! against. There are two ways to get one:
//!
//! ### Interest Profiler (user path)
//! Learns taste from the user's own history:
//! - Scores each rated/liked movie from its normalized rating and like flag
//! - Keeps the top third of those movies
//! - Ranks their genres and keywords by frequency
//!
//! ### Title Lookup (similar-movie path)
//! Resolves a title query to one catalog movie and uses its labels as-is.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{InterestProfiler, title::lookup_title, user_context::build_user_context};
//!
//! let store = connector.connect()?;
//! let catalog = store.fetch_catalog()?;
//! let activity = store.fetch_activity(user_id)?;
//!
//! let context = build_user_context(user_id, &activity);
//! let profile = InterestProfiler::default().build_profile(user_id, &activity, &catalog);
//!
//! let similar = lookup_title(store.as_ref(), "heat")?;
//! ```

// Public modules
pub mod types;
pub mod user_context;
pub mod interest;
pub mod title;

// Re-export commonly used types
pub use types::{InterestProfile, UserContext};
pub use interest::{InterestProfiler, ProfilerConfig};
