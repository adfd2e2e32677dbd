//! Server crate for the movie recommendation engine.
//!
//! This crate contains the engine that coordinates the store, the profile
//! sources, and the ranking pipeline, plus the error kinds callers match on.

pub mod config;
pub mod engine;
pub mod error;

pub use config::RecommendConfig;
pub use engine::{parse_user_id, RecommendationEngine};
pub use error::{EngineError, EngineResult};
pub use pipeline::RankedResult;
pub use sources::InterestProfile;
