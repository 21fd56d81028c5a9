//! Rating engine for a difficulty-annotated map pool.
//!
//! A player without a rating goes through a short placement run
//! ([`placement::PlacementSession`]); afterwards every ranked result nudges the
//! rating through [`rating_utils::update_rating`]. [`engine::PlacementEngine`]
//! ties both flows to map selection.
pub mod classifier;
pub mod constants;
pub mod engine;
pub mod error;
pub mod map_selection;
pub mod placement;
pub mod rating_utils;
pub mod structures;

pub use engine::{match_mode, PlacementEngine, Resolution, SkipOutcome};
pub use error::EngineError;
