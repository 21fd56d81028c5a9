use crate::config::EngineConfig;
use serde::{Deserialize, Serialize};

/// Durable per-player state. Created without a rating; the rating is
/// committed once placements finish and adjusted after every ranked map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub has_rating: bool,
    pub rating: Option<f64>,
    /// Ranked maps resolved since the last skip, saturating at the cooldown
    #[serde(rename = "post_skip_counter")]
    pub skip_cooldown_counter: u32
}

impl PlayerState {
    pub fn new(config: &EngineConfig) -> PlayerState {
        PlayerState {
            has_rating: false,
            rating: None,
            skip_cooldown_counter: config.skip_cooldown
        }
    }

    /// The rating ranked selection should use. Falls back to the middle of
    /// the placement range if a rating was never committed.
    pub fn effective_rating(&self, config: &EngineConfig) -> f64 {
        self.rating.unwrap_or_else(|| config.placement_midpoint())
    }

    pub fn can_skip(&self, config: &EngineConfig) -> bool {
        self.skip_cooldown_counter >= config.skip_cooldown
    }

    /// Number of ranked maps left before a skip becomes available
    pub fn maps_until_skip(&self, config: &EngineConfig) -> u32 {
        config.skip_cooldown.saturating_sub(self.skip_cooldown_counter)
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        PlayerState::new(&EngineConfig::default())
    }
}
