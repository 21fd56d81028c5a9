use crate::model::{classifier::classify, structures::difficulty_tier::DifficultyTier};
use serde::{Deserialize, Serialize};

/// A single playable entry of the map pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapRecord {
    pub name: String,
    /// May be empty for maps made by the pool curator
    pub mapper: String,
    pub variant_name: String,
    pub difficulty: f64,
    pub url: String,
    pub image: Option<String>
}

impl MapRecord {
    pub fn tier(&self) -> DifficultyTier {
        classify(self.difficulty)
    }

    /// Absolute distance between this map's difficulty and `target`
    pub fn distance_to(&self, target: f64) -> f64 {
        (self.difficulty - target).abs()
    }

    /// Whether both records describe the same beatmap, regardless of source row
    pub fn same_beatmap(&self, other: &MapRecord) -> bool {
        self.name == other.name && self.mapper == other.mapper
    }

    pub fn title(&self) -> String {
        format!(
            "{} — {} ({:.2} {}) by {}",
            self.name,
            self.variant_name,
            self.difficulty,
            self.tier(),
            self.mapper
        )
    }
}
