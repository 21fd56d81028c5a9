use serde::{Deserialize, Serialize};

/// One resolved map during placements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementAttempt {
    pub played_difficulty: f64,
    pub passed: bool
}
