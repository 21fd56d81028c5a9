use crate::model::structures::difficulty_tier::{DifficultyTier, DifficultyTier::*};

/// Inclusive difficulty ranges for each tier, in ascending order.
/// Values between two ranges (e.g. 5.505) or past the last one are not covered.
pub const TIER_RANGES: [(f64, f64, DifficultyTier); 23] = [
    (5.0, 5.5, Tenth),
    (5.51, 5.75, AlphaMinus),
    (5.76, 6.0, Alpha),
    (6.01, 6.25, BetaMinus),
    (6.26, 6.5, Beta),
    (6.51, 6.75, BetaPlus),
    (6.76, 6.99, GammaMinus),
    (7.0, 7.25, Gamma),
    (7.26, 7.5, GammaPlus),
    (7.51, 7.75, DeltaDoubleMinus),
    (7.76, 7.99, DeltaMinus),
    (8.0, 8.25, Delta),
    (8.26, 8.5, DeltaPlus),
    (8.51, 8.75, EpsilonDoubleMinus),
    (8.76, 8.99, EpsilonMinus),
    (9.0, 9.25, Epsilon),
    (9.26, 9.5, EpsilonPlus),
    (9.51, 9.75, ZetaDoubleMinus),
    (9.76, 9.99, ZetaMinus),
    (10.0, 10.25, Zeta),
    (10.26, 10.5, ZetaPlus),
    (10.51, 10.75, EtaDoubleMinus),
    (10.76, 10.99, EtaMinus)
];

/// Maps a difficulty value onto its display tier, or [`DifficultyTier::Unknown`]
/// if no range contains it.
pub fn classify(value: f64) -> DifficultyTier {
    TIER_RANGES
        .iter()
        .find(|(lo, hi, _)| value >= *lo && value <= *hi)
        .map(|(_, _, tier)| *tier)
        .unwrap_or(Unknown)
}
