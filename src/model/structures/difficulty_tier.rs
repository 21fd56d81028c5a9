use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Display tier for a difficulty value. Ordered from easiest to hardest,
/// with `Unknown` for values outside of (or between) the tier ranges.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
pub enum DifficultyTier {
    #[strum(to_string = "10th")]
    Tenth,
    #[strum(to_string = "α-")]
    AlphaMinus,
    #[strum(to_string = "α")]
    Alpha,
    #[strum(to_string = "β-")]
    BetaMinus,
    #[strum(to_string = "β")]
    Beta,
    #[strum(to_string = "β+")]
    BetaPlus,
    #[strum(to_string = "γ-")]
    GammaMinus,
    #[strum(to_string = "γ")]
    Gamma,
    #[strum(to_string = "γ+")]
    GammaPlus,
    #[strum(to_string = "δ--")]
    DeltaDoubleMinus,
    #[strum(to_string = "δ-")]
    DeltaMinus,
    #[strum(to_string = "δ")]
    Delta,
    #[strum(to_string = "δ+")]
    DeltaPlus,
    #[strum(to_string = "ε--")]
    EpsilonDoubleMinus,
    #[strum(to_string = "ε-")]
    EpsilonMinus,
    #[strum(to_string = "ε")]
    Epsilon,
    #[strum(to_string = "ε+")]
    EpsilonPlus,
    #[strum(to_string = "ζ--")]
    ZetaDoubleMinus,
    #[strum(to_string = "ζ-")]
    ZetaMinus,
    #[strum(to_string = "ζ")]
    Zeta,
    #[strum(to_string = "ζ+")]
    ZetaPlus,
    #[strum(to_string = "η--")]
    EtaDoubleMinus,
    #[strum(to_string = "η-")]
    EtaMinus,
    #[strum(to_string = "?")]
    Unknown
}

impl DifficultyTier {
    pub fn is_known(&self) -> bool {
        *self != DifficultyTier::Unknown
    }
}

#[cfg(test)]
mod tests {
    use crate::model::structures::difficulty_tier::DifficultyTier;
    use strum::IntoEnumIterator;

    #[test]
    fn test_symbols() {
        assert_eq!(DifficultyTier::Tenth.to_string(), "10th");
        assert_eq!(DifficultyTier::BetaPlus.to_string(), "β+");
        assert_eq!(DifficultyTier::EpsilonDoubleMinus.to_string(), "ε--");
        assert_eq!(DifficultyTier::Unknown.to_string(), "?");
    }

    #[test]
    fn test_enumerate() {
        let tiers = DifficultyTier::iter().collect::<Vec<_>>();

        assert_eq!(tiers.len(), 24);
        assert_eq!(tiers.first(), Some(&DifficultyTier::Tenth));
        assert_eq!(tiers.last(), Some(&DifficultyTier::Unknown));
        assert!(tiers.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_is_known() {
        assert!(DifficultyTier::Alpha.is_known());
        assert!(!DifficultyTier::Unknown.is_known());
    }
}
