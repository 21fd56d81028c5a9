use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Which flow a presented map belongs to
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum MatchMode {
    #[strum(to_string = "Placement Match")]
    Placement,
    #[strum(to_string = "Ranked Match")]
    Ranked
}

#[cfg(test)]
mod tests {
    use crate::model::structures::match_mode::MatchMode;

    #[test]
    fn test_display() {
        assert_eq!(MatchMode::Placement.to_string(), "Placement Match");
        assert_eq!(MatchMode::Ranked.to_string(), "Ranked Match");
    }
}
