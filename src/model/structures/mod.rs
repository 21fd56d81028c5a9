pub mod difficulty_tier;
pub mod map_record;
pub mod match_mode;
pub mod placement_attempt;
pub mod player_state;
