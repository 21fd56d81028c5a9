use crate::{config::EngineConfig, model::constants::RATING_FLOOR};

/// Rounds to 2 decimal places, halves away from zero
pub fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// How close `played_difficulty` is to the rating, scaled to `[0, 1]` where
/// 1 means at least one matchmaking band away.
fn proximity_scale(current_rating: f64, played_difficulty: f64, band: f64) -> f64 {
    let delta = played_difficulty - current_rating;

    (delta.abs() / band).min(1.0)
}

/// # Ranked rating update
///
/// Passing grants `base_gain`, multiplied by up to `1 + bonus_scale` the further the
/// map was from the current rating. Failing costs `base_loss`; the penalty is only
/// amplified when the failed map was below the current rating.
///
/// The result is floored at 0 and rounded to 2 decimal places.
pub fn update_rating(current_rating: f64, played_difficulty: f64, passed: bool, config: &EngineConfig) -> f64 {
    let scale = proximity_scale(current_rating, played_difficulty, config.matchmaking_band);
    let bonus_multiplier = 1.0 + config.bonus_scale * scale;

    let new_rating = if passed {
        current_rating + config.base_gain * bonus_multiplier
    } else {
        let loss_multiplier = if played_difficulty < current_rating {
            bonus_multiplier
        } else {
            1.0
        };

        current_rating - config.base_loss * loss_multiplier
    };

    round_2dp(new_rating).max(RATING_FLOOR)
}
