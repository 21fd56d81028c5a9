// Placement constants
pub const PLACEMENT_COUNT: u32 = 5;
pub const PLACEMENT_MIN: f64 = 5.5;
pub const PLACEMENT_MAX: f64 = 6.5;
pub const PLACEMENT_SKIPS: u32 = 2;
/// Upper bound of the calibration bracket before any failure is recorded
pub const PLACEMENT_CEILING: f64 = 10.0;
// Target stepping during placements
pub const PASS_STEP: f64 = 0.8;
pub const RECOVERY_STEP: f64 = 0.3;
pub const RETRY_STEP: f64 = 0.3;
pub const FAIL_ONLY_OFFSET: f64 = 0.2;
// Near-target search
pub const NEAR_START_BAND: f64 = 0.1;
pub const NEAR_MAX_BAND: f64 = 0.5;
pub const NEAR_BAND_STEP: f64 = 0.05;
// Post-placement matchmaking
pub const MATCHMAKING_BAND: f64 = 0.33;
pub const BAND_FALLBACK_SIZE: usize = 20;
// Rating adjustment
pub const BASE_GAIN: f64 = 0.05;
pub const BASE_LOSS: f64 = 0.05;
pub const BONUS_SCALE: f64 = 0.30;
pub const RATING_FLOOR: f64 = 0.0;
// Skip cooldown post-placements
pub const SKIP_COOLDOWN: u32 = 3;
// Feedback submissions
pub const FEEDBACK_COOLDOWN_SECS: i64 = 60;
