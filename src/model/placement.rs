use crate::{
    config::EngineConfig,
    model::{
        constants::{FAIL_ONLY_OFFSET, NEAR_BAND_STEP, NEAR_MAX_BAND, NEAR_START_BAND, PASS_STEP, RECOVERY_STEP, RETRY_STEP},
        error::EngineError,
        map_selection::{nearest, select_near},
        rating_utils::round_2dp,
        structures::{map_record::MapRecord, placement_attempt::PlacementAttempt}
    }
};
use rand::Rng;
use tracing::{debug, warn};
use uuid::Uuid;

/// # Placement calibration
///
/// A fixed number of attempts used to estimate a new player's rating. Each attempt
/// targets a difficulty derived from the evidence so far:
///
/// - With no evidence, a seed drawn from the placement range is used.
/// - After a pass, the target climbs by [`PASS_STEP`], or by the finer
///     [`RECOVERY_STEP`] if the attempt before it was a fail.
/// - After a fail, the target drops back to just above the best pass
///     ([`RETRY_STEP`]), or to the lower bound if nothing has been passed.
///
/// Targets never exceed the upper bound, which is the easiest failure on record.
#[derive(Debug, Clone)]
pub struct PlacementSession {
    id: Uuid,
    initial_attempts: u32,
    remaining_attempts: u32,
    skips_left: u32,
    low_bound: f64,
    high_bound: f64,
    max_success_difficulty: Option<f64>,
    min_fail_difficulty: Option<f64>,
    history: Vec<PlacementAttempt>,
    placement_min: f64,
    placement_max: f64,
    seed_target: f64
}

impl PlacementSession {
    pub fn new<R: Rng + ?Sized>(config: &EngineConfig, rng: &mut R) -> PlacementSession {
        PlacementSession {
            id: Uuid::new_v4(),
            initial_attempts: config.placement_count,
            remaining_attempts: config.placement_count,
            skips_left: config.placement_skips,
            low_bound: config.placement_min,
            high_bound: config.placement_ceiling,
            max_success_difficulty: None,
            min_fail_difficulty: None,
            history: Vec::with_capacity(config.placement_count as usize),
            placement_min: config.placement_min,
            placement_max: config.placement_max,
            seed_target: Self::draw_seed(config.placement_min, config.placement_max, rng)
        }
    }

    fn draw_seed<R: Rng + ?Sized>(min: f64, max: f64, rng: &mut R) -> f64 {
        round_2dp(rng.random_range(min..=max))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn remaining_attempts(&self) -> u32 {
        self.remaining_attempts
    }

    pub fn skips_left(&self) -> u32 {
        self.skips_left
    }

    pub fn low_bound(&self) -> f64 {
        self.low_bound
    }

    pub fn high_bound(&self) -> f64 {
        self.high_bound
    }

    pub fn max_success_difficulty(&self) -> Option<f64> {
        self.max_success_difficulty
    }

    pub fn min_fail_difficulty(&self) -> Option<f64> {
        self.min_fail_difficulty
    }

    /// Resolved attempts in the order they were played
    pub fn history(&self) -> &[PlacementAttempt] {
        &self.history
    }

    pub fn is_terminal(&self) -> bool {
        self.remaining_attempts == 0
    }

    /// False if a pass was recorded above a failure. Such evidence is kept as-is.
    pub fn is_consistent(&self) -> bool {
        match (self.max_success_difficulty, self.min_fail_difficulty) {
            (Some(success), Some(fail)) => success <= fail,
            _ => true
        }
    }

    /// The difficulty the next placement map should be near.
    /// Repeated calls without a new result return the same value.
    pub fn next_target_difficulty(&self) -> f64 {
        let last = match self.history.last() {
            Some(attempt) => attempt,
            None => return self.seed_target
        };

        let target = if last.passed {
            let previous_failed = self.history.len() > 1 && !self.history[self.history.len() - 2].passed;
            let step = if previous_failed { RECOVERY_STEP } else { PASS_STEP };

            last.played_difficulty + step
        } else {
            match self.max_success_difficulty {
                Some(success) => success + RETRY_STEP,
                None => self.low_bound
            }
        };

        round_2dp(target.min(self.high_bound))
    }

    /// Closest map to `target`, widening the search band as needed. If nothing lies
    /// within the widest band, the closest map in the whole pool is used.
    pub fn pick_map_near<'a, R: Rng + ?Sized>(
        &self,
        pool: &'a [MapRecord],
        target: f64,
        rng: &mut R
    ) -> Option<&'a MapRecord> {
        select_near(pool, target, NEAR_START_BAND, NEAR_MAX_BAND, NEAR_BAND_STEP, rng).or_else(|| {
            debug!(session = %self.id, target_difficulty = target, "No placement candidate in band, using nearest map");
            nearest(pool, target)
        })
    }

    /// Records the outcome of a placement map and tightens the bracket.
    pub fn register_result(&mut self, played_difficulty: f64, passed: bool) -> Result<(), EngineError> {
        if self.is_terminal() {
            return Err(EngineError::SessionComplete);
        }

        self.history.push(PlacementAttempt {
            played_difficulty,
            passed
        });

        if passed {
            self.max_success_difficulty = Some(
                self.max_success_difficulty
                    .map_or(played_difficulty, |s| s.max(played_difficulty))
            );
            self.low_bound = self.low_bound.max(played_difficulty);
        } else {
            self.min_fail_difficulty = Some(
                self.min_fail_difficulty
                    .map_or(played_difficulty, |f| f.min(played_difficulty))
            );
            self.high_bound = self.high_bound.min(played_difficulty);
        }

        self.remaining_attempts -= 1;

        debug!(
            session = %self.id,
            played_difficulty,
            passed,
            low = self.low_bound,
            high = self.high_bound,
            remaining = self.remaining_attempts,
            "Registered placement result"
        );

        if !self.is_consistent() {
            warn!(
                session = %self.id,
                max_success = ?self.max_success_difficulty,
                min_fail = ?self.min_fail_difficulty,
                "Placement evidence is inverted: a pass is recorded above a failure"
            );
        }

        Ok(())
    }

    /// Uses one of the session's skips. Returns false if none are left.
    ///
    /// Until the first result is registered, a skip also draws a new seed.
    pub fn use_skip<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.skips_left == 0 {
            return false;
        }

        self.skips_left -= 1;

        if self.history.is_empty() {
            self.seed_target = Self::draw_seed(self.placement_min, self.placement_max, rng);
        }

        true
    }

    /// # Placement rating
    ///
    /// - Pass and fail on record: the midpoint of the best pass and the easiest fail.
    /// - Only passes: the best pass.
    /// - Only fails: just below the easiest fail.
    /// - No attempts: the middle of the placement range.
    pub fn rating_result(&self) -> Result<f64, EngineError> {
        if !self.is_terminal() {
            return Err(EngineError::SessionActive {
                remaining: self.remaining_attempts
            });
        }

        let rating = match (self.max_success_difficulty, self.min_fail_difficulty) {
            (Some(success), Some(fail)) => (success + fail) / 2.0,
            (Some(success), None) => success,
            (None, Some(fail)) => fail - FAIL_ONLY_OFFSET,
            (None, None) => (self.placement_min + self.placement_max) / 2.0
        };

        Ok(round_2dp(rating))
    }

    /// Number of results registered so far
    pub fn attempts_played(&self) -> u32 {
        self.initial_attempts - self.remaining_attempts
    }
}
