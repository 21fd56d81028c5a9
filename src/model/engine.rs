use crate::{
    config::EngineConfig,
    model::{
        error::EngineError,
        map_selection::select_by_band,
        placement::PlacementSession,
        rating_utils::update_rating,
        structures::{map_record::MapRecord, match_mode::MatchMode, player_state::PlayerState}
    }
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, info_span};

/// State handed back after a map is resolved
#[derive(Debug, Clone)]
pub struct Resolution {
    /// `None` once placements are finished (or if none were running)
    pub session: Option<PlacementSession>,
    pub player_state: PlayerState,
    /// Set when this result completed the placement run
    pub completed_rating: Option<f64>
}

/// State handed back after a skip request
#[derive(Debug, Clone)]
pub struct SkipOutcome {
    pub session: Option<PlacementSession>,
    pub player_state: PlayerState,
    pub allowed: bool
}

/// Placements while a session is running, ranked play otherwise
pub fn match_mode(session: Option<&PlacementSession>) -> MatchMode {
    match session {
        Some(_) => MatchMode::Placement,
        None => MatchMode::Ranked
    }
}

/// Entry point for a single player's play loop. Owns the configuration and the
/// random source; the placement session and player state are threaded through
/// each call by the caller.
pub struct PlacementEngine<R: Rng = ChaCha8Rng> {
    config: EngineConfig,
    rng: R
}

impl PlacementEngine<ChaCha8Rng> {
    /// Reproducible engine, used for tests and replays
    pub fn seeded(config: EngineConfig, seed: u64) -> Self {
        Self::new(config, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: EngineConfig) -> Self {
        Self::seeded(config, rand::random())
    }
}

impl<R: Rng> PlacementEngine<R> {
    pub fn new(config: EngineConfig, rng: R) -> Self {
        PlacementEngine { config, rng }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Starts a play session: placements for a player without a rating,
    /// ranked play (`None`) otherwise.
    ///
    /// A placement run configured with no attempts is finished on the spot: its
    /// rating is committed to `player_state` and ranked play begins.
    pub fn begin(
        &mut self,
        pool: &[MapRecord],
        player_state: &mut PlayerState
    ) -> Result<Option<PlacementSession>, EngineError> {
        if pool.is_empty() {
            return Err(EngineError::EmptyPool);
        }

        if player_state.has_rating {
            return Ok(None);
        }

        let session = self.start_placement(pool)?;
        if session.is_terminal() {
            self.commit_placement(&session, player_state)?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    pub fn start_placement(&mut self, pool: &[MapRecord]) -> Result<PlacementSession, EngineError> {
        if pool.is_empty() {
            return Err(EngineError::EmptyPool);
        }

        let session = PlacementSession::new(&self.config, &mut self.rng);
        info!(
            session = %session.id(),
            attempts = session.remaining_attempts(),
            skips = session.skips_left(),
            "Starting placements"
        );

        Ok(session)
    }

    /// Picks the map to present next. During placements the map closest to the
    /// session's target is used; afterwards a map is drawn from the player's
    /// rating band.
    pub fn next_map<'a>(
        &mut self,
        session: Option<&PlacementSession>,
        pool: &'a [MapRecord],
        player_state: &PlayerState
    ) -> Result<&'a MapRecord, EngineError> {
        if pool.is_empty() {
            return Err(EngineError::EmptyPool);
        }

        let picked = match session {
            Some(session) => {
                if session.is_terminal() {
                    return Err(EngineError::SessionComplete);
                }

                let _span = info_span!("placement", session = %session.id()).entered();
                let target = session.next_target_difficulty();
                let picked = session.pick_map_near(pool, target, &mut self.rng);
                debug!(target_difficulty = target, "Picked placement map");

                picked
            }
            None => {
                let rating = player_state.effective_rating(&self.config);
                let picked = select_by_band(pool, rating, self.config.matchmaking_band, &mut self.rng);
                debug!(rating, "Picked ranked map");

                picked
            }
        };

        picked.ok_or(EngineError::EmptyPool)
    }

    /// Applies a pass/fail result for `map`.
    ///
    /// During placements the result is registered with the session. When that was
    /// the final attempt, the placement rating is committed to the player state and
    /// the session is consumed. Outside placements the rating is updated directly.
    pub fn resolve(
        &mut self,
        session: Option<PlacementSession>,
        map: &MapRecord,
        passed: bool,
        mut player_state: PlayerState
    ) -> Result<Resolution, EngineError> {
        match session {
            Some(mut session) => {
                session.register_result(map.difficulty, passed)?;

                if !session.is_terminal() {
                    return Ok(Resolution {
                        session: Some(session),
                        player_state,
                        completed_rating: None
                    });
                }

                let rating = self.commit_placement(&session, &mut player_state)?;

                Ok(Resolution {
                    session: None,
                    player_state,
                    completed_rating: Some(rating)
                })
            }
            None => {
                let old_rating = player_state.effective_rating(&self.config);
                let new_rating = update_rating(old_rating, map.difficulty, passed, &self.config);

                player_state.rating = Some(new_rating);
                player_state.skip_cooldown_counter = player_state
                    .skip_cooldown_counter
                    .saturating_add(1)
                    .min(self.config.skip_cooldown);

                info!(
                    map = %map.name,
                    difficulty = map.difficulty,
                    passed,
                    old_rating,
                    new_rating,
                    "Ranked result"
                );

                Ok(Resolution {
                    session: None,
                    player_state,
                    completed_rating: None
                })
            }
        }
    }

    /// Writes the rating of a finished placement run to the player state
    fn commit_placement(&self, session: &PlacementSession, player_state: &mut PlayerState) -> Result<f64, EngineError> {
        let rating = session.rating_result()?;
        player_state.has_rating = true;
        player_state.rating = Some(rating);
        player_state.skip_cooldown_counter = self.config.skip_cooldown;

        info!(session = %session.id(), rating, attempts = session.attempts_played(), "Placements complete");
        Ok(rating)
    }

    /// Discards the current map without a result. Placements draw from a fixed
    /// skip budget; ranked skips require the cooldown counter to be full and
    /// reset it.
    pub fn skip(&mut self, session: Option<PlacementSession>, mut player_state: PlayerState) -> SkipOutcome {
        match session {
            Some(mut session) => {
                let allowed = session.use_skip(&mut self.rng);
                debug!(session = %session.id(), allowed, skips_left = session.skips_left(), "Placement skip");

                SkipOutcome {
                    session: Some(session),
                    player_state,
                    allowed
                }
            }
            None => {
                let allowed = player_state.can_skip(&self.config);
                if allowed {
                    player_state.skip_cooldown_counter = 0;
                }
                debug!(allowed, "Ranked skip");

                SkipOutcome {
                    session: None,
                    player_state,
                    allowed
                }
            }
        }
    }

    /// Status text shown alongside the presented map
    pub fn context_line(&self, session: Option<&PlacementSession>, map: &MapRecord, player_state: &PlayerState) -> String {
        match session {
            Some(session) => format!(
                "Placements left: {} | Skips left: {}",
                session.remaining_attempts(),
                session.skips_left()
            ),
            None => format!(
                "Rating: {} | Map diff: {:.2}",
                player_state.effective_rating(&self.config),
                map.difficulty
            )
        }
    }

    /// Whether a skip is currently possible, with a short explanation
    pub fn skip_status(&self, session: Option<&PlacementSession>, player_state: &PlayerState) -> (bool, String) {
        match session {
            Some(session) => (session.skips_left() > 0, String::new()),
            None if player_state.can_skip(&self.config) => (true, "Skip available".to_string()),
            None => (
                false,
                format!(
                    "Skip available after {} more map(s)",
                    player_state.maps_until_skip(&self.config)
                )
            )
        }
    }
}
