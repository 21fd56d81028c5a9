use crate::{config::EngineConfig, model::structures::player_state::PlayerState};
use std::{
    cell::RefCell,
    fs, io,
    path::{Path, PathBuf}
};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access player state: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to (de)serialize player state: {0}")]
    Serialization(#[from] serde_json::Error)
}

/// Durable storage for a single player's state
pub trait StateStore {
    /// Returns the stored state, or a fresh unrated state if nothing is stored
    fn load(&self) -> Result<PlayerState, StoreError>;

    fn save(&self, state: &PlayerState) -> Result<(), StoreError>;
}

/// Player state kept as a JSON document on disk
pub struct JsonFileStore {
    path: PathBuf,
    config: EngineConfig
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>, config: &EngineConfig) -> Self {
        JsonFileStore {
            path: path.as_ref().to_path_buf(),
            config: config.clone()
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<PlayerState, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let state = serde_json::from_str(&raw)?;
                debug!(path = %self.path.display(), ?state, "Loaded player state");
                Ok(state)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No stored player state, starting unrated");
                Ok(PlayerState::new(&self.config))
            }
            Err(e) => Err(e.into())
        }
    }

    fn save(&self, state: &PlayerState) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, raw)?;

        debug!(path = %self.path.display(), ?state, "Saved player state");
        Ok(())
    }
}

/// In-memory store, for tests and throwaway sessions
pub struct MemoryStore {
    state: RefCell<Option<PlayerState>>,
    config: EngineConfig
}

impl MemoryStore {
    pub fn new(config: &EngineConfig) -> Self {
        MemoryStore {
            state: RefCell::new(None),
            config: config.clone()
        }
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<PlayerState, StoreError> {
        Ok(self
            .state
            .borrow()
            .clone()
            .unwrap_or_else(|| PlayerState::new(&self.config)))
    }

    fn save(&self, state: &PlayerState) -> Result<(), StoreError> {
        self.state.replace(Some(state.clone()));
        Ok(())
    }
}
