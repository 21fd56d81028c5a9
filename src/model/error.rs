use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("No maps available")]
    EmptyPool,

    #[error("Placement session has no attempts remaining")]
    SessionComplete,

    #[error("Placement session still has {remaining} attempt(s) remaining")]
    SessionActive { remaining: u32 }
}
