use thiserror::Error;

use rts_brain::BrainError;
use rts_core::{AgentId, CoreError};
use rts_path::PathError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{0} not found")]
    AgentNotFound(AgentId),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("path error: {0}")]
    Path(#[from] PathError),

    #[error("brain error: {0}")]
    Brain(#[from] BrainError),
}

pub type SimResult<T> = Result<T, SimError>;
