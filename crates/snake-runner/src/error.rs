use snake_board::BoardError;
use snake_core::{AgentId, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("board error: {0}")]
    Board(#[from] BoardError),

    #[error("invalid runner configuration: {0}")]
    Config(#[from] CoreError),

    #[error("clock period must be greater than zero")]
    InvalidPeriod,

    #[error("failed to spawn thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("worker for {0} panicked")]
    WorkerPanicked(AgentId),
}

pub type RunnerResult<T> = Result<T, RunnerError>;
