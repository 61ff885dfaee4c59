use snake_core::{AgentId, CoreError, Position};
use thiserror::Error;

use crate::Feature;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("{0} is not registered on this board")]
    UnknownAgent(AgentId),

    #[error("{0} is registered on this board by a different snake instance")]
    ForeignAgent(AgentId),

    #[error("{0} is already registered on this board")]
    DuplicateAgent(AgentId),

    #[error("cell {0} lies outside the board")]
    OutOfBounds(Position),

    #[error("cannot place {feature} at {at}: cell already taken")]
    CellTaken { at: Position, feature: Feature },

    #[error(transparent)]
    Config(#[from] CoreError),
}

pub type BoardResult<T> = Result<T, BoardError>;
