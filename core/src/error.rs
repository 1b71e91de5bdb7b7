use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid level, mine count must be below the number of cells")]
    InvalidLevel,
    #[error("Invalid cell index")]
    InvalidIndex,
    #[error("Mine mask does not match the board size")]
    InvalidBoardShape,
    #[error("No session is active, the request was ignored")]
    IllegalStateOperation,
}

pub type Result<T> = core::result::Result<T, GameError>;
