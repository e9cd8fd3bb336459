use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Position is outside the board")]
    OutOfBounds,
    #[error("Mine count must be smaller than the cell count")]
    TooManyMines,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
