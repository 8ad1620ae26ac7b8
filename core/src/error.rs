use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Board has not been generated yet")]
    NotGenerated,
    #[error("Invalid configuration, board must be non-empty with fewer hazards than cells")]
    InvalidConfiguration,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Adjacency counts do not match the hazard layout")]
    InconsistentTruthGrid,
    #[error("Expected {expected} hazards but board has {found}")]
    HazardCountMismatch {
        expected: CellCount,
        found: CellCount,
    },
}

pub type Result<T> = core::result::Result<T, GameError>;
