use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Grid must be at least one cell wide")]
    EmptyGrid,
    #[error("Requested {requested} words but the bank only has {available}")]
    NotEnoughWords { requested: usize, available: usize },
    #[error("Cannot track {requested} words in one round")]
    TooManyWords { requested: usize },
    #[error("Word {word} has {len} letters and cannot fit a {size}x{size} grid")]
    WordTooLong { word: String, len: usize, size: usize },
    #[error("Could not place {word} in any generated round")]
    Unplaceable { word: String },
    #[error("Grid rows must all be {size} letters long")]
    GridShape { size: usize },
    #[error("Word {word} does not appear in the grid")]
    WordNotInGrid { word: String },
    #[error("Word {word} is listed more than once")]
    DuplicateWord { word: String },
}

pub type Result<T> = core::result::Result<T, PuzzleError>;
