use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Grid size must be between 6 and 8")]
    GridSizeOutOfRange,
    #[error("Symbol alphabet must have between 3 and 8 symbols")]
    AlphabetOutOfRange,
    #[error("Unknown theme")]
    UnknownTheme,
    #[error("Theme has fewer symbols than the requested alphabet")]
    ThemeTooSmall,
    #[error("Grid shape does not match declared size")]
    GridShapeMismatch,
    #[error("Symbol outside the configured alphabet")]
    SymbolOutOfAlphabet,
}

pub type Result<T> = core::result::Result<T, GameError>;
