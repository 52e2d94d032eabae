#![no_std]

extern crate alloc;

use alloc::string::String;
use serde::{Deserialize, Serialize};

pub use cascade::*;
pub use cell::*;
pub use detect::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use theme::*;
pub use types::*;

mod cascade;
mod cell;
mod detect;
mod engine;
mod error;
mod generator;
mod grid;
mod theme;
mod types;

pub const MIN_GRID_SIZE: Coord = 6;
pub const MAX_GRID_SIZE: Coord = 8;
pub const MIN_ALPHABET_SIZE: u8 = 3;
pub const MAX_ALPHABET_SIZE: u8 = 8;

/// Immutable configuration of one session; changing any field implies a full reset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub grid_size: Coord,
    pub alphabet_size: u8,
    pub theme: String,
}

impl GameSettings {
    pub fn new(grid_size: Coord, alphabet_size: u8, theme: impl Into<String>) -> Self {
        Self {
            grid_size,
            alphabet_size,
            theme: theme.into(),
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.grid_size, self.grid_size)
    }

    /// Numeric bounds only; the anti-match generator cannot terminate below a
    /// 3-symbol alphabet, so sessions must never be created outside these.
    pub fn validate_bounds(&self) -> Result<()> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(GameError::GridSizeOutOfRange);
        }
        if !(MIN_ALPHABET_SIZE..=MAX_ALPHABET_SIZE).contains(&self.alphabet_size) {
            return Err(GameError::AlphabetOutOfRange);
        }
        Ok(())
    }

    /// Full fail-fast validation against the theme registry the session will draw from.
    pub fn validate(&self, themes: &ThemeRegistry) -> Result<()> {
        self.validate_bounds()?;
        let theme = themes.get(&self.theme).ok_or(GameError::UnknownTheme)?;
        if theme.symbol_count() < usize::from(self.alphabet_size) {
            return Err(GameError::ThemeTooSmall);
        }
        Ok(())
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::new(8, 5, "hearts")
    }
}
