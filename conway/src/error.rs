// error.rs - Error types for the simulation core and its drivers

use thiserror::Error;

use crate::grid::Size;

/// Rejected grid commands. A failed command leaves the grid untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// A width or height below zero was supplied.
    #[error("grid dimensions must not be negative, got {width}x{height}")]
    NegativeDimension { width: i64, height: i64 },

    /// A width or height that does not fit the grid's coordinate type, or an
    /// area beyond `Size::MAX_PADDED_CELLS`.
    #[error("grid dimensions {width}x{height} are too large")]
    DimensionTooLarge { width: i64, height: i64 },

    /// A cell outside `[0, width) x [0, height)`.
    #[error("cell ({x}, {y}) lies outside the {size} grid")]
    OutOfBounds { x: i64, y: i64, size: Size },
}

/// Driver parameters outside their allowed values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("generation speed must be between 1 and 5 gen/sec, got {0}")]
    Speed(i64),

    #[error("cell size must be one of 25, 50, 75 or 100 px, got {0}")]
    CellSize(i64),

    #[error("could not parse {0:?} as a number")]
    NotANumber(String),
}

/// Commands the session refuses in its current state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// Speed and cell size are locked while the simulation plays.
    #[error("pause the simulation before changing its settings")]
    Playing,
}
