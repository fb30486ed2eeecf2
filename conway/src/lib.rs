//! Conway's Game of Life on a bounded grid.
//!
//! [`SimulationEngine`] owns a [`GridState`] and a generation counter and is
//! the only thing that computes new generations. [`Session`] wraps an engine
//! with play/pause, timing and the [`AutoStop`] policy for interactive front
//! ends.

pub mod autostop;
pub mod engine;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod session;
pub mod settings;

pub use autostop::{AutoStop, StopReason};
pub use engine::{SimulationEngine, next_generation};
pub use error::{GridError, SessionError, SettingsError};
pub use grid::{Coord, GridState, Size};
pub use patterns::Pattern;
pub use session::{Session, Status};
pub use settings::{CellSize, Settings, Speed};
