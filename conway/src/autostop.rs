// autostop.rs - Detects when auto-advance should halt

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use crate::grid::Coord;

/// Why playback should stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No live cells remain.
    Extinct,
    /// The live set repeats one seen `period` generations earlier.
    Repeating { period: u64 },
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Extinct => f.write_str("population died out"),
            StopReason::Repeating { period: 1 } => f.write_str("pattern became a still life"),
            StopReason::Repeating { period } => write!(f, "pattern repeats every {period} generations"),
        }
    }
}

/// Remembers recent live sets and flags extinction or repetition.
///
/// Snapshots are compared as sets, so the order cells were inserted in never
/// matters. With the default depth of one only still lifes are caught; a
/// deeper history also catches oscillators whose period is within the depth.
#[derive(Debug, Clone)]
pub struct AutoStop {
    depth: usize,
    history: VecDeque<(u64, BTreeSet<Coord>)>,
}

impl Default for AutoStop {
    fn default() -> Self {
        Self::with_history(Self::DEFAULT_DEPTH)
    }
}

impl AutoStop {
    pub const DEFAULT_DEPTH: usize = 1;

    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps up to `depth` earlier generations (at least one).
    pub fn with_history(depth: usize) -> Self {
        let depth = depth.max(1);
        Self { depth, history: VecDeque::with_capacity(depth) }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Checks the state after a generation change.
    ///
    /// A generation already recorded is only checked for extinction. A
    /// generation lower than the newest recorded one means the simulation was
    /// reset, so the history is discarded first.
    pub fn observe(&mut self, generation: u64, live: &BTreeSet<Coord>) -> Option<StopReason> {
        if live.is_empty() {
            return Some(StopReason::Extinct);
        }

        match self.history.back().map(|&(newest, _)| newest) {
            Some(newest) if newest == generation => return None,
            Some(newest) if newest > generation => self.history.clear(),
            _ => {}
        }

        if let Some((seen, _)) = self.history.iter().rev().find(|(_, cells)| cells == live) {
            return Some(StopReason::Repeating { period: generation - seen });
        }

        if self.history.len() == self.depth {
            self.history.pop_front();
        }
        self.history.push_back((generation, live.clone()));
        None
    }
}
