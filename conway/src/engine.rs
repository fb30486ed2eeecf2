// engine.rs - Generation stepping for Conway's Game of Life

use std::collections::BTreeSet;

use tracing::trace;

use crate::error::GridError;
use crate::grid::{Coord, GridState, Size};
use crate::patterns::Pattern;

/// Width of the always-dead frame around the active area of the scratch buffer.
const BORDER: usize = 1;

/// A grid plus the number of generations computed since the last reset.
///
/// `resize`, `clear` and the pattern loaders reset the generation counter
/// together with the live set; `advance` is the only way to move it forward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationEngine {
    grid: GridState,
    generation: u64,
}

impl SimulationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(width: i64, height: i64) -> Result<Self, GridError> {
        let mut engine = Self::new();
        engine.resize(width, height)?;
        Ok(engine)
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn size(&self) -> Size {
        self.grid.size()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn live_cells(&self) -> &BTreeSet<Coord> {
        self.grid.live_cells()
    }

    /// An owned copy of the live set for callers that outlive the next mutation.
    pub fn snapshot(&self) -> BTreeSet<Coord> {
        self.grid.live_cells().clone()
    }

    pub fn resize(&mut self, width: i64, height: i64) -> Result<(), GridError> {
        self.grid.resize(width, height)?;
        self.generation = 0;
        Ok(())
    }

    pub fn set_live(&mut self, x: i64, y: i64) -> Result<bool, GridError> {
        self.grid.set_live(x, y)
    }

    pub fn set_dead(&mut self, x: i64, y: i64) -> Result<bool, GridError> {
        self.grid.set_dead(x, y)
    }

    /// Flips one cell and returns its new state.
    pub fn toggle(&mut self, x: i64, y: i64) -> Result<bool, GridError> {
        if self.grid.contains(x, y) {
            self.grid.set_dead(x, y).map(|_| false)
        } else {
            self.grid.set_live(x, y).map(|_| true)
        }
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        self.generation = 0;
    }

    pub fn place_pattern(
        &mut self,
        pattern_width: i64,
        pattern_height: i64,
        cells: &[(i64, i64)],
    ) -> Result<(), GridError> {
        self.grid.place_pattern(pattern_width, pattern_height, cells)?;
        self.generation = 0;
        Ok(())
    }

    /// Centers one of the catalogue patterns on the grid.
    pub fn place(&mut self, pattern: &Pattern) -> Result<(), GridError> {
        let cells: Vec<(i64, i64)> = pattern
            .cells
            .iter()
            .map(|&(x, y)| (i64::from(x), i64::from(y)))
            .collect();
        self.place_pattern(i64::from(pattern.width), i64::from(pattern.height), &cells)
    }

    /// Computes the next generation and bumps the counter by one.
    pub fn advance(&mut self) {
        let next = next_generation(&self.grid);
        self.grid.replace_live(next);
        self.generation += 1;
        trace!(generation = self.generation, population = self.grid.population(), "advanced");
    }
}

/// Applies the B3/S23 rule to every cell of the bounded rectangle.
///
/// Live cells are copied into a dense buffer framed by a row and column of
/// dead cells on each side, so edge cells read the frame instead of wrapping.
/// The buffer never exceeds `Size::MAX_PADDED_CELLS` entries.
pub fn next_generation(grid: &GridState) -> BTreeSet<Coord> {
    let Size { width, height } = grid.size();
    let (width, height) = (width as usize, height as usize);
    let stride = width + 2 * BORDER;

    let mut cells = vec![false; stride * (height + 2 * BORDER)];
    for cell in grid.live_cells() {
        debug_assert!((cell.x as usize) < width && (cell.y as usize) < height, "live cell {cell} off the grid");
        cells[(cell.y as usize + BORDER) * stride + cell.x as usize + BORDER] = true;
    }

    let mut next = BTreeSet::new();
    for row in BORDER..height + BORDER {
        for col in BORDER..width + BORDER {
            let index = row * stride + col;
            let neighbors = [
                index - stride - 1, index - stride, index - stride + 1,
                index - 1,                          index + 1,
                index + stride - 1, index + stride, index + stride + 1,
            ];
            let count = neighbors.iter().filter(|&&n| cells[n]).count();

            let alive = match (cells[index], count) {
                (true, 2) | (true, 3) => true,   // Survival
                (false, 3)            => true,   // Birth
                _                     => false,  // Death or stays dead
            };
            if alive {
                next.insert(Coord::new((col - BORDER) as u32, (row - BORDER) as u32));
            }
        }
    }

    next
}
