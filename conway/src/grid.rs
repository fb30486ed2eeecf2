// grid.rs - Bounded grid state for Conway's Game of Life

use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;

use crate::error::GridError;

/// A cell position. `x` runs left to right, `y` top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl From<(u32, u32)> for Coord {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The grid's bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Upper bound on `(width + 2) * (height + 2)`, the stepping buffer including its dead frame.
    pub const MAX_PADDED_CELLS: u64 = 1 << 26;

    /// Validates driver-supplied dimensions. Negative axes are rejected, never clamped.
    ///
    /// Sizes whose padded area exceeds [`MAX_PADDED_CELLS`](Self::MAX_PADDED_CELLS)
    /// are rejected so that stepping and rendering never overflow.
    pub fn try_new(width: i64, height: i64) -> Result<Self, GridError> {
        if width < 0 || height < 0 {
            return Err(GridError::NegativeDimension { width, height });
        }
        let too_large = GridError::DimensionTooLarge { width, height };
        let (w, h) = (u32::try_from(width), u32::try_from(height));
        let (Ok(w), Ok(h)) = (w, h) else {
            return Err(too_large);
        };
        let padded = (u64::from(w) + 2)
            .checked_mul(u64::from(h) + 2)
            .filter(|&cells| cells <= Self::MAX_PADDED_CELLS);
        if padded.is_none() {
            return Err(too_large);
        }
        Ok(Self { width: w, height: h })
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether a grid of this size can hold a `width x height` box.
    pub fn holds(&self, width: u32, height: u32) -> bool {
        self.width >= width && self.height >= height
    }

    /// Maps a signed coordinate to an in-bounds `Coord`.
    pub fn locate(&self, x: i64, y: i64) -> Result<Coord, GridError> {
        let inside = (0..i64::from(self.width)).contains(&x) && (0..i64::from(self.height)).contains(&y);
        if !inside {
            return Err(GridError::OutOfBounds { x, y, size: *self });
        }
        Ok(Coord::new(x as u32, y as u32))
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Grid dimensions plus the set of live cells.
///
/// Every live cell lies inside `size`: mutators reject anything else with
/// [`GridError::OutOfBounds`], so there are no inert cells beyond the edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridState {
    size: Size,
    live: BTreeSet<Coord>,
}

impl GridState {
    /// A 0x0 grid with no live cells.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(size: Size) -> Self {
        Self { size, live: BTreeSet::new() }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn live_cells(&self) -> &BTreeSet<Coord> {
        &self.live
    }

    pub fn population(&self) -> usize {
        self.live.len()
    }

    pub fn is_alive(&self, cell: Coord) -> bool {
        self.live.contains(&cell)
    }

    /// Like [`is_alive`](Self::is_alive) but for driver coordinates; anything off-grid is dead.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        self.size.locate(x, y).is_ok_and(|cell| self.is_alive(cell))
    }

    /// Replaces the dimensions and drops every live cell. There is no resampling.
    pub fn resize(&mut self, width: i64, height: i64) -> Result<(), GridError> {
        let size = Size::try_new(width, height)?;
        debug!(%size, "resizing grid");
        self.size = size;
        self.live.clear();
        Ok(())
    }

    /// Marks a cell alive. Returns `false` if it already was.
    pub fn set_live(&mut self, x: i64, y: i64) -> Result<bool, GridError> {
        let cell = self.size.locate(x, y)?;
        Ok(self.live.insert(cell))
    }

    /// Marks a cell dead. Returns `false` if it already was.
    pub fn set_dead(&mut self, x: i64, y: i64) -> Result<bool, GridError> {
        let cell = self.size.locate(x, y)?;
        Ok(self.live.remove(&cell))
    }

    pub fn clear(&mut self) {
        debug!(population = self.live.len(), "clearing grid");
        self.live.clear();
    }

    /// Replaces the live set with `cells`, centered on the grid.
    ///
    /// `cells` are relative to a `pattern_width x pattern_height` box. Each
    /// axis is shifted by `floor((size - pattern) / 2)`, which is negative
    /// when the box is larger than the grid. If any shifted cell lands
    /// outside the grid nothing is placed.
    pub fn place_pattern(
        &mut self,
        pattern_width: i64,
        pattern_height: i64,
        cells: &[(i64, i64)],
    ) -> Result<(), GridError> {
        if pattern_width < 0 || pattern_height < 0 {
            return Err(GridError::NegativeDimension { width: pattern_width, height: pattern_height });
        }
        let offset_x = (i64::from(self.size.width) - pattern_width).div_euclid(2);
        let offset_y = (i64::from(self.size.height) - pattern_height).div_euclid(2);

        let live = cells
            .iter()
            .map(|&(x, y)| match (x.checked_add(offset_x), y.checked_add(offset_y)) {
                (Some(x), Some(y)) => self.size.locate(x, y),
                _ => Err(GridError::OutOfBounds { x, y, size: self.size }),
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        debug!(pattern_width, pattern_height, offset_x, offset_y, population = live.len(), "placing pattern");
        self.live = live;
        Ok(())
    }

    /// Installs a freshly computed generation. Callers guarantee every cell is in bounds.
    pub(crate) fn replace_live(&mut self, live: BTreeSet<Coord>) {
        debug_assert!(live.iter().all(|c| c.x < self.size.width && c.y < self.size.height));
        self.live = live;
    }

    /// One line per row, `#` for alive and `.` for dead.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.size.width as usize + 1) * self.size.height as usize);
        for y in 0..self.size.height {
            for x in 0..self.size.width {
                out.push(if self.is_alive(Coord::new(x, y)) { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for GridState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_empty_and_zero_sized() {
        let grid = GridState::new();
        assert_eq!(grid.size(), Size::new(0, 0));
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.render(), "");
    }

    #[test]
    fn negative_dimensions_are_rejected() {
        let mut grid = GridState::with_size(Size::new(4, 4));
        grid.set_live(1, 1).unwrap();
        let err = grid.resize(-1, 3).unwrap_err();
        assert_eq!(err, GridError::NegativeDimension { width: -1, height: 3 });
        assert_eq!(grid.size(), Size::new(4, 4));
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        let err = Size::try_new(i64::from(u32::MAX) + 1, 1).unwrap_err();
        assert!(matches!(err, GridError::DimensionTooLarge { .. }));
    }

    #[test]
    fn oversized_area_is_rejected() {
        let max = i64::from(u32::MAX);
        assert_eq!(
            Size::try_new(max, max),
            Err(GridError::DimensionTooLarge { width: max, height: max })
        );
        // Each axis fits a u32 but the padded product does not fit the limit.
        assert!(Size::try_new(100_000, 100_000).is_err());
        assert!(Size::try_new(max, 0).is_err());

        let mut grid = GridState::with_size(Size::new(2, 2));
        assert!(grid.resize(max, max).is_err());
        assert_eq!(grid.size(), Size::new(2, 2));
    }

    #[test]
    fn largest_allowed_area_is_accepted() {
        // (8190 + 2) * (8190 + 2) = 2^26
        assert_eq!(Size::try_new(8190, 8190), Ok(Size::new(8190, 8190)));
        assert!(Size::try_new(8191, 8190).is_err());
    }

    #[test]
    fn set_live_twice_keeps_one_entry() {
        let mut grid = GridState::with_size(Size::new(3, 3));
        assert!(grid.set_live(2, 1).unwrap());
        assert!(!grid.set_live(2, 1).unwrap());
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn set_dead_on_dead_cell_is_a_no_op() {
        let mut grid = GridState::with_size(Size::new(3, 3));
        assert!(!grid.set_dead(0, 0).unwrap());
        grid.set_live(0, 0).unwrap();
        assert!(grid.set_dead(0, 0).unwrap());
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn off_grid_cells_are_rejected() {
        let mut grid = GridState::with_size(Size::new(3, 2));
        assert!(matches!(grid.set_live(3, 0), Err(GridError::OutOfBounds { x: 3, y: 0, .. })));
        assert!(matches!(grid.set_live(0, -1), Err(GridError::OutOfBounds { .. })));
        assert!(matches!(grid.set_dead(0, 2), Err(GridError::OutOfBounds { .. })));
        assert!(!grid.contains(3, 0));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn pattern_larger_than_grid_uses_floor_offset() {
        // offset = floor((3 - 6) / 2) = -2 on x, floor((3 - 1) / 2) = 1 on y
        let mut grid = GridState::with_size(Size::new(3, 3));
        grid.place_pattern(6, 1, &[(2, 0), (4, 0)]).unwrap();
        let expected: BTreeSet<_> = [Coord::new(0, 1), Coord::new(2, 1)].into();
        assert_eq!(grid.live_cells(), &expected);
    }

    #[test]
    fn pattern_spilling_off_grid_is_rejected_whole() {
        let mut grid = GridState::with_size(Size::new(3, 3));
        grid.set_live(1, 1).unwrap();
        let err = grid.place_pattern(6, 1, &[(0, 0), (2, 0)]).unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { x: -2, y: 1, .. }));
        assert!(grid.contains(1, 1));
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn huge_pattern_coordinates_are_rejected_not_wrapped() {
        let mut grid = GridState::with_size(Size::new(8, 8));
        let err = grid.place_pattern(0, 0, &[(i64::MAX, 0)]).unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { x: i64::MAX, y: 0, .. }));

        let err = grid.place_pattern(0, 0, &[(1, i64::MAX - 1)]).unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { .. }));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn render_draws_rows_top_to_bottom() {
        let mut grid = GridState::with_size(Size::new(3, 2));
        grid.set_live(0, 0).unwrap();
        grid.set_live(2, 1).unwrap();
        assert_eq!(grid.render(), "#..\n..#\n");
    }
}
