// patterns.rs - Built-in starting patterns

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::grid::Size;

/// A fixed set of live cells inside a `width x height` bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    pub cells: &'static [(u32, u32)],
}

impl Pattern {
    /// Whether the whole bounding box fits on a grid of `size`.
    pub fn fits(&self, size: Size) -> bool {
        size.holds(self.width, self.height)
    }
}

/// Initial seed for grids at least 16x9.
pub const DESKTOP: Pattern = Pattern {
    name: "Desktop",
    width: 16,
    height: 9,
    cells: &[
        (3, 2), (4, 2), (4, 4), (3, 4), (3, 6), (4, 6), (5, 3), (5, 4), (5, 5), (6, 4),
        (2, 4), (2, 3), (2, 5), (1, 4), (9, 4), (10, 4), (11, 4), (12, 4), (13, 4), (14, 4),
        (11, 2), (12, 2), (11, 6), (12, 6), (13, 5), (13, 3), (10, 3), (10, 5),
    ],
};

/// Initial seed for grids at least 8x8.
pub const MOBILE: Pattern = Pattern {
    name: "Mobile",
    width: 8,
    height: 8,
    cells: &[
        (2, 1), (1, 2), (3, 2), (4, 2), (2, 3), (2, 4), (3, 5), (4, 5),
        (5, 4), (5, 3), (5, 1), (6, 2), (6, 5), (5, 6), (2, 6), (1, 5),
    ],
};

/// Seeds tried on first layout, largest first.
pub const SEEDS: &[Pattern] = &[DESKTOP, MOBILE];

pub const PATTERNS: &[Pattern] = &[
    DESKTOP,
    MOBILE,
    Pattern {
        name: "Glider",
        width: 3,
        height: 3,
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        width: 3,
        height: 1,
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "Toad",
        width: 4,
        height: 2,
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Beacon",
        width: 4,
        height: 4,
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        width: 13,
        height: 13,
        cells: &[
            // Top half
            (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
            (0, 2), (5, 2), (7, 2), (12, 2),
            (0, 3), (5, 3), (7, 3), (12, 3),
            (0, 4), (5, 4), (7, 4), (12, 4),
            (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
            // Bottom half (mirrored)
            (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
            (0, 8), (5, 8), (7, 8), (12, 8),
            (0, 9), (5, 9), (7, 9), (12, 9),
            (0, 10), (5, 10), (7, 10), (12, 10),
            (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
        ],
    },
    Pattern {
        name: "R-pentomino",
        width: 3,
        height: 3,
        cells: &[(1, 1), (2, 1), (2, 0), (1, 2), (0, 2)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        width: 36,
        height: 9,
        cells: &[
            (0, 4), (1, 4), (0, 5), (1, 5),
            (10, 4), (10, 5), (10, 6), (11, 3), (11, 7), (12, 2), (12, 8),
            (13, 2), (13, 8), (14, 5), (15, 3), (15, 7), (16, 4), (16, 5),
            (16, 6), (17, 5), (20, 2), (20, 3), (20, 4), (21, 2), (21, 3),
            (21, 4), (22, 1), (22, 5), (24, 0), (24, 1), (24, 5), (24, 6),
            (34, 2), (34, 3), (35, 2), (35, 3),
        ],
    },
];

/// Looks a pattern up by name, ignoring case and treating spaces, `-` and `_` alike.
pub fn find(name: &str) -> Option<&'static Pattern> {
    let wanted = normalize(name);
    PATTERNS.iter().find(|pattern| normalize(pattern.name) == wanted)
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// The largest seed that fits on a grid of `size`, if any.
pub fn initial_seed(size: Size) -> Option<&'static Pattern> {
    SEEDS.iter().find(|pattern| pattern.fits(size))
}

/// Roughly one cell in three. The same seed gives the same cells for a given
/// `rand` release.
pub fn random_cells(size: Size, seed_value: u64) -> Vec<(i64, i64)> {
    let mut rng = StdRng::seed_from_u64(seed_value);

    let mut cells = Vec::with_capacity(size.area() / 3);
    for y in 0..i64::from(size.height) {
        for x in 0..i64::from(size.width) {
            if rng.gen_ratio(1, 3) {
                cells.push((x, y));
            }
        }
    }
    cells
}
