use crate::error::LifeError;
use crate::grid::Grid;
use rand::Rng;

/// A fixed shape: relative (row, col) offsets from its origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

/// Arrow pointing up, placed near the top edge
pub const ARROW_TOP: Pattern = Pattern {
    name: "Arrow Top",
    cells: &[(0, 0), (0, 2), (1, 0), (1, 1), (1, 2), (2, 1)],
};

pub const ARROW_BOTTOM: Pattern = Pattern {
    name: "Arrow Bottom",
    cells: &[(0, 1), (1, 0), (1, 1), (1, 2), (2, 0), (2, 2)],
};

pub const ARROW_LEFT: Pattern = Pattern {
    name: "Arrow Left",
    cells: &[(0, 0), (0, 1), (1, 1), (1, 2), (2, 0), (2, 1)],
};

pub const ARROW_RIGHT: Pattern = Pattern {
    name: "Arrow Right",
    cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1), (2, 2)],
};

pub const SINGLE: Pattern = Pattern {
    name: "Single",
    cells: &[(0, 0)],
};

/// Smallest grid on which every shape of the default layout fits
pub const MIN_SEEDABLE_SIZE: usize = 9;

/// Placement of a pattern's (0, 0) offset; may be negative on tiny grids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    pub row: isize,
    pub col: isize,
}

impl Origin {
    pub fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }
}

/// Four arrows at the quarter points of each edge plus one center cell.
/// Uses floor division, so odd and small sizes land asymmetrically.
pub fn default_layout(size: usize) -> Vec<(Pattern, Origin)> {
    let s = size as isize;
    let quarter = s / 4;
    let half = s / 2;
    let three_quarters = 3 * s / 4;

    vec![
        (ARROW_TOP, Origin::new(quarter - 2, half - 1)),
        (ARROW_BOTTOM, Origin::new(three_quarters, half - 1)),
        (ARROW_LEFT, Origin::new(half - 1, quarter - 2)),
        (ARROW_RIGHT, Origin::new(half - 1, three_quarters)),
        (SINGLE, Origin::new(half, half)),
    ]
}

/// Translate a pattern offset and check it against the grid
fn place(origin: Origin, offset: (usize, usize), size: usize) -> Result<(usize, usize), LifeError> {
    let row = origin.row + offset.0 as isize;
    let col = origin.col + offset.1 as isize;
    let limit = size as isize;
    if row < 0 || col < 0 || row >= limit || col >= limit {
        return Err(LifeError::OutOfBounds { row, col, size });
    }
    Ok((row as usize, col as usize))
}

/// Absolute coordinates of every placed cell on a grid of `size`
fn targets(placements: &[(Pattern, Origin)], size: usize) -> Result<Vec<(usize, usize)>, LifeError> {
    let mut cells = Vec::new();
    for (pattern, origin) in placements {
        for &offset in pattern.cells {
            cells.push(place(*origin, offset, size)?);
        }
    }
    Ok(cells)
}

/// Check that every placement fits on a grid of `size`
pub fn fits(placements: &[(Pattern, Origin)], size: usize) -> Result<(), LifeError> {
    targets(placements, size).map(|_| ())
}

/// Set every cell of every placed pattern alive.
///
/// All coordinates are validated before the first write, so an out of
/// bounds placement leaves the grid untouched. Neighbor counts are not
/// refreshed.
pub fn seed(grid: &mut Grid, placements: &[(Pattern, Origin)]) -> Result<(), LifeError> {
    for (pattern, origin) in placements {
        log::debug!("placing {} at ({}, {})", pattern.name, origin.row, origin.col);
    }
    for (row, col) in targets(placements, grid.size())? {
        grid.set(row, col, true)?;
    }
    Ok(())
}

/// Kill every cell
pub fn clear(grid: &mut Grid) {
    grid.fill_dead();
}

/// Mark each cell alive with probability `density` (clamped to 0.0-1.0)
pub fn scatter<R: Rng>(grid: &mut Grid, density: f64, rng: &mut R) {
    let density = density.clamp(0.0, 1.0);
    let size = grid.size();
    for row in 0..size {
        for col in 0..size {
            if rng.gen_bool(density) {
                // Coordinates come from the grid's own bounds
                let _ = grid.set(row, col, true);
            }
        }
    }
}
