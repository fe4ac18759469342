use crate::error::LifeError;
use crate::grid::Grid;
use std::ops::{Range, RangeInclusive};

/// Edge-clamped window of rows (or columns) around `center`; never wraps
fn window(center: usize, size: usize) -> RangeInclusive<usize> {
    center.saturating_sub(1)..=(center + 1).min(size - 1)
}

/// Count living neighbors of (row, col), store it in the cell and return it.
/// Border cells see fewer than 8 neighbors.
pub fn count_at(grid: &mut Grid, row: usize, col: usize) -> Result<u8, LifeError> {
    let center = grid.get(row, col)?;
    let size = grid.size();

    let mut count: u8 = 0;
    for r in window(row, size) {
        for c in window(col, size) {
            if grid.get(r, c)?.alive {
                count += 1;
            }
        }
    }
    // The window includes the center itself
    if center.alive {
        count -= 1;
    }

    grid.set_neighbor_count(row, col, count)?;
    Ok(count)
}

/// Recount every coordinate in the rectangle, clamped to the grid
pub fn recount_region(grid: &mut Grid, rows: Range<usize>, cols: Range<usize>) {
    let size = grid.size();
    for r in rows.start.min(size)..rows.end.min(size) {
        for c in cols.start.min(size)..cols.end.min(size) {
            // In bounds after clamping
            let _ = count_at(grid, r, c);
        }
    }
}

/// Recount the 3x3 neighborhood of a single changed cell
pub fn recount_around(grid: &mut Grid, row: usize, col: usize) {
    recount_region(
        grid,
        row.saturating_sub(1)..row + 2,
        col.saturating_sub(1)..col + 2,
    );
}

/// Recount every cell of the grid
pub fn recount_all(grid: &mut Grid) {
    let size = grid.size();
    recount_region(grid, 0..size, 0..size);
}
