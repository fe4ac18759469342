use crate::error::LifeError;
use crate::grid::Grid;

/// Next alive state of a cell under B3/S23
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3) => true,            // Birth
        _ => false,                    // Death or stays dead
    }
}

/// Advance the grid by one generation.
///
/// Every transition is decided from the stored neighbor counts before any
/// cell is flipped, so the result does not depend on visiting order.
/// Neighbor counts are stale afterwards and must be recounted.
///
/// Returns true if any cell changed state.
pub fn step(grid: &mut Grid) -> Result<bool, LifeError> {
    let size = grid.size();

    let mut flips = Vec::new();
    for row in 0..size {
        for col in 0..size {
            let cell = grid.get(row, col)?;
            if next_state(cell.alive, cell.neighbor_count) != cell.alive {
                flips.push((row, col));
            }
        }
    }

    for &(row, col) in &flips {
        grid.toggle(row, col)?;
    }

    Ok(!flips.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbors::recount_all;
    use crate::patterns::{self, Origin, ARROW_TOP};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid_with(size: usize, live: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(size).unwrap();
        for &(r, c) in live {
            grid.set(r, c, true).unwrap();
        }
        recount_all(&mut grid);
        grid
    }

    fn live_cells(grid: &Grid) -> Vec<(usize, usize)> {
        let mut live = Vec::new();
        grid.for_each_cell(|r, c, alive, _| {
            if alive {
                live.push((r, c));
            }
        });
        live
    }

    #[test]
    fn test_next_state_table() {
        for n in 0..=8 {
            assert_eq!(next_state(true, n), n == 2 || n == 3);
            assert_eq!(next_state(false, n), n == 3);
        }
    }

    #[test]
    fn test_plus_becomes_ring() {
        let mut grid = grid_with(3, &[(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)]);
        assert_eq!(grid.get(1, 1).unwrap().neighbor_count, 4);
        assert_eq!(grid.get(0, 1).unwrap().neighbor_count, 3);
        assert_eq!(grid.get(0, 0).unwrap().neighbor_count, 3);

        assert!(step(&mut grid).unwrap());

        let expected: Vec<_> = (0..3)
            .flat_map(|r| (0..3).map(move |c| (r, c)))
            .filter(|&rc| rc != (1, 1))
            .collect();
        assert_eq!(live_cells(&grid), expected);
    }

    #[test]
    fn test_blinker_oscillates() {
        let mut grid = grid_with(5, &[(2, 1), (2, 2), (2, 3)]);
        assert!(step(&mut grid).unwrap());
        recount_all(&mut grid);
        assert_eq!(live_cells(&grid), vec![(1, 2), (2, 2), (3, 2)]);
        assert!(step(&mut grid).unwrap());
        recount_all(&mut grid);
        assert_eq!(live_cells(&grid), vec![(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_block_is_stable() {
        let mut grid = grid_with(4, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
        let before = grid.clone();
        assert!(!step(&mut grid).unwrap());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_isolated_cell_dies() {
        let mut grid = grid_with(5, &[(2, 2)]);
        assert!(step(&mut grid).unwrap());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_empty_grid_unchanged() {
        let mut grid = grid_with(5, &[]);
        assert!(!step(&mut grid).unwrap());
    }

    #[test]
    fn test_step_uses_pre_step_snapshot() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = Grid::new(16).unwrap();
        patterns::scatter(&mut grid, 0.35, &mut rng);
        patterns::seed(&mut grid, &[(ARROW_TOP, Origin::new(0, 0))]).unwrap();
        recount_all(&mut grid);

        // Reference built from a frozen copy, visited in reverse order
        let snapshot = grid.clone();
        let mut expected = Grid::new(16).unwrap();
        for row in (0..16).rev() {
            for col in (0..16).rev() {
                let cell = snapshot.get(row, col).unwrap();
                expected
                    .set(row, col, next_state(cell.alive, cell.neighbor_count))
                    .unwrap();
            }
        }

        step(&mut grid).unwrap();
        assert_eq!(live_cells(&grid), live_cells(&expected));
    }
}
