use crate::error::LifeError;

/// Largest edge length a grid may be allocated with
pub const MAX_GRID_SIZE: usize = 4096;

/// A single cell of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub alive: bool,
    /// Living cells in the edge-clamped 3x3 window, excluding this one
    pub neighbor_count: u8,
}

/// Square, non-wrapping board stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-dead grid of `size` x `size` cells
    pub fn new(size: usize) -> Result<Self, LifeError> {
        if size == 0 || size > MAX_GRID_SIZE {
            return Err(LifeError::InvalidSize(size));
        }
        let len = size.checked_mul(size).ok_or(LifeError::InvalidSize(size))?;
        Ok(Self {
            size,
            cells: vec![Cell::default(); len],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, LifeError> {
        if row < self.size && col < self.size {
            Ok(row * self.size + col)
        } else {
            Err(LifeError::out_of_bounds(row, col, self.size))
        }
    }

    /// Get the cell at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<Cell, LifeError> {
        let idx = self.index(row, col)?;
        Ok(self.cells[idx])
    }

    /// Set the alive flag at (row, col). Neighbor counts are not refreshed.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<(), LifeError> {
        let idx = self.index(row, col)?;
        self.cells[idx].alive = alive;
        Ok(())
    }

    /// Flip the cell at (row, col) and return its new state
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<bool, LifeError> {
        let idx = self.index(row, col)?;
        let cell = &mut self.cells[idx];
        cell.alive = !cell.alive;
        Ok(cell.alive)
    }

    pub(crate) fn set_neighbor_count(
        &mut self,
        row: usize,
        col: usize,
        count: u8,
    ) -> Result<(), LifeError> {
        let idx = self.index(row, col)?;
        self.cells[idx].neighbor_count = count;
        Ok(())
    }

    /// Reallocate to an all-dead grid of the new size, discarding every cell
    pub fn resize(&mut self, new_size: usize) -> Result<(), LifeError> {
        *self = Grid::new(new_size)?;
        Ok(())
    }

    /// Kill every cell and zero the counts, keeping the size
    pub fn fill_dead(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Read-only snapshot view for the presentation layer
    pub fn for_each_cell<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize, bool, u8),
    {
        for (idx, cell) in self.cells.iter().enumerate() {
            f(idx / self.size, idx % self.size, cell.alive, cell.neighbor_count);
        }
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.alive).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|c| c.alive)
    }
}
