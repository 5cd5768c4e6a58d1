//! Square occupancy grid.

use std::fmt;

/// N×N occupancy grid, row-major by (y, x). Out-of-bounds reads return
/// empty, writes are no-ops.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    pub size: usize,
    pub cells: Vec<bool>,
}

impl Grid {
    /// # Panics
    /// Panics if `size * size` overflows `usize`; use [`Grid::cell_count`]
    /// or [`crate::SimConfig::validate`] to reject such sizes first.
    #[must_use]
    pub fn new(size: usize) -> Self {
        let Some(len) = Self::cell_count(size) else {
            panic!("grid size {size} overflows the cell count");
        };
        Self {
            size,
            cells: vec![false; len],
        }
    }

    /// Cells in a `size`×`size` grid, or `None` on overflow.
    #[must_use]
    pub fn cell_count(size: usize) -> Option<usize> {
        size.checked_mul(size)
    }

    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < self.size && y >= 0 && (y as usize) < self.size
    }

    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.cells[y as usize * self.size + x as usize]
    }

    pub fn set(&mut self, x: i32, y: i32, occupied: bool) {
        if self.in_bounds(x, y) {
            self.cells[y as usize * self.size + x as usize] = occupied;
        }
    }

    /// Reset every cell to empty without reallocating.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Renders as rows of `#` (sand) and `.` (empty).
impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.size, self.size)?;
        for row in self.cells.chunks(self.size.max(1)) {
            let line: String = row.iter().map(|&c| if c { '#' } else { '.' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
