//! Player-placed barriers.
//!
//! The analyzer only ever reads a [`BarrierMask`]. Barriers that break the
//! placement rules (off open terrain, on a protected point, outside the grid)
//! are dropped by [`BarrierMask::effective`] instead of failing the
//! evaluation.

use crate::bitgrid::CellMask;
use crate::common::BarrierError;
use crate::grid::Grid;

/// Set of barrier coordinates.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BarrierMask {
    cells: CellMask,
}

impl BarrierMask {
    /// Empty mask of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: CellMask::new(width, height),
        }
    }

    /// Empty mask shaped like `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.width(), grid.height())
    }

    /// Mask from `(row, col)` pairs. Out-of-range pairs are skipped.
    pub fn from_coords<I>(width: usize, height: usize, coords: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut mask = Self::new(width, height);
        for (row, col) in coords {
            if !mask.insert(row, col) && !mask.contains(row, col) {
                log::debug!("skipping out-of-range barrier ({}, {})", row, col);
            }
        }
        mask
    }

    /// Adds a barrier. Returns `false` if it was present or out of range.
    pub fn insert(&mut self, row: usize, col: usize) -> bool {
        match self.cells.index_of(row, col) {
            Some(idx) => self.cells.insert_index(idx),
            None => false,
        }
    }

    /// Removes a barrier. Returns `true` if one was present.
    pub fn remove(&mut self, row: usize, col: usize) -> bool {
        match self.cells.index_of(row, col) {
            Some(idx) => self.cells.remove_index(idx),
            None => false,
        }
    }

    /// True if a barrier sits at (row, col).
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells.contains(row, col)
    }

    /// Number of barriers.
    pub fn len(&self) -> usize {
        self.cells.count_ones()
    }

    /// True if no barrier is placed.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Removes every barrier.
    pub fn clear(&mut self) {
        self.cells.clear_all();
    }

    /// Barrier positions in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter_set_bits()
    }

    /// Barriers that actually count on `grid`: inside the grid, on `Open`
    /// terrain and not on a protected point. Anything else is ignored.
    pub fn effective(&self, grid: &Grid) -> CellMask {
        let mut out = grid.empty_mask();
        for (row, col) in self.iter() {
            let Some(idx) = grid.index(row, col) else {
                log::debug!("ignoring barrier ({}, {}) outside the grid", row, col);
                continue;
            };
            if grid.terrain_cells()[idx].accepts_barrier() && !grid.is_protected(idx) {
                out.insert_index(idx);
            } else {
                log::debug!("ignoring barrier ({}, {}) on a blocked or protected cell", row, col);
            }
        }
        out
    }

    /// Checks the placement rules for a new barrier at (row, col).
    pub fn validate_placement(grid: &Grid, row: usize, col: usize) -> Result<(), BarrierError> {
        let idx = grid
            .index(row, col)
            .ok_or(BarrierError::OutOfBounds { row, col })?;
        if !grid.terrain_cells()[idx].accepts_barrier() {
            return Err(BarrierError::NotOpenTerrain { row, col });
        }
        if grid.is_protected(idx) {
            return Err(BarrierError::ProtectedCell { row, col });
        }
        Ok(())
    }
}

impl core::fmt::Debug for BarrierMask {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
