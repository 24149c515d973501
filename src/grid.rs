//! Puzzle grid: fixed terrain, protected points and cell addressing.

use alloc::vec::Vec;

use crate::bitgrid::CellMask;
use crate::common::ConfigurationError;

/// Fixed per-cell terrain kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    /// Passable; the only terrain a barrier may occupy.
    Open,
    /// Permanently impassable.
    Obstacle,
    /// Passable and always seeds the flood.
    WaterSource,
    /// Passable; connects like `Open`.
    Outflow,
}

impl Terrain {
    /// Returns `true` for terrain that blocks water on its own.
    #[inline]
    pub fn is_obstacle(self) -> bool {
        matches!(self, Terrain::Obstacle)
    }

    /// Returns `true` if a barrier may be placed on this terrain.
    #[inline]
    pub fn accepts_barrier(self) -> bool {
        matches!(self, Terrain::Open)
    }
}

/// Scoring category of a protected point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    /// Primary residence; enclosing one is what releases the water.
    Residence,
    CriticalFacility,
    HazardFacility,
}

/// A fixed grid location carrying a scoring category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ProtectedPoint {
    pub row: usize,
    pub col: usize,
    pub category: Category,
}

impl ProtectedPoint {
    pub const fn new(row: usize, col: usize, category: Category) -> Self {
        Self { row, col, category }
    }

    /// True if `other` shares an edge with this point (no diagonals).
    pub fn is_adjacent(&self, other: &ProtectedPoint) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

/// Neighbor directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    East,
    West,
    South,
    North,
}

impl Direction {
    /// Fixed visit order used by every breadth-first search in the crate.
    pub const ORDER: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::South,
        Direction::North,
    ];
}

fn checked_cells(width: usize, height: usize) -> Result<usize, ConfigurationError> {
    match width.checked_mul(height) {
        Some(n) if width > 0 && height > 0 => Ok(n),
        _ => Err(ConfigurationError::InvalidDimensions { width, height }),
    }
}

/// Immutable `width × height` puzzle field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    terrain: Vec<Terrain>,
    protected: Vec<ProtectedPoint>,
    obstacles: CellMask,
    protected_cells: CellMask,
}

impl Grid {
    /// Build a grid from row-major terrain and a protected-point list.
    ///
    /// Fails on zero or overflowing dimensions and on a terrain array of the
    /// wrong length. Protected points outside the grid are dropped.
    pub fn new(
        width: usize,
        height: usize,
        terrain: Vec<Terrain>,
        protected: Vec<ProtectedPoint>,
    ) -> Result<Self, ConfigurationError> {
        let cells = checked_cells(width, height)?;
        if terrain.len() != cells {
            return Err(ConfigurationError::TerrainLengthMismatch {
                expected: cells,
                actual: terrain.len(),
            });
        }

        let mut obstacles = CellMask::new(width, height);
        for (idx, t) in terrain.iter().enumerate() {
            if t.is_obstacle() {
                obstacles.insert_index(idx);
            }
        }

        let mut kept = Vec::with_capacity(protected.len());
        let mut protected_cells = CellMask::new(width, height);
        for point in protected {
            if point.row >= height || point.col >= width {
                log::warn!(
                    "ignoring protected point {:?} outside {}x{} grid",
                    point,
                    width,
                    height
                );
                continue;
            }
            protected_cells.insert_index(point.row * width + point.col);
            kept.push(point);
        }

        Ok(Grid {
            width,
            height,
            terrain,
            protected: kept,
            obstacles,
            protected_cells,
        })
    }

    /// An all-`Open` grid without protected points.
    pub fn open(width: usize, height: usize) -> Result<Self, ConfigurationError> {
        let cells = checked_cells(width, height)?;
        Self::new(width, height, alloc::vec![Terrain::Open; cells], Vec::new())
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells (`width * height`).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.terrain.len()
    }

    /// Row-major index of `(row, col)`, or `None` when out of range.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.height && col < self.width {
            Some(row * self.width + col)
        } else {
            None
        }
    }

    /// `(row, col)` of a row-major index.
    #[inline]
    pub fn coords(&self, idx: usize) -> (usize, usize) {
        (idx / self.width, idx % self.width)
    }

    /// Terrain at `(row, col)`, or `None` when out of range.
    pub fn terrain(&self, row: usize, col: usize) -> Option<Terrain> {
        self.index(row, col).map(|idx| self.terrain[idx])
    }

    /// Row-major terrain of every cell.
    pub fn terrain_cells(&self) -> &[Terrain] {
        &self.terrain
    }

    /// True for cells on row 0, the last row, column 0 or the last column.
    #[inline]
    pub fn is_boundary(&self, idx: usize) -> bool {
        let (row, col) = self.coords(idx);
        row == 0 || col == 0 || row + 1 == self.height || col + 1 == self.width
    }

    /// Boundary cell indices in row-major order.
    pub fn boundary_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.cell_count()).filter(move |&idx| self.is_boundary(idx))
    }

    /// Index of the neighbor one step in `dir`, if it exists.
    #[inline]
    pub fn step(&self, idx: usize, dir: Direction) -> Option<usize> {
        let (row, col) = self.coords(idx);
        match dir {
            Direction::East if col + 1 < self.width => Some(idx + 1),
            Direction::West if col > 0 => Some(idx - 1),
            Direction::South if row + 1 < self.height => Some(idx + self.width),
            Direction::North if row > 0 => Some(idx - self.width),
            _ => None,
        }
    }

    /// In-grid 4-neighbors of `idx` in [`Direction::ORDER`].
    pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        Direction::ORDER
            .into_iter()
            .filter_map(move |dir| self.step(idx, dir))
    }

    /// Protected points inside the grid, in input order.
    pub fn protected_points(&self) -> &[ProtectedPoint] {
        &self.protected
    }

    /// Protected points of one category.
    pub fn points_of(&self, category: Category) -> impl Iterator<Item = &ProtectedPoint> + '_ {
        self.protected
            .iter()
            .filter(move |p| p.category == category)
    }

    /// True if a protected point sits on the cell.
    #[inline]
    pub fn is_protected(&self, idx: usize) -> bool {
        self.protected_cells.contains_index(idx)
    }

    /// Cells with `Obstacle` terrain.
    pub fn obstacle_mask(&self) -> &CellMask {
        &self.obstacles
    }

    /// Indices of `WaterSource` cells in row-major order.
    pub fn water_sources(&self) -> impl Iterator<Item = usize> + '_ {
        self.terrain
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == Terrain::WaterSource)
            .map(|(idx, _)| idx)
    }

    /// An empty mask shaped like this grid.
    pub fn empty_mask(&self) -> CellMask {
        CellMask::new(self.width, self.height)
    }
}
