//! Common error types for the analyzer: grid construction, barrier
//! placement and the text layout notation.

use core::fmt;

/// Errors raised while constructing a [`Grid`](crate::grid::Grid).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Width or height is zero, or `width * height` overflows.
    InvalidDimensions { width: usize, height: usize },
    /// The terrain array does not hold exactly `width * height` cells.
    TerrainLengthMismatch { expected: usize, actual: usize },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::InvalidDimensions { width, height } => {
                write!(f, "Invalid grid dimensions {}x{}", width, height)
            }
            ConfigurationError::TerrainLengthMismatch { expected, actual } => write!(
                f,
                "Terrain holds {} cells but the grid needs {}",
                actual, expected
            ),
        }
    }
}

/// Errors returned by barrier placement in a [`Session`](crate::session::Session).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarrierError {
    /// Coordinate lies outside the grid.
    OutOfBounds { row: usize, col: usize },
    /// Barriers may only sit on open terrain.
    NotOpenTerrain { row: usize, col: usize },
    /// Barriers may not cover a protected point.
    ProtectedCell { row: usize, col: usize },
    /// A barrier already occupies the cell.
    AlreadyPlaced { row: usize, col: usize },
    /// No barrier to remove at the cell.
    NotPlaced { row: usize, col: usize },
    /// The session's barrier budget is used up.
    BudgetExhausted { budget: usize },
    /// Undo history is empty.
    NothingToUndo,
    /// No valid cell is left for a random placement.
    NoFreeCell,
    /// Replaying a snapshot's history does not rebuild its barriers.
    HistoryMismatch,
}

impl fmt::Display for BarrierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarrierError::OutOfBounds { row, col } => {
                write!(f, "Cell ({}, {}) is outside the grid", row, col)
            }
            BarrierError::NotOpenTerrain { row, col } => {
                write!(f, "Cell ({}, {}) is not open terrain", row, col)
            }
            BarrierError::ProtectedCell { row, col } => {
                write!(f, "Cell ({}, {}) holds a protected point", row, col)
            }
            BarrierError::AlreadyPlaced { row, col } => {
                write!(f, "A barrier is already placed at ({}, {})", row, col)
            }
            BarrierError::NotPlaced { row, col } => {
                write!(f, "No barrier at ({}, {})", row, col)
            }
            BarrierError::BudgetExhausted { budget } => {
                write!(f, "All {} barriers are already placed", budget)
            }
            BarrierError::NothingToUndo => write!(f, "Nothing to undo"),
            BarrierError::NoFreeCell => write!(f, "No free cell left for a barrier"),
            BarrierError::HistoryMismatch => {
                write!(f, "Undo history does not match the placed barriers")
            }
        }
    }
}

/// Errors returned while parsing the text layout notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// No grid rows were found.
    Empty,
    /// A row has a different number of cells than the first row.
    RaggedRow {
        line: usize,
        expected: usize,
        actual: usize,
    },
    /// A character that is not part of the notation.
    UnknownGlyph { line: usize, glyph: char },
    /// The parsed cells do not form a valid grid.
    Configuration(ConfigurationError),
}

impl From<ConfigurationError> for LayoutError {
    fn from(err: ConfigurationError) -> Self {
        LayoutError::Configuration(err)
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Empty => write!(f, "Layout contains no rows"),
            LayoutError::RaggedRow {
                line,
                expected,
                actual,
            } => write!(
                f,
                "Line {} has {} cells, expected {}",
                line, actual, expected
            ),
            LayoutError::UnknownGlyph { line, glyph } => {
                write!(f, "Line {}: unknown glyph '{}'", line, glyph)
            }
            LayoutError::Configuration(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for crate::bitgrid::MaskError {}
#[cfg(feature = "std")]
impl std::error::Error for ConfigurationError {}
#[cfg(feature = "std")]
impl std::error::Error for BarrierError {}
#[cfg(feature = "std")]
impl std::error::Error for LayoutError {}
