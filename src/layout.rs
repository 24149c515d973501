//! Compact text notation for grids, used by the command line and tests.
//!
//! One grid row per line; whitespace between glyphs is ignored and lines
//! starting with `;` are comments.
//!
//! | glyph | cell |
//! |-------|------|
//! | `.`   | open |
//! | `#`   | obstacle |
//! | `~`   | water source |
//! | `>`   | outflow |
//! | `H`   | residence on open terrain |
//! | `C`   | critical facility on open terrain |
//! | `X`   | hazard facility on open terrain |
//! | `B`   | barrier on open terrain |

use alloc::string::String;
use alloc::vec::Vec;
use core::str::FromStr;

use crate::barrier::BarrierMask;
use crate::common::LayoutError;
use crate::flood::FloodResult;
use crate::grid::{Category, Grid, ProtectedPoint, Terrain};

/// A parsed grid together with any barriers drawn into it.
#[derive(Debug, Clone)]
pub struct Layout {
    pub grid: Grid,
    pub barriers: BarrierMask,
}

impl Layout {
    /// Parse the text notation.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let mut width = None;
        let mut height = 0usize;
        let mut terrain = Vec::new();
        let mut points = Vec::new();
        let mut barriers = Vec::new();

        for (n, line) in text.lines().enumerate() {
            let line_no = n + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with(';') {
                continue;
            }
            let row = height;
            let mut cells = 0usize;
            for glyph in trimmed.chars().filter(|c| !c.is_whitespace()) {
                let col = cells;
                let kind = match glyph {
                    '.' => Terrain::Open,
                    '#' => Terrain::Obstacle,
                    '~' => Terrain::WaterSource,
                    '>' => Terrain::Outflow,
                    'H' | 'C' | 'X' => {
                        let category = match glyph {
                            'H' => Category::Residence,
                            'C' => Category::CriticalFacility,
                            _ => Category::HazardFacility,
                        };
                        points.push(ProtectedPoint::new(row, col, category));
                        Terrain::Open
                    }
                    'B' => {
                        barriers.push((row, col));
                        Terrain::Open
                    }
                    other => {
                        return Err(LayoutError::UnknownGlyph {
                            line: line_no,
                            glyph: other,
                        })
                    }
                };
                terrain.push(kind);
                cells += 1;
            }
            match width {
                None => width = Some(cells),
                Some(expected) if expected != cells => {
                    return Err(LayoutError::RaggedRow {
                        line: line_no,
                        expected,
                        actual: cells,
                    })
                }
                Some(_) => {}
            }
            height += 1;
        }

        let width = width.ok_or(LayoutError::Empty)?;
        let grid = Grid::new(width, height, terrain, points)?;
        let barriers = BarrierMask::from_coords(width, height, barriers);
        Ok(Layout { grid, barriers })
    }
}

impl FromStr for Layout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layout::parse(s)
    }
}

fn glyph(grid: &Grid, barriers: &BarrierMask, idx: usize, flooded: bool) -> char {
    let (row, col) = grid.coords(idx);
    if barriers.contains(row, col) {
        return 'B';
    }
    if let Some(point) = grid
        .protected_points()
        .iter()
        .find(|p| p.row == row && p.col == col)
    {
        let ch = match point.category {
            Category::Residence => 'H',
            Category::CriticalFacility => 'C',
            Category::HazardFacility => 'X',
        };
        return if flooded { ch.to_ascii_lowercase() } else { ch };
    }
    match grid.terrain_cells()[idx] {
        Terrain::Obstacle => '#',
        Terrain::WaterSource => '~',
        _ if flooded => 'w',
        Terrain::Outflow => '>',
        Terrain::Open => '.',
    }
}

/// Draw the grid in the text notation. Flooded cells from `result` show as
/// `w`, flooded protected points in lower case.
pub fn render(grid: &Grid, barriers: &BarrierMask, result: Option<&FloodResult>) -> String {
    let mut out = String::with_capacity(grid.cell_count() * 2 + grid.height());
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let idx = row * grid.width() + col;
            let flooded = result.is_some_and(|r| r.flooded().contains_index(idx));
            if col > 0 {
                out.push(' ');
            }
            out.push(glyph(grid, barriers, idx, flooded));
        }
        out.push('\n');
    }
    out
}
