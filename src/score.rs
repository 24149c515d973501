//! Post-flood scoring against the protected points.

use crate::bitgrid::CellMask;
use crate::config::ScoreWeights;
use crate::grid::{Category, Grid, Terrain};

/// Each scoring term, already weighted, plus the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreBreakdown {
    /// `Open` cells neither flooded nor covered by a barrier.
    pub dry_land: usize,
    /// Residences left dry.
    pub residences_safe: usize,
    /// Critical facilities left dry.
    pub critical_safe: usize,
    /// Hazard facilities that flooded.
    pub hazards_flooded: usize,
    /// Residences adjacent to flooded hazards, counted once per hazard.
    pub residences_exposed: usize,
    pub total: i32,
}

/// Scores a flooded field. `barriers` must already be the effective
/// barriers for `grid`.
pub fn score_outcome(
    grid: &Grid,
    barriers: &CellMask,
    flooded: &CellMask,
    weights: &ScoreWeights,
) -> ScoreBreakdown {
    let dry_land = grid
        .terrain_cells()
        .iter()
        .enumerate()
        .filter(|(idx, t)| {
            **t == Terrain::Open && !flooded.contains_index(*idx) && !barriers.contains_index(*idx)
        })
        .count();

    let mut out = ScoreBreakdown {
        dry_land,
        ..ScoreBreakdown::default()
    };
    for point in grid.protected_points() {
        let is_flooded = flooded.contains(point.row, point.col);
        match (point.category, is_flooded) {
            (Category::Residence, false) => out.residences_safe += 1,
            (Category::CriticalFacility, false) => out.critical_safe += 1,
            (Category::HazardFacility, true) => {
                out.hazards_flooded += 1;
                out.residences_exposed += grid
                    .points_of(Category::Residence)
                    .filter(|r| r.is_adjacent(point))
                    .count();
            }
            _ => {}
        }
    }

    out.total = dry_land as i32
        + out.residences_safe as i32 * weights.residence_bonus
        + out.critical_safe as i32 * weights.critical_facility_bonus
        - out.hazards_flooded as i32 * weights.hazard_penalty
        - out.residences_exposed as i32 * weights.hazard_exposure_penalty;
    out
}
