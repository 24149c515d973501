//! Flood engine.
//!
//! Once a containment transition is confirmed, water enters from every open
//! boundary cell and every unblocked water source and spreads breadth-first. The order
//! in which cells flood is recorded for animation replay.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::barrier::BarrierMask;
use crate::bitgrid::CellMask;
use crate::config::ScoreWeights;
use crate::connectivity::{spread, Containment, CornerClosure};
use crate::grid::Grid;
use crate::score::{score_outcome, ScoreBreakdown};

/// Outcome of one flood evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct FloodResult {
    flooded: CellMask,
    order: Vec<usize>,
    breakdown: ScoreBreakdown,
    containment_active: bool,
}

impl FloodResult {
    /// Result for a layout where the water stays put.
    pub fn inert(width: usize, height: usize) -> Self {
        Self {
            flooded: CellMask::new(width, height),
            order: Vec::new(),
            breakdown: ScoreBreakdown::default(),
            containment_active: false,
        }
    }

    fn reset(&mut self, width: usize, height: usize) {
        self.flooded.reset(width, height);
        self.order.clear();
        self.breakdown = ScoreBreakdown::default();
        self.containment_active = false;
    }

    /// Flooded cells.
    pub fn flooded(&self) -> &CellMask {
        &self.flooded
    }

    /// One `bool` per cell, row-major.
    pub fn flooded_field(&self) -> Vec<bool> {
        self.flooded.to_bools()
    }

    /// True if (row, col) flooded.
    pub fn is_flooded(&self, row: usize, col: usize) -> bool {
        self.flooded.contains(row, col)
    }

    /// Cell indices in the order they flooded.
    pub fn flood_order(&self) -> &[usize] {
        &self.order
    }

    pub fn flooded_count(&self) -> usize {
        self.order.len()
    }

    pub fn dry_land_count(&self) -> usize {
        self.breakdown.dry_land
    }

    pub fn score(&self) -> i32 {
        self.breakdown.total
    }

    pub fn breakdown(&self) -> &ScoreBreakdown {
        &self.breakdown
    }

    /// Whether a containment transition released the water.
    pub fn containment_active(&self) -> bool {
        self.containment_active
    }
}

/// Flood settings: score weights and the corner-closure mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct FloodEngine {
    pub weights: ScoreWeights,
    pub closure: CornerClosure,
}

impl FloodEngine {
    pub fn new(weights: ScoreWeights, closure: CornerClosure) -> Self {
        Self { weights, closure }
    }

    /// Evaluate into a fresh result.
    pub fn run(&self, grid: &Grid, barriers: &BarrierMask) -> FloodResult {
        let mut out = FloodResult::inert(grid.width(), grid.height());
        self.run_into(grid, barriers, &mut out);
        out
    }

    /// Evaluate into a caller-owned result. Every field of `out` is
    /// overwritten before anything is read.
    pub fn run_into(&self, grid: &Grid, barriers: &BarrierMask, out: &mut FloodResult) {
        out.reset(grid.width(), grid.height());

        let containment = Containment::probe(grid, barriers, self.closure);
        if !containment.detected(grid) {
            log::debug!("no containment transition; water stays put");
            return;
        }
        let blocked = containment.blocked();

        let mut queue = VecDeque::new();
        for idx in grid.boundary_indices() {
            if !blocked.contains_index(idx) && out.flooded.insert_index(idx) {
                out.order.push(idx);
                queue.push_back(idx);
            }
        }
        for idx in grid.water_sources() {
            if !blocked.contains_index(idx) && out.flooded.insert_index(idx) {
                out.order.push(idx);
                queue.push_back(idx);
            }
        }
        let seeds = out.order.len();
        spread(grid, blocked, &mut out.flooded, &mut queue, Some(&mut out.order));

        let effective = barriers.effective(grid);
        out.breakdown = score_outcome(grid, &effective, &out.flooded, &self.weights);
        out.containment_active = true;
        log::debug!(
            "flooded {} cells from {} seeds; dry land {}, score {}",
            out.order.len(),
            seeds,
            out.breakdown.dry_land,
            out.breakdown.total
        );
    }
}

/// Flood with the standard weights and closure mode.
pub fn run_simulation(grid: &Grid, barriers: &BarrierMask) -> FloodResult {
    FloodEngine::default().run(grid, barriers)
}

/// Host entry point: does the barrier layout newly enclose a residence?
pub fn evaluate_containment(grid: &Grid, barriers: &BarrierMask) -> bool {
    crate::connectivity::detect_containment(grid, barriers)
}

/// Host entry point: flood outcome for the barrier layout.
pub fn evaluate_flood(grid: &Grid, barriers: &BarrierMask) -> FloodResult {
    run_simulation(grid, barriers)
}
