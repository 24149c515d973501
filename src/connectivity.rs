//! Connectivity oracle.
//!
//! Answers which cells the grid boundary can reach through 4-connected,
//! non-blocked cells, and whether the current barriers newly cut a primary
//! residence off from the boundary.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::barrier::BarrierMask;
use crate::bitgrid::CellMask;
use crate::grid::{Category, Grid, ProtectedPoint};

/// How the 2×2 corner-closure rule is applied to a blocked classification.
///
/// For every 2×2 window, if both cells of one diagonal are blocked and at
/// least one of them is a barrier, both cells of the other diagonal become
/// blocked. Diagonals made of obstacle terrain alone never close: the
/// terrain-only field is compared without closure, so closing them would
/// report enclosures no barrier caused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CornerClosure {
    /// Plain obstacle/barrier classification.
    Disabled,
    /// One sweep; every window is tested against the unclosed classification,
    /// so forced cells never force further cells.
    #[default]
    Enabled,
    /// Sweeps until no cell changes. Forced cells act as barriers on the next
    /// sweep, which can fill whole concave pockets.
    Fixpoint,
}

/// Obstacles plus effective barriers, with corner closure applied.
pub fn compute_blocked_mask(grid: &Grid, barriers: &BarrierMask, closure: CornerClosure) -> CellMask {
    let effective = barriers.effective(grid);
    let mut blocked = effective.clone();
    blocked |= grid.obstacle_mask();
    apply_corner_closure(&mut blocked, &effective, closure);
    blocked
}

/// Applies the corner-closure rule to `blocked` in place. `barriers` must be
/// the effective barriers already contained in `blocked`.
pub fn apply_corner_closure(blocked: &mut CellMask, barriers: &CellMask, closure: CornerClosure) {
    match closure {
        CornerClosure::Disabled => {}
        CornerClosure::Enabled => {
            let base = blocked.clone();
            close_pass(&base, barriers, blocked);
        }
        CornerClosure::Fixpoint => {
            let original = blocked.clone();
            let mut drivers = barriers.clone();
            let mut passes = 1usize;
            loop {
                let base = blocked.clone();
                if !close_pass(&base, &drivers, blocked) {
                    break;
                }
                let mut forced = !&original;
                forced &= &*blocked;
                drivers |= &forced;
                passes += 1;
            }
            log::trace!("corner closure settled after {} passes", passes);
        }
    }
}

// Reads windows from `base`, writes forced cells into `out`.
fn close_pass(base: &CellMask, drivers: &CellMask, out: &mut CellMask) -> bool {
    let (width, height) = (base.width(), base.height());
    let closes = |a: usize, b: usize| {
        base.contains_index(a)
            && base.contains_index(b)
            && (drivers.contains_index(a) || drivers.contains_index(b))
    };
    let mut changed = false;
    for row in 0..height.saturating_sub(1) {
        for col in 0..width.saturating_sub(1) {
            let nw = row * width + col;
            let ne = nw + 1;
            let sw = nw + width;
            let se = sw + 1;
            if closes(nw, se) {
                changed |= out.insert_index(ne);
                changed |= out.insert_index(sw);
            }
            if closes(ne, sw) {
                changed |= out.insert_index(nw);
                changed |= out.insert_index(se);
            }
        }
    }
    changed
}

/// Cells connected to a non-blocked boundary cell by a 4-directional path of
/// non-blocked cells.
pub fn reachable_from_boundary(grid: &Grid, blocked: &CellMask) -> CellMask {
    let mut reachable = grid.empty_mask();
    let mut queue = VecDeque::new();
    for idx in grid.boundary_indices() {
        if !blocked.contains_index(idx) && reachable.insert_index(idx) {
            queue.push_back(idx);
        }
    }
    spread(grid, blocked, &mut reachable, &mut queue, None);
    reachable
}

/// Breadth-first expansion from the queued cells through non-blocked
/// neighbors, visiting neighbors in [`Direction::ORDER`](crate::grid::Direction::ORDER).
/// Newly marked cells are appended to `order` when given.
pub(crate) fn spread(
    grid: &Grid,
    blocked: &CellMask,
    marked: &mut CellMask,
    queue: &mut VecDeque<usize>,
    mut order: Option<&mut Vec<usize>>,
) {
    while let Some(current) = queue.pop_front() {
        for next in grid.neighbors(current) {
            if !blocked.contains_index(next) && marked.insert_index(next) {
                if let Some(order) = order.as_deref_mut() {
                    order.push(next);
                }
                queue.push_back(next);
            }
        }
    }
}

/// Reachability with and without the current barriers.
#[derive(Debug, Clone)]
pub struct Containment {
    blocked: CellMask,
    reachable: CellMask,
    baseline: CellMask,
}

impl Containment {
    /// Runs the oracle twice: barrier-inclusive with `closure`, and
    /// terrain-only (obstacles, no closure).
    pub fn probe(grid: &Grid, barriers: &BarrierMask, closure: CornerClosure) -> Self {
        let blocked = compute_blocked_mask(grid, barriers, closure);
        let reachable = reachable_from_boundary(grid, &blocked);
        let baseline = reachable_from_boundary(grid, grid.obstacle_mask());
        Self {
            blocked,
            reachable,
            baseline,
        }
    }

    /// Barrier-inclusive blocked classification.
    pub fn blocked(&self) -> &CellMask {
        &self.blocked
    }

    /// Reachable from terrain alone, unreachable with barriers.
    pub fn is_transition(&self, grid: &Grid, point: &ProtectedPoint) -> bool {
        grid.index(point.row, point.col).is_some_and(|idx| {
            self.baseline.contains_index(idx) && !self.reachable.contains_index(idx)
        })
    }

    /// True on the first primary residence that made the transition.
    pub fn detected(&self, grid: &Grid) -> bool {
        grid.points_of(Category::Residence)
            .any(|point| self.is_transition(grid, point))
    }

    /// Every protected point, of any category, that made the transition.
    pub fn newly_enclosed(&self, grid: &Grid) -> Vec<ProtectedPoint> {
        grid.protected_points()
            .iter()
            .filter(|point| self.is_transition(grid, point))
            .copied()
            .collect()
    }
}

/// Containment transition check with the standard closure mode.
pub fn detect_containment(grid: &Grid, barriers: &BarrierMask) -> bool {
    detect_containment_with(grid, barriers, CornerClosure::Enabled)
}

/// Containment transition check with an explicit closure mode.
pub fn detect_containment_with(grid: &Grid, barriers: &BarrierMask, closure: CornerClosure) -> bool {
    if grid.points_of(Category::Residence).next().is_none() {
        return false;
    }
    let detected = Containment::probe(grid, barriers, closure).detected(grid);
    log::debug!(
        "containment {} with {} barriers",
        if detected { "detected" } else { "not detected" },
        barriers.len()
    );
    detected
}

/// Protected points newly cut off from the boundary by the barriers.
pub fn newly_enclosed(grid: &Grid, barriers: &BarrierMask, closure: CornerClosure) -> Vec<ProtectedPoint> {
    Containment::probe(grid, barriers, closure).newly_enclosed(grid)
}
