//! Host-side puzzle session.
//!
//! Holds the grid and the current barriers, enforces the placement rules and
//! re-runs the full evaluation after every change so the cached result is
//! never stale.

use alloc::vec::Vec;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::barrier::BarrierMask;
use crate::common::BarrierError;
use crate::flood::{FloodEngine, FloodResult};
use crate::grid::Grid;

/// A reversible barrier edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Place { row: usize, col: usize },
    Remove { row: usize, col: usize },
}

/// Whether the current layout has released the water.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionStatus {
    /// No residence has been newly enclosed.
    Open,
    /// A residence is enclosed and the flood has run.
    Contained,
}

/// Plain snapshot of a session for the host to hold on to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    pub barriers: Vec<(usize, usize)>,
    pub history: Vec<Action>,
    pub budget: Option<usize>,
}

/// Grid, barriers, undo history and the latest evaluation.
#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    barriers: BarrierMask,
    history: Vec<Action>,
    budget: Option<usize>,
    engine: FloodEngine,
    result: FloodResult,
}

impl Session {
    /// Start a session with no barriers and the standard flood settings.
    pub fn new(grid: Grid) -> Self {
        let barriers = BarrierMask::for_grid(&grid);
        let result = FloodResult::inert(grid.width(), grid.height());
        let mut session = Self {
            grid,
            barriers,
            history: Vec::new(),
            budget: None,
            engine: FloodEngine::default(),
            result,
        };
        session.reevaluate();
        session
    }

    /// Use different flood settings.
    pub fn with_engine(mut self, engine: FloodEngine) -> Self {
        self.engine = engine;
        self.reevaluate();
        self
    }

    /// Cap the number of barriers on the grid at once.
    pub fn with_budget(mut self, budget: usize) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn barriers(&self) -> &BarrierMask {
        &self.barriers
    }

    /// Latest evaluation.
    pub fn result(&self) -> &FloodResult {
        &self.result
    }

    pub fn history(&self) -> &[Action] {
        &self.history
    }

    pub fn status(&self) -> SessionStatus {
        if self.result.containment_active() {
            SessionStatus::Contained
        } else {
            SessionStatus::Open
        }
    }

    /// Barriers still available, if the session has a budget.
    pub fn remaining_budget(&self) -> Option<usize> {
        self.budget
            .map(|budget| budget.saturating_sub(self.barriers.len()))
    }

    /// Place a barrier at (row, col).
    pub fn place(&mut self, row: usize, col: usize) -> Result<&FloodResult, BarrierError> {
        self.apply(Action::Place { row, col })?;
        self.history.push(Action::Place { row, col });
        Ok(&self.result)
    }

    /// Remove the barrier at (row, col).
    pub fn remove(&mut self, row: usize, col: usize) -> Result<&FloodResult, BarrierError> {
        self.apply(Action::Remove { row, col })?;
        self.history.push(Action::Remove { row, col });
        Ok(&self.result)
    }

    /// Place a barrier if the cell is free, otherwise remove it.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<&FloodResult, BarrierError> {
        if self.barriers.contains(row, col) {
            self.remove(row, col)
        } else {
            self.place(row, col)
        }
    }

    /// Revert the most recent placement or removal.
    pub fn undo(&mut self) -> Result<&FloodResult, BarrierError> {
        let last = self.history.pop().ok_or(BarrierError::NothingToUndo)?;
        let inverse = match last {
            Action::Place { row, col } => Action::Remove { row, col },
            Action::Remove { row, col } => Action::Place { row, col },
        };
        if let Err(e) = self.apply(inverse) {
            self.history.push(last);
            return Err(e);
        }
        Ok(&self.result)
    }

    /// Clear every barrier and the undo history.
    pub fn restart(&mut self) -> &FloodResult {
        self.barriers.clear();
        self.history.clear();
        self.reevaluate();
        &self.result
    }

    /// A uniformly random valid cell for a new barrier.
    pub fn random_placement<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(usize, usize), BarrierError> {
        if let Some(0) = self.remaining_budget() {
            return Err(BarrierError::BudgetExhausted {
                budget: self.budget.unwrap_or(0),
            });
        }
        let free: Vec<(usize, usize)> = (0..self.grid.cell_count())
            .map(|idx| self.grid.coords(idx))
            .filter(|&(row, col)| {
                !self.barriers.contains(row, col)
                    && BarrierMask::validate_placement(&self.grid, row, col).is_ok()
            })
            .collect();
        free.choose(rng).copied().ok_or(BarrierError::NoFreeCell)
    }

    /// Snapshot of barriers, history and budget.
    pub fn state(&self) -> SessionState {
        SessionState {
            barriers: self.barriers.iter().collect(),
            history: self.history.clone(),
            budget: self.budget,
        }
    }

    /// Rebuild a session on `grid` from a snapshot. Every barrier is
    /// re-validated against the grid, and every history entry must be
    /// undoable from those barriers.
    pub fn from_state(grid: Grid, state: SessionState) -> Result<Self, BarrierError> {
        let mut session = Self::new(grid);
        session.budget = state.budget;
        for &(row, col) in &state.barriers {
            BarrierMask::validate_placement(&session.grid, row, col)?;
            if !session.barriers.insert(row, col) {
                return Err(BarrierError::AlreadyPlaced { row, col });
            }
        }
        if let Some(budget) = session.budget {
            if session.barriers.len() > budget {
                return Err(BarrierError::BudgetExhausted { budget });
            }
        }
        unwind(&session.grid, &session.barriers, &state.history, session.budget)?;
        session.history = state.history;
        session.reevaluate();
        Ok(session)
    }

    fn apply(&mut self, action: Action) -> Result<(), BarrierError> {
        match action {
            Action::Place { row, col } => {
                BarrierMask::validate_placement(&self.grid, row, col)?;
                if self.barriers.contains(row, col) {
                    return Err(BarrierError::AlreadyPlaced { row, col });
                }
                if let Some(budget) = self.budget {
                    if self.barriers.len() >= budget {
                        return Err(BarrierError::BudgetExhausted { budget });
                    }
                }
                self.barriers.insert(row, col);
            }
            Action::Remove { row, col } => {
                if !self.barriers.remove(row, col) {
                    return Err(BarrierError::NotPlaced { row, col });
                }
            }
        }
        log::debug!("applied {:?}", action);
        self.reevaluate();
        Ok(())
    }

    fn reevaluate(&mut self) {
        self.engine
            .run_into(&self.grid, &self.barriers, &mut self.result);
    }
}

// Walks `history` backwards from `barriers`, failing on the first step undo
// could not reverse.
fn unwind(
    grid: &Grid,
    barriers: &BarrierMask,
    history: &[Action],
    budget: Option<usize>,
) -> Result<(), BarrierError> {
    let mut barriers = barriers.clone();
    for action in history.iter().rev() {
        let reversible = match *action {
            Action::Place { row, col } => barriers.remove(row, col),
            Action::Remove { row, col } => {
                BarrierMask::validate_placement(grid, row, col).is_ok()
                    && barriers.insert(row, col)
                    && budget.map_or(true, |budget| barriers.len() <= budget)
            }
        };
        if !reversible {
            log::debug!("history step {:?} cannot be undone", action);
            return Err(BarrierError::HistoryMismatch);
        }
    }
    Ok(())
}
