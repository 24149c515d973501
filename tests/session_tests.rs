use levee::{
    Action, BarrierError, CornerClosure, FloodEngine, FloodResult, Layout, ScoreWeights, Session,
    SessionState, SessionStatus,
};
use rand::{rngs::SmallRng, SeedableRng};

const RING: &str = "
    . . . . .
    . # . # .
    . # H # .
    . # # # .
    . . . . .
";

fn ring_session() -> Session {
    Session::new(Layout::parse(RING).unwrap().grid)
}

#[test]
fn test_new_session_is_open() {
    let session = ring_session();
    assert_eq!(session.status(), SessionStatus::Open);
    assert_eq!(session.result(), &FloodResult::inert(5, 5));
    assert!(session.barriers().is_empty());
    assert!(session.history().is_empty());
    assert_eq!(session.remaining_budget(), None);
}

#[test]
fn test_place_and_undo() {
    let mut session = ring_session();
    let score = session.place(1, 2).unwrap().score();
    assert_eq!(score, 4);
    assert_eq!(session.status(), SessionStatus::Contained);
    assert_eq!(session.history(), &[Action::Place { row: 1, col: 2 }]);

    session.undo().unwrap();
    assert_eq!(session.status(), SessionStatus::Open);
    assert!(session.barriers().is_empty());
    assert!(session.history().is_empty());
    assert_eq!(session.undo().unwrap_err(), BarrierError::NothingToUndo);
}

#[test]
fn test_undo_restores_removed_barrier() {
    let mut session = ring_session();
    session.place(1, 2).unwrap();
    session.remove(1, 2).unwrap();
    assert_eq!(session.status(), SessionStatus::Open);

    session.undo().unwrap();
    assert!(session.barriers().contains(1, 2));
    assert_eq!(session.status(), SessionStatus::Contained);
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_placement_rules() {
    let mut session = ring_session();
    assert_eq!(
        session.place(1, 1).unwrap_err(),
        BarrierError::NotOpenTerrain { row: 1, col: 1 }
    );
    assert_eq!(
        session.place(2, 2).unwrap_err(),
        BarrierError::ProtectedCell { row: 2, col: 2 }
    );
    assert_eq!(
        session.place(5, 0).unwrap_err(),
        BarrierError::OutOfBounds { row: 5, col: 0 }
    );
    session.place(0, 0).unwrap();
    assert_eq!(
        session.place(0, 0).unwrap_err(),
        BarrierError::AlreadyPlaced { row: 0, col: 0 }
    );
    assert_eq!(
        session.remove(4, 4).unwrap_err(),
        BarrierError::NotPlaced { row: 4, col: 4 }
    );
    // failed edits leave no history
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_budget_limits_placements() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut session = ring_session().with_budget(1);
    assert_eq!(session.remaining_budget(), Some(1));
    session.place(0, 0).unwrap();
    assert_eq!(session.remaining_budget(), Some(0));
    assert_eq!(
        session.place(0, 1).unwrap_err(),
        BarrierError::BudgetExhausted { budget: 1 }
    );
    assert_eq!(
        session.random_placement(&mut rng).unwrap_err(),
        BarrierError::BudgetExhausted { budget: 1 }
    );
    session.remove(0, 0).unwrap();
    assert_eq!(session.remaining_budget(), Some(1));
}

#[test]
fn test_toggle_and_restart() {
    let mut session = ring_session();
    session.toggle(1, 2).unwrap();
    assert!(session.barriers().contains(1, 2));
    session.toggle(1, 2).unwrap();
    assert!(!session.barriers().contains(1, 2));
    assert_eq!(
        session.history(),
        &[
            Action::Place { row: 1, col: 2 },
            Action::Remove { row: 1, col: 2 }
        ]
    );

    session.place(1, 2).unwrap();
    session.place(0, 0).unwrap();
    let result = session.restart();
    assert!(!result.containment_active());
    assert!(session.barriers().is_empty());
    assert!(session.history().is_empty());
}

#[test]
fn test_random_placement_is_seeded_and_valid() {
    let session = ring_session();
    for seed in 0..32 {
        let a = session
            .random_placement(&mut SmallRng::seed_from_u64(seed))
            .unwrap();
        let b = session
            .random_placement(&mut SmallRng::seed_from_u64(seed))
            .unwrap();
        assert_eq!(a, b);
        let mut fresh = ring_session();
        assert!(fresh.place(a.0, a.1).is_ok());
    }
}

#[test]
fn test_random_placement_without_free_cells() {
    let layout = Layout::parse("# H\n> ~").unwrap();
    let session = Session::new(layout.grid);
    let mut rng = SmallRng::seed_from_u64(1);
    assert_eq!(
        session.random_placement(&mut rng).unwrap_err(),
        BarrierError::NoFreeCell
    );
}

#[test]
fn test_state_roundtrip_through_bincode() {
    let mut session = ring_session().with_budget(3);
    session.place(0, 0).unwrap();
    session.place(1, 2).unwrap();
    let state = session.state();

    let bytes = bincode::serialize(&state).unwrap();
    let decoded: SessionState = bincode::deserialize(&bytes).unwrap();
    assert_eq!(decoded, state);

    let restored = Session::from_state(session.grid().clone(), decoded).unwrap();
    assert_eq!(restored.barriers(), session.barriers());
    assert_eq!(restored.history(), session.history());
    assert_eq!(restored.remaining_budget(), Some(1));
    assert_eq!(restored.result(), session.result());
    assert_eq!(restored.status(), SessionStatus::Contained);
}

#[test]
fn test_from_state_revalidates() {
    let grid = Layout::parse(RING).unwrap().grid;
    let state = |barriers: Vec<(usize, usize)>, budget| SessionState {
        barriers,
        history: Vec::new(),
        budget,
    };
    assert_eq!(
        Session::from_state(grid.clone(), state(vec![(1, 1)], None)).unwrap_err(),
        BarrierError::NotOpenTerrain { row: 1, col: 1 }
    );
    assert_eq!(
        Session::from_state(grid.clone(), state(vec![(0, 0), (0, 0)], None)).unwrap_err(),
        BarrierError::AlreadyPlaced { row: 0, col: 0 }
    );
    assert_eq!(
        Session::from_state(grid.clone(), state(vec![(0, 0), (0, 1)], Some(1))).unwrap_err(),
        BarrierError::BudgetExhausted { budget: 1 }
    );
    assert!(Session::from_state(grid, state(vec![(1, 2)], Some(1))).is_ok());
}

#[test]
fn test_custom_engine_applies_to_session() {
    let layout = Layout::parse(
        "
        # # . # #
        # H . . #
        # # # # #
        ",
    )
    .unwrap();
    let engine = FloodEngine::new(ScoreWeights::STANDARD, CornerClosure::Disabled);
    let mut session = Session::new(layout.grid.clone()).with_engine(engine);
    session.place(1, 3).unwrap();
    assert_eq!(session.status(), SessionStatus::Open);

    let mut standard = Session::new(layout.grid);
    standard.place(1, 3).unwrap();
    assert_eq!(standard.status(), SessionStatus::Contained);
}

#[test]
fn test_from_state_rejects_inconsistent_history() {
    let grid = Layout::parse(RING).unwrap().grid;
    let snapshot = |barriers: Vec<(usize, usize)>, history: Vec<Action>| SessionState {
        barriers,
        history,
        budget: None,
    };
    let place = |row, col| Action::Place { row, col };
    let remove = |row, col| Action::Remove { row, col };

    // a placement the barriers no longer show would leave undo stuck
    assert_eq!(
        Session::from_state(grid.clone(), snapshot(vec![], vec![place(0, 0)])).unwrap_err(),
        BarrierError::HistoryMismatch
    );
    assert_eq!(
        Session::from_state(grid.clone(), snapshot(vec![], vec![remove(1, 1)])).unwrap_err(),
        BarrierError::HistoryMismatch
    );
    assert_eq!(
        Session::from_state(grid.clone(), snapshot(vec![(0, 0)], vec![remove(0, 0)]))
            .unwrap_err(),
        BarrierError::HistoryMismatch
    );
    // barriers without history are preset and fine
    assert!(Session::from_state(grid.clone(), snapshot(vec![(0, 0)], vec![])).is_ok());
    assert_eq!(
        Session::from_state(grid.clone(), snapshot(vec![(1, 1)], vec![place(1, 1)])).unwrap_err(),
        BarrierError::NotOpenTerrain { row: 1, col: 1 }
    );

    let history = vec![place(0, 0), place(1, 2), remove(0, 0)];
    let mut session = Session::from_state(grid, snapshot(vec![(1, 2)], history)).unwrap();
    assert_eq!(session.status(), SessionStatus::Contained);
    session.undo().unwrap();
    assert!(session.barriers().contains(0, 0));
    session.undo().unwrap();
    session.undo().unwrap();
    assert!(session.barriers().is_empty());
    assert_eq!(session.undo().unwrap_err(), BarrierError::NothingToUndo);
}
