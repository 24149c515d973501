use levee::{
    evaluate_containment, evaluate_flood, render, run_simulation, score_outcome, BarrierMask,
    Category, CellMask, Containment, CornerClosure, FloodEngine, FloodResult, Grid, Layout,
    ProtectedPoint, ScoreWeights, Terrain,
};

const RING: &str = "
    . . . . .
    . # . # .
    . # H # .
    . # # # .
    . . . . .
";

const SPRING: &str = "
    . . . . . . .
    . # # # # . .
    . # ~ H . . .
    . # # # # . .
    . . . . . . .
";

#[test]
fn test_open_ring_stays_dry() {
    let layout = Layout::parse(RING).unwrap();
    assert!(!evaluate_containment(&layout.grid, &layout.barriers));

    let result = evaluate_flood(&layout.grid, &layout.barriers);
    assert_eq!(result, FloodResult::inert(5, 5));
    assert_eq!(result.flooded_count(), 0);
    assert_eq!(result.dry_land_count(), 0);
    assert_eq!(result.score(), 0);
    assert!(!result.containment_active());
}

#[test]
fn test_plugging_the_gap_floods_the_perimeter() {
    let layout = Layout::parse(RING).unwrap();
    let barriers = BarrierMask::from_coords(5, 5, [(1, 2)]);
    assert!(evaluate_containment(&layout.grid, &barriers));

    let result = evaluate_flood(&layout.grid, &barriers);
    assert!(result.containment_active());
    assert_eq!(result.flooded_count(), 16);
    assert_eq!(
        result.flood_order(),
        &[0, 1, 2, 3, 4, 5, 9, 10, 14, 15, 19, 20, 21, 22, 23, 24]
    );
    assert!(!result.is_flooded(2, 2));
    assert!(!result.is_flooded(1, 2));
    assert_eq!(result.dry_land_count(), 1);
    assert_eq!(result.breakdown().residences_safe, 1);
    assert_eq!(result.score(), 4);

    assert_eq!(
        render(&layout.grid, &barriers, Some(&result)),
        "w w w w w\nw # B # w\nw # H # w\nw # # # w\nw w w w w\n"
    );
}

#[test]
fn test_water_source_floods_enclosed_residence() {
    let layout = Layout::parse(SPRING).unwrap();
    assert!(!evaluate_containment(&layout.grid, &layout.barriers));

    let barriers = BarrierMask::from_coords(7, 5, [(2, 5)]);
    let result = evaluate_flood(&layout.grid, &barriers);
    assert!(result.containment_active());
    assert_eq!(result.flooded_count(), 22);

    let order = result.flood_order();
    assert_eq!(order[20], 16);
    assert_eq!(order[21], 17);
    assert!(result.is_flooded(2, 3));
    for (r, c) in [(2, 4), (1, 5), (3, 5)] {
        assert!(!result.is_flooded(r, c));
    }
    assert_eq!(result.dry_land_count(), 3);
    assert_eq!(result.breakdown().residences_safe, 0);
    assert_eq!(result.score(), 3);
}

#[test]
fn test_flood_order_starts_with_boundary_then_springs() {
    let layout = Layout::parse(SPRING).unwrap();
    let barriers = BarrierMask::from_coords(7, 5, [(2, 5)]);
    let result = run_simulation(&layout.grid, &barriers);

    let boundary: Vec<usize> = layout.grid.boundary_indices().collect();
    assert_eq!(&result.flood_order()[..boundary.len()], boundary.as_slice());

    let mut seen = CellMask::new(7, 5);
    for &idx in result.flood_order() {
        assert!(seen.insert_index(idx), "cell {} flooded twice", idx);
    }
    assert_eq!(&seen, result.flooded());
}

#[test]
fn test_barriers_and_obstacles_never_flood() {
    let layout = Layout::parse(SPRING).unwrap();
    let barriers = BarrierMask::from_coords(7, 5, [(2, 5)]);
    let result = evaluate_flood(&layout.grid, &barriers);
    for idx in layout.grid.obstacle_mask().iter_indices() {
        assert!(!result.flooded().contains_index(idx));
    }
    assert!(!result.is_flooded(2, 5));
    assert_eq!(result.flooded_field().len(), 35);
}

#[test]
fn test_run_into_reuses_buffers() {
    let small = Layout::parse(RING).unwrap();
    let wide = Layout::parse(SPRING).unwrap();
    let engine = FloodEngine::default();

    let mut out = engine.run(&small.grid, &BarrierMask::from_coords(5, 5, [(1, 2)]));
    assert!(out.containment_active());

    let barriers = BarrierMask::from_coords(7, 5, [(2, 5)]);
    engine.run_into(&wide.grid, &barriers, &mut out);
    assert_eq!(out, engine.run(&wide.grid, &barriers));

    engine.run_into(&small.grid, &small.barriers, &mut out);
    assert_eq!(out, FloodResult::inert(5, 5));
}

#[test]
fn test_closure_mode_changes_the_outcome() {
    let layout = Layout::parse(
        "
        # # . # #
        # H . B #
        # # # # #
        ",
    )
    .unwrap();
    let disabled = FloodEngine::new(ScoreWeights::STANDARD, CornerClosure::Disabled);
    assert!(!disabled.run(&layout.grid, &layout.barriers).containment_active());

    let result = FloodEngine::default().run(&layout.grid, &layout.barriers);
    assert!(result.containment_active());
    assert_eq!(result.flood_order(), &[2]);
    // (1,2) is pinched shut, so the residence stays dry
    assert_eq!(result.dry_land_count(), 2);
    assert_eq!(result.score(), 5);
}

#[test]
fn test_spring_blocked_by_closure_stays_dry() {
    // The barriers at (1,1) and (2,2) pinch the spring at (1,2) shut.
    let layout = Layout::parse(
        "
        . . . . . .
        . B ~ . . .
        . . B . . .
        . . . . B .
        . . . B H B
        . . . . B .
        ",
    )
    .unwrap();
    let grid = &layout.grid;
    let closed = Containment::probe(grid, &layout.barriers, CornerClosure::Enabled);
    assert!(closed.blocked().contains(1, 2));
    assert!(closed.blocked().contains(2, 1));

    let result = evaluate_flood(grid, &layout.barriers);
    assert!(result.containment_active());
    assert!(!result.is_flooded(1, 2));
    assert!(!result.is_flooded(2, 1));
    assert!(!result.flood_order().contains(&8));
    assert!(result.is_flooded(0, 2));
    assert!(result.is_flooded(1, 3));
    for idx in result.flood_order() {
        assert!(!closed.blocked().contains_index(*idx));
    }
}

fn scoring_grid() -> Grid {
    Grid::new(
        3,
        3,
        vec![Terrain::Open; 9],
        vec![
            ProtectedPoint::new(1, 1, Category::HazardFacility),
            ProtectedPoint::new(0, 1, Category::Residence),
            ProtectedPoint::new(1, 2, Category::Residence),
            ProtectedPoint::new(2, 2, Category::Residence),
            ProtectedPoint::new(2, 0, Category::CriticalFacility),
        ],
    )
    .unwrap()
}

#[test]
fn test_score_breakdown() {
    let grid = scoring_grid();
    let flooded = CellMask::from_iter(3, 3, [(1, 1), (0, 1)]).unwrap();
    let barriers = grid.empty_mask();

    let breakdown = score_outcome(&grid, &barriers, &flooded, &ScoreWeights::default());
    assert_eq!(breakdown.dry_land, 7);
    assert_eq!(breakdown.residences_safe, 2);
    assert_eq!(breakdown.critical_safe, 1);
    assert_eq!(breakdown.hazards_flooded, 1);
    assert_eq!(breakdown.residences_exposed, 2);
    assert_eq!(breakdown.total, 16);

    let weights = ScoreWeights {
        residence_bonus: 1,
        critical_facility_bonus: 2,
        hazard_penalty: 0,
        hazard_exposure_penalty: 0,
    };
    assert_eq!(score_outcome(&grid, &barriers, &flooded, &weights).total, 11);
}

#[test]
fn test_barrier_cells_are_not_dry_land() {
    let grid = scoring_grid();
    let flooded = grid.empty_mask();
    let barriers = CellMask::from_iter(3, 3, [(0, 0), (0, 2)]).unwrap();
    let breakdown = score_outcome(&grid, &barriers, &flooded, &ScoreWeights::default());
    assert_eq!(breakdown.dry_land, 7);
    assert_eq!(breakdown.hazards_flooded, 0);
    assert_eq!(breakdown.total, 7 + 3 * 3 + 10);
}
