use tilepath_core::{Cell, Occupant, OccupantId, OccupantKind, PathOutcome};
use tilepath_grid::SpatialGrid;
use tilepath_system_pathfinding::{
    find_distance, find_path, path_exists, shortest_path, Pathfinder, PathfinderConfig,
    MAX_ITERATIONS,
};

fn bounded_grid(width: u32, height: u32) -> SpatialGrid {
    let mut grid = SpatialGrid::new(1.0).expect("valid cell size");
    let _ = grid.recompute_bounds_if_viewport_changed(width, height, |pixel| pixel);
    grid
}

fn wall(id: u32) -> Option<Occupant> {
    Some(Occupant::new(OccupantId::new(id), OccupantKind::Wall))
}

fn cells(coords: &[(i32, i32)]) -> Vec<Cell> {
    coords.iter().map(|&(x, y)| Cell::new(x, y)).collect()
}

#[test]
fn open_strip_costs_one_per_step() {
    let grid = bounded_grid(3, 1);

    let outcome = shortest_path(&grid, Cell::new(0, 0), Cell::new(2, 0));
    let path = outcome.path().expect("open strip is traversable");

    assert_eq!(path.cells(), cells(&[(0, 0), (1, 0), (2, 0)]).as_slice());
    assert_eq!(path.cost(), 2.0);
}

#[test]
fn wall_on_the_only_route_is_crossed_at_forty_times_the_cost() {
    let mut grid = bounded_grid(3, 1);
    let _ = grid.set_occupant(Cell::new(1, 0), wall(1));

    let path = shortest_path(&grid, Cell::new(0, 0), Cell::new(2, 0))
        .into_path()
        .expect("walls are expensive, not impassable");

    assert_eq!(path.cells(), cells(&[(0, 0), (1, 0), (2, 0)]).as_slice());
    assert_eq!(path.cost(), 80.0);
}

#[test]
fn wall_with_an_open_alternative_forces_a_detour() {
    let mut grid = bounded_grid(3, 2);
    let _ = grid.set_occupant(Cell::new(1, 0), wall(1));

    let path = shortest_path(&grid, Cell::new(0, 0), Cell::new(2, 0))
        .into_path()
        .expect("detour exists");

    assert_eq!(
        path.cells(),
        cells(&[(0, 0), (0, 1), (1, 1), (2, 1), (2, 0)]).as_slice()
    );
    assert_eq!(path.cost(), 4.0);
}

#[test]
fn clearing_the_obstacle_restores_the_direct_route() {
    let mut grid = bounded_grid(3, 2);
    let _ = grid.set_occupant(Cell::new(1, 0), wall(1));
    let detour = find_distance(&grid, Cell::new(0, 0), Cell::new(2, 0));
    let revision = grid.revision();

    let _ = grid.remove_occupant(Cell::new(1, 0));
    assert!(grid.changed_since(revision));

    let direct = find_distance(&grid, Cell::new(0, 0), Cell::new(2, 0));
    assert_eq!(detour, Some(4.0));
    assert_eq!(direct, Some(2.0));
}

#[test]
fn same_source_and_target_is_a_single_cell_path() {
    let grid = bounded_grid(4, 4);
    let cell = Cell::new(2, 1);

    let path = shortest_path(&grid, cell, cell).into_path().expect("trivial path");

    assert_eq!(path.cells(), &[cell]);
    assert_eq!(path.cost(), 0.0);
}

#[test]
fn target_outside_bounds_is_never_reached() {
    let grid = bounded_grid(3, 3);
    let pathfinder = Pathfinder::default();

    let (outcome, stats) =
        pathfinder.shortest_path_with_stats(&grid, Cell::new(0, 0), Cell::new(5, 0));

    assert_eq!(outcome, PathOutcome::NotFound);
    assert!(stats.iterations < MAX_ITERATIONS, "frontier should empty first");
    assert_eq!(stats.expanded, 9);
}

#[test]
fn source_outside_bounds_can_still_step_inside() {
    let grid = bounded_grid(3, 1);

    let path = find_path(&grid, Cell::new(-1, 0), Cell::new(1, 0)).expect("path");

    assert_eq!(path, cells(&[(-1, 0), (0, 0), (1, 0)]));
}

#[test]
fn out_of_bounds_target_on_a_large_grid_exhausts_the_iteration_budget() {
    let grid = bounded_grid(200, 200);

    let (outcome, stats) = Pathfinder::default().shortest_path_with_stats(
        &grid,
        Cell::new(100, 100),
        Cell::new(500, 500),
    );

    assert_eq!(outcome, PathOutcome::NotFound);
    assert_eq!(stats.iterations, MAX_ITERATIONS);
    assert!(stats.expanded <= MAX_ITERATIONS);
}

#[test]
fn small_budget_gives_up_before_a_reachable_target() {
    let grid = bounded_grid(50, 1);
    let config = PathfinderConfig {
        max_iterations: 5,
        ..PathfinderConfig::default()
    };
    let limited = Pathfinder::new(config).expect("valid config");

    assert!(!limited.path_exists(&grid, Cell::new(0, 0), Cell::new(49, 0)));
    assert!(path_exists(&grid, Cell::new(0, 0), Cell::new(49, 0)));
    assert_eq!(find_distance(&grid, Cell::new(0, 0), Cell::new(49, 0)), Some(49.0));
}

#[test]
fn distance_is_none_when_no_path_exists() {
    let grid = bounded_grid(2, 2);

    assert_eq!(find_distance(&grid, Cell::new(0, 0), Cell::new(-4, 0)), None);
    assert_eq!(find_path(&grid, Cell::new(0, 0), Cell::new(-4, 0)), None);
}

#[test]
fn cell_size_scales_path_cost() {
    let mut grid = SpatialGrid::new(0.5).expect("valid cell size");
    let _ = grid.recompute_bounds_if_viewport_changed(2, 1, |pixel| pixel * 0.5);

    assert_eq!(grid.top_right(), Cell::new(1, 0));
    assert_eq!(find_distance(&grid, Cell::new(0, 0), Cell::new(1, 0)), Some(0.5));
}

#[test]
fn custom_costs_change_the_preferred_route() {
    let mut grid = bounded_grid(3, 2);
    let _ = grid.set_occupant(Cell::new(1, 0), wall(1));
    let mut config = PathfinderConfig::default();
    config.costs.wall = 1.0;
    let pathfinder = Pathfinder::new(config).expect("valid config");

    let path = pathfinder
        .find_path(&grid, Cell::new(0, 0), Cell::new(2, 0))
        .expect("path");

    assert_eq!(path, cells(&[(0, 0), (1, 0), (2, 0)]));
}
