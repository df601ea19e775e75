#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Weighted A* search over the spatial grid.
//!
//! Searches are synchronous and bounded by an iteration budget rather than
//! wall-clock time, so a failed search costs the same on every machine. Each
//! call builds its own working state; the grid is only read.

mod config;
mod frontier;

use std::collections::{HashMap, HashSet};

use tilepath_core::{Cell, Path, PathOutcome, TerrainCosts};
use tilepath_grid::SpatialGrid;
use tracing::{debug, warn};

pub use config::{PathfinderConfig, PathfinderError, MAX_ITERATIONS};

use crate::frontier::Frontier;

/// Counters describing the work performed by a single search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Frontier pops, including outdated entries; bounded by the budget.
    pub iterations: u32,
    /// Cells finalised and expanded.
    pub expanded: u32,
    /// Entries pushed onto the frontier.
    pub frontier_pushes: u64,
}

/// Least-cost path search with a fixed cost table and iteration budget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pathfinder {
    costs: TerrainCosts,
    max_iterations: u32,
}

impl Pathfinder {
    /// Creates a pathfinder from validated settings.
    pub fn new(config: PathfinderConfig) -> Result<Self, PathfinderError> {
        config::validate(&config)?;
        Ok(Self {
            costs: config.costs,
            max_iterations: config.max_iterations,
        })
    }

    /// Cost table used to price cells.
    #[must_use]
    pub const fn costs(&self) -> &TerrainCosts {
        &self.costs
    }

    /// Frontier pops allowed per search.
    #[must_use]
    pub const fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Finds the least-cost path from `source` to `target`.
    ///
    /// Only in-bounds neighbours are expanded, so a target outside the grid
    /// bounds is never reached. Repeated calls on an unchanged grid return the
    /// same path.
    #[must_use]
    pub fn shortest_path(&self, grid: &SpatialGrid, source: Cell, target: Cell) -> PathOutcome {
        self.shortest_path_with_stats(grid, source, target).0
    }

    /// Same as [`Pathfinder::shortest_path`], also reporting search counters.
    ///
    /// The frontier is ordered by `g + h` where `h` is the squared Euclidean
    /// distance to the target. That estimate is not admissible once cells cost
    /// more than one unit per step, so under heavy terrain the returned path
    /// is not guaranteed to be optimal.
    #[must_use]
    pub fn shortest_path_with_stats(
        &self,
        grid: &SpatialGrid,
        source: Cell,
        target: Cell,
    ) -> (PathOutcome, SearchStats) {
        let mut frontier = Frontier::default();
        let mut visited: HashSet<Cell> = HashSet::new();
        let mut best_distance: HashMap<Cell, f32> = HashMap::new();
        let mut predecessor: HashMap<Cell, Cell> = HashMap::new();
        let mut stats = SearchStats::default();

        let _ = best_distance.insert(source, 0.0);
        frontier.push(source, estimate(source, target));

        let mut reached = false;
        while stats.iterations < self.max_iterations {
            let Some(current) = frontier.pop() else {
                break;
            };
            stats.iterations += 1;

            if current == target {
                reached = true;
                break;
            }
            if !visited.insert(current) {
                continue;
            }
            let Some(&distance) = best_distance.get(&current) else {
                continue;
            };
            stats.expanded += 1;

            for neighbor in grid.neighbors_in_bounds(current) {
                if visited.contains(&neighbor) {
                    continue;
                }

                let candidate = distance + self.edge_cost(grid, current, neighbor);
                let improves = best_distance
                    .get(&neighbor)
                    .map_or(true, |known| candidate < *known);
                if improves {
                    let _ = best_distance.insert(neighbor, candidate);
                    let _ = predecessor.insert(neighbor, current);
                    frontier.push(neighbor, candidate + estimate(neighbor, target));
                }
            }
        }
        stats.frontier_pushes = frontier.pushes();

        if !reached {
            if stats.iterations >= self.max_iterations && !frontier.is_empty() {
                warn!(
                    ?source,
                    ?target,
                    max_iterations = self.max_iterations,
                    "search stopped by iteration budget"
                );
            }
            debug!(?source, ?target, iterations = stats.iterations, "no path found");
            return (PathOutcome::NotFound, stats);
        }

        let cost = best_distance.get(&target).copied().unwrap_or_default();
        let cells = unwind(&predecessor, source, target);
        debug!(
            ?source,
            ?target,
            iterations = stats.iterations,
            length = cells.len(),
            cost,
            "path found"
        );
        let outcome = Path::new(cells, cost).map_or(PathOutcome::NotFound, PathOutcome::Found);
        (outcome, stats)
    }

    /// Cells of the least-cost path, discarding its cost.
    #[must_use]
    pub fn find_path(&self, grid: &SpatialGrid, source: Cell, target: Cell) -> Option<Vec<Cell>> {
        self.shortest_path(grid, source, target)
            .into_path()
            .map(Path::into_cells)
    }

    /// Total cost of the least-cost path, or `None` when no path was found.
    #[must_use]
    pub fn find_distance(&self, grid: &SpatialGrid, source: Cell, target: Cell) -> Option<f32> {
        self.shortest_path(grid, source, target).cost()
    }

    /// Reports whether the search reaches `target` within the budget.
    #[must_use]
    pub fn path_exists(&self, grid: &SpatialGrid, source: Cell, target: Cell) -> bool {
        self.shortest_path(grid, source, target).is_found()
    }

    /// Terrain weight of a single cell.
    #[must_use]
    pub fn cell_cost(&self, grid: &SpatialGrid, cell: Cell) -> f32 {
        self.costs
            .cost_of(grid.occupant_at(cell).map(|occupant| occupant.kind()))
    }

    /// Cost of stepping between two adjacent cells.
    ///
    /// The move is priced by the more expensive of its two endpoints, so
    /// leaving an obstacle costs as much as entering one.
    #[must_use]
    pub fn edge_cost(&self, grid: &SpatialGrid, from: Cell, to: Cell) -> f32 {
        self.cell_cost(grid, from).max(self.cell_cost(grid, to)) * grid.cell_size()
    }
}

impl Default for Pathfinder {
    fn default() -> Self {
        Self {
            costs: TerrainCosts::STANDARD,
            max_iterations: MAX_ITERATIONS,
        }
    }
}

/// Finds the least-cost path with the standard cost table and budget.
#[must_use]
pub fn shortest_path(grid: &SpatialGrid, source: Cell, target: Cell) -> PathOutcome {
    Pathfinder::default().shortest_path(grid, source, target)
}

/// Cells of the least-cost path with the standard cost table and budget.
#[must_use]
pub fn find_path(grid: &SpatialGrid, source: Cell, target: Cell) -> Option<Vec<Cell>> {
    Pathfinder::default().find_path(grid, source, target)
}

/// Cost of the least-cost path with the standard cost table and budget.
#[must_use]
pub fn find_distance(grid: &SpatialGrid, source: Cell, target: Cell) -> Option<f32> {
    Pathfinder::default().find_distance(grid, source, target)
}

/// Reports whether a path exists with the standard cost table and budget.
#[must_use]
pub fn path_exists(grid: &SpatialGrid, source: Cell, target: Cell) -> bool {
    Pathfinder::default().path_exists(grid, source, target)
}

fn estimate(from: Cell, to: Cell) -> f32 {
    from.squared_distance(to) as f32
}

// A cell's predecessor is fixed once the predecessor itself is finalised, so
// walking back from the target always ends at the source.
fn unwind(predecessor: &HashMap<Cell, Cell>, source: Cell, target: Cell) -> Vec<Cell> {
    let mut cells = vec![target];
    let mut cursor = target;
    while cursor != source {
        let Some(&previous) = predecessor.get(&cursor) else {
            break;
        };
        cells.push(previous);
        cursor = previous;
    }
    cells.reverse();
    cells
}
