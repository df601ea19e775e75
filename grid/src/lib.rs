#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative spatial grid index for Tilepath.
//!
//! The grid owns the sparse cell -> occupant mapping, the bounds of the
//! currently visible region and the conversions between world space and
//! cells. Pathfinding systems only read it; placement and combat logic mutate
//! it through [`SpatialGrid::set_occupant`] or by submitting commands to
//! [`apply`].

mod config;
mod coords;

use std::collections::HashMap;

use glam::{Vec2, Vec3};
use tilepath_core::{
    Cell, CellBounds, Command, Event, Occupant, Revision, NEIGHBOR_DIRECTIONS,
};
use tracing::{debug, trace, warn};

pub use config::{GridConfig, GridError, DEFAULT_CELL_SIZE};

/// Sparse occupancy index over an unbounded integer grid.
///
/// Only occupied cells are stored; clearing a cell removes its entry. The
/// visible bounds gate neighbour generation but never storage, so occupants
/// may be placed anywhere.
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    occupancy: HashMap<Cell, Occupant>,
    cell_size: f32,
    bounds: CellBounds,
    viewport: (u32, u32),
    revision: Revision,
}

impl SpatialGrid {
    /// Creates an empty grid whose cells span `cell_size` world units.
    ///
    /// Bounds start as the single cell at the origin until the first viewport
    /// is observed.
    pub fn new(cell_size: f32) -> Result<Self, GridError> {
        let cell_size = config::validate_cell_size(cell_size)?;
        Ok(Self {
            occupancy: HashMap::new(),
            cell_size,
            bounds: CellBounds::default(),
            viewport: (0, 0),
            revision: Revision::INITIAL,
        })
    }

    /// Creates an empty grid from deserialised settings.
    pub fn from_config(config: &GridConfig) -> Result<Self, GridError> {
        Self::new(config.cell_size)
    }

    /// World units spanned by one cell edge.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell containing the provided world position.
    #[must_use]
    pub fn cell_of(&self, world: Vec2) -> Cell {
        coords::cell_of(world, self.cell_size)
    }

    /// World position of the cell's minimum corner at depth `z`.
    #[must_use]
    pub fn cell_corner_world(&self, cell: Cell, z: f32) -> Vec3 {
        coords::cell_corner(cell, self.cell_size, z)
    }

    /// World position of the cell's center at depth `z`.
    #[must_use]
    pub fn cell_center_world(&self, cell: Cell, z: f32) -> Vec3 {
        coords::cell_center(cell, self.cell_size, z)
    }

    /// Snaps a world position to the corner of its cell, keeping its depth.
    #[must_use]
    pub fn snap_to_cell_corner(&self, world: Vec3) -> Vec3 {
        self.cell_corner_world(self.cell_of(world.truncate()), world.z)
    }

    /// Snaps a world position to the center of its cell, keeping its depth.
    #[must_use]
    pub fn snap_to_cell_center(&self, world: Vec3) -> Vec3 {
        self.cell_center_world(self.cell_of(world.truncate()), world.z)
    }

    /// Cell under a viewport pixel, such as the pointer position.
    #[must_use]
    pub fn cell_at_viewport<F>(&self, pixel: Vec2, viewport_to_world: F) -> Cell
    where
        F: Fn(Vec2) -> Vec2,
    {
        self.cell_of(viewport_to_world(pixel))
    }

    /// Refreshes the visible bounds when the viewport dimensions changed.
    ///
    /// The bottom-left and top-right viewport pixels are projected into world
    /// space and converted to cells; the corners are normalised so the bounds
    /// stay ordered even when the projection flips an axis. Returns `true`
    /// when the bounds were recomputed. Callers drive this once per tick.
    pub fn recompute_bounds_if_viewport_changed<F>(
        &mut self,
        width: u32,
        height: u32,
        viewport_to_world: F,
    ) -> bool
    where
        F: Fn(Vec2) -> Vec2,
    {
        if self.viewport == (width, height) {
            return false;
        }
        self.viewport = (width, height);

        let last_pixel = Vec2::new(
            width.saturating_sub(1) as f32,
            height.saturating_sub(1) as f32,
        );
        let first = self.cell_of(viewport_to_world(Vec2::ZERO));
        let last = self.cell_of(viewport_to_world(last_pixel));
        self.bounds = CellBounds::from_corners(first, last);

        debug!(
            width,
            height,
            bottom_left = ?self.bounds.bottom_left(),
            top_right = ?self.bounds.top_right(),
            "recomputed visible bounds"
        );
        true
    }

    /// Currently visible region.
    #[must_use]
    pub const fn bounds(&self) -> CellBounds {
        self.bounds
    }

    /// Visible corner with the smallest coordinates.
    #[must_use]
    pub const fn bottom_left(&self) -> Cell {
        self.bounds.bottom_left()
    }

    /// Visible corner with the largest coordinates.
    #[must_use]
    pub const fn top_right(&self) -> Cell {
        self.bounds.top_right()
    }

    /// Inclusive test against the visible bounds.
    #[must_use]
    pub fn is_within_bounds(&self, cell: Cell) -> bool {
        self.bounds.contains(cell)
    }

    /// Occupant stored at the cell, if any.
    #[must_use]
    pub fn occupant_at(&self, cell: Cell) -> Option<Occupant> {
        self.occupancy.get(&cell).copied()
    }

    /// Reports whether the cell holds an occupant.
    #[must_use]
    pub fn has_occupant(&self, cell: Cell) -> bool {
        self.occupancy.contains_key(&cell)
    }

    /// Stores, replaces or (with `None`) removes the occupant of a cell and
    /// returns whatever occupied it before.
    ///
    /// Every call advances the revision, including removals from a cell that
    /// was already empty: the revision records that a mutation was attempted,
    /// not that the map changed.
    pub fn set_occupant(&mut self, cell: Cell, occupant: Option<Occupant>) -> Option<Occupant> {
        self.revision = self.revision.next();
        let previous = match occupant {
            Some(occupant) => self.occupancy.insert(cell, occupant),
            None => self.occupancy.remove(&cell),
        };

        trace!(
            ?cell,
            ?occupant,
            ?previous,
            revision = self.revision.get(),
            "occupancy updated"
        );
        previous
    }

    /// Clears the cell, returning the removed occupant.
    pub fn remove_occupant(&mut self, cell: Cell) -> Option<Occupant> {
        self.set_occupant(cell, None)
    }

    /// In-bounds orthogonal neighbours in east, south, west, north order.
    pub fn neighbors_in_bounds(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        NEIGHBOR_DIRECTIONS
            .into_iter()
            .filter_map(move |direction| cell.checked_offset(direction))
            .filter(move |neighbor| self.bounds.contains(*neighbor))
    }

    /// Revision stamped by the most recent occupancy mutation.
    #[must_use]
    pub const fn revision(&self) -> Revision {
        self.revision
    }

    /// Reports whether occupancy was touched after `revision` was observed.
    #[must_use]
    pub fn changed_since(&self, revision: Revision) -> bool {
        self.revision > revision
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupant_count(&self) -> usize {
        self.occupancy.len()
    }

    /// Occupied cells sorted by coordinate.
    #[must_use]
    pub fn occupied_cells(&self) -> Vec<(Cell, Occupant)> {
        let mut cells: Vec<_> = self
            .occupancy
            .iter()
            .map(|(cell, occupant)| (*cell, *occupant))
            .collect();
        cells.sort_by_key(|(cell, _)| *cell);
        cells
    }
}

/// Applies the provided command to the grid, emitting the resulting events.
pub fn apply(grid: &mut SpatialGrid, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::PlaceOccupant { cell, occupant } => {
            let replaced = grid.set_occupant(cell, Some(occupant));
            out_events.push(Event::OccupantPlaced {
                cell,
                occupant,
                replaced,
            });
        }
        Command::ClearCell { cell } => {
            let previous = grid.remove_occupant(cell);
            out_events.push(Event::CellCleared { cell, previous });
        }
        Command::ResizeViewport {
            width,
            height,
            camera,
        } => {
            if !camera.is_projectable() {
                warn!(?camera, width, height, "ignoring viewport with degenerate camera");
                return;
            }
            let recomputed = grid.recompute_bounds_if_viewport_changed(width, height, |pixel| {
                camera.viewport_to_world(pixel, width, height)
            });
            if recomputed {
                out_events.push(Event::BoundsChanged {
                    bounds: grid.bounds(),
                });
            }
        }
    }
}
