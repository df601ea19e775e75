//! Pure conversions between continuous world positions and discrete cells.

use glam::{Vec2, Vec3};
use tilepath_core::Cell;

/// Cell containing the provided world position.
pub(crate) fn cell_of(world: Vec2, cell_size: f32) -> Cell {
    Cell::new(
        axis_to_cell(world.x, cell_size),
        axis_to_cell(world.y, cell_size),
    )
}

/// World position of the cell's minimum corner at depth `z`.
pub(crate) fn cell_corner(cell: Cell, cell_size: f32, z: f32) -> Vec3 {
    Vec3::new(cell.x() as f32 * cell_size, cell.y() as f32 * cell_size, z)
}

/// World position of the cell's center at depth `z`.
pub(crate) fn cell_center(cell: Cell, cell_size: f32, z: f32) -> Vec3 {
    let half_cell = cell_size * 0.5;
    cell_corner(cell, cell_size, z) + Vec3::new(half_cell, half_cell, 0.0)
}

// Float-to-int casts saturate, so far-away positions clamp to the edge cells.
fn axis_to_cell(coord: f32, cell_size: f32) -> i32 {
    (coord / cell_size).floor() as i32
}
