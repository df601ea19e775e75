#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Debug visualisation contracts for Tilepath adapters.
//!
//! Nothing here draws. Paths are turned into world-space line segments and
//! handed to a [`DebugDraw`] sink supplied by the host engine, or flattened
//! into a text map for terminals.

use glam::Vec3;
use tilepath_core::{Cell, OccupantKind};
use tilepath_grid::SpatialGrid;

/// RGBA color used when presenting debug overlays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque red, the conventional path debug color.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// World-space line between two consecutive path cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    /// Center of the earlier cell.
    pub start: Vec3,
    /// Center of the later cell.
    pub end: Vec3,
}

/// Sink for debug lines, implemented by the host engine or a test recorder.
pub trait DebugDraw {
    /// Draws a single line segment.
    fn draw_line(&mut self, segment: LineSegment, color: Color);
}

/// Turns paths into connected line segments between cell centers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathOverlay {
    color: Color,
    depth: f32,
}

impl PathOverlay {
    /// Creates an overlay drawing in `color` at world depth `depth`.
    #[must_use]
    pub const fn new(color: Color, depth: f32) -> Self {
        Self { color, depth }
    }

    /// Segments joining the centers of consecutive cells.
    ///
    /// Paths with fewer than two cells produce no segments.
    #[must_use]
    pub fn segments(&self, grid: &SpatialGrid, cells: &[Cell]) -> Vec<LineSegment> {
        cells
            .windows(2)
            .map(|pair| LineSegment {
                start: grid.cell_center_world(pair[0], self.depth),
                end: grid.cell_center_world(pair[1], self.depth),
            })
            .collect()
    }

    /// Hands every segment of the path to the sink and returns how many were
    /// drawn.
    pub fn draw<D>(&self, grid: &SpatialGrid, cells: &[Cell], sink: &mut D) -> usize
    where
        D: DebugDraw + ?Sized,
    {
        let segments = self.segments(grid, cells);
        for segment in &segments {
            sink.draw_line(*segment, self.color);
        }
        segments.len()
    }
}

impl Default for PathOverlay {
    fn default() -> Self {
        Self::new(Color::RED, 0.0)
    }
}

/// Largest number of cells [`ascii_map`] renders.
pub const MAX_MAP_CELLS: u64 = 1 << 20;

/// Errors raised while flattening the grid into text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    /// The visible bounds hold more cells than a text map may show.
    #[error(
        "visible bounds of {width}x{height} cells exceed the {limit} cell map limit",
        limit = MAX_MAP_CELLS
    )]
    TooLarge {
        /// Columns in the visible bounds.
        width: u64,
        /// Rows in the visible bounds.
        height: u64,
    },
}

/// Renders the visible bounds as text, north at the top.
///
/// `.` marks empty cells, `T` towers, `#` walls, `o` other occupants and `*`
/// path cells; the path's first and last cells are drawn as `S` and `E`.
/// Bounds larger than [`MAX_MAP_CELLS`] are refused.
pub fn ascii_map(grid: &SpatialGrid, path: Option<&[Cell]>) -> Result<String, MapError> {
    let bounds = grid.bounds();
    if bounds.area() > MAX_MAP_CELLS {
        return Err(MapError::TooLarge {
            width: bounds.width(),
            height: bounds.height(),
        });
    }
    let bottom_left = bounds.bottom_left();
    let top_right = bounds.top_right();
    let path = path.unwrap_or(&[]);

    let mut map = String::new();
    for y in (bottom_left.y()..=top_right.y()).rev() {
        for x in bottom_left.x()..=top_right.x() {
            let cell = Cell::new(x, y);
            map.push(glyph_for(grid, path, cell));
        }
        map.push('\n');
    }
    Ok(map)
}

fn glyph_for(grid: &SpatialGrid, path: &[Cell], cell: Cell) -> char {
    if path.first() == Some(&cell) {
        return 'S';
    }
    if path.last() == Some(&cell) {
        return 'E';
    }
    if path.contains(&cell) {
        return '*';
    }
    match grid.occupant_at(cell).map(|occupant| occupant.kind()) {
        None => '.',
        Some(OccupantKind::Tower) => 'T',
        Some(OccupantKind::Wall) => '#',
        Some(OccupantKind::Other) => 'o',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilepath_core::{Occupant, OccupantId};

    #[derive(Default)]
    struct Recorder {
        lines: Vec<(LineSegment, Color)>,
    }

    impl DebugDraw for Recorder {
        fn draw_line(&mut self, segment: LineSegment, color: Color) {
            self.lines.push((segment, color));
        }
    }

    fn grid_with_bounds(cell_size: f32, width: u32, height: u32) -> SpatialGrid {
        let mut grid = SpatialGrid::new(cell_size).expect("valid cell size");
        let _ = grid.recompute_bounds_if_viewport_changed(width, height, |pixel| pixel * cell_size);
        grid
    }

    #[test]
    fn segments_join_consecutive_cell_centers() {
        let grid = grid_with_bounds(2.0, 4, 4);
        let overlay = PathOverlay::new(Color::RED, -1.0);
        let cells = [Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)];

        assert_eq!(
            overlay.segments(&grid, &cells),
            vec![
                LineSegment {
                    start: Vec3::new(1.0, 1.0, -1.0),
                    end: Vec3::new(3.0, 1.0, -1.0),
                },
                LineSegment {
                    start: Vec3::new(3.0, 1.0, -1.0),
                    end: Vec3::new(3.0, 3.0, -1.0),
                },
            ]
        );
    }

    #[test]
    fn single_cell_paths_draw_nothing() {
        let grid = grid_with_bounds(1.0, 2, 2);
        let mut recorder = Recorder::default();

        let drawn = PathOverlay::default().draw(&grid, &[Cell::new(0, 0)], &mut recorder);

        assert_eq!(drawn, 0);
        assert!(recorder.lines.is_empty());
    }

    #[test]
    fn draw_forwards_segments_with_overlay_color() {
        let grid = grid_with_bounds(1.0, 3, 1);
        let color = Color::from_rgb_u8(0, 255, 0);
        let mut recorder = Recorder::default();

        let drawn = PathOverlay::new(color, 0.0).draw(
            &grid,
            &[Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)],
            &mut recorder,
        );

        assert_eq!(drawn, 2);
        assert!(recorder.lines.iter().all(|(_, drawn_color)| *drawn_color == color));
    }

    #[test]
    fn ascii_map_marks_occupants_and_path() {
        let mut grid = grid_with_bounds(1.0, 3, 2);
        let _ = grid.set_occupant(
            Cell::new(1, 0),
            Some(Occupant::new(OccupantId::new(1), OccupantKind::Wall)),
        );
        let path = [
            Cell::new(0, 0),
            Cell::new(0, 1),
            Cell::new(1, 1),
            Cell::new(2, 1),
            Cell::new(2, 0),
        ];

        assert_eq!(ascii_map(&grid, Some(&path)), Ok("***\nS#E\n".to_owned()));
    }

    #[test]
    fn ascii_map_without_path_shows_only_occupants() {
        let mut grid = grid_with_bounds(1.0, 2, 1);
        let _ = grid.set_occupant(
            Cell::new(0, 0),
            Some(Occupant::new(OccupantId::new(4), OccupantKind::Tower)),
        );

        assert_eq!(ascii_map(&grid, None), Ok("T.\n".to_owned()));
    }

    #[test]
    fn ascii_map_refuses_oversized_bounds() {
        let grid = grid_with_bounds(1.0, 2048, 1024);

        assert_eq!(
            ascii_map(&grid, None),
            Err(MapError::TooLarge {
                width: 2048,
                height: 1024,
            })
        );
    }

    #[test]
    fn ascii_map_renders_bounds_at_the_limit() {
        let grid = grid_with_bounds(1.0, 1024, 1024);

        let map = ascii_map(&grid, None).expect("map at the limit");

        assert_eq!(map.lines().count(), 1024);
        assert!(map.lines().all(|row| row.len() == 1024));
    }
}
