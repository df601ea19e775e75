#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tilepath crates.
//!
//! This crate defines the value types that connect adapters, the spatial grid
//! index and the pathfinding system. Adapters submit [`Command`] values
//! describing occupancy or viewport changes, the grid executes those commands
//! via its `apply` entry point, and then broadcasts [`Event`] values. Systems
//! read the grid and answer with [`PathOutcome`] values that callers own.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Discrete grid tile addressed by signed integer coordinates.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Cell {
    x: i32,
    y: i32,
}

impl Cell {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal cell index; grows towards the east.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical cell index; grows towards the north.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Cell one step away in the provided direction, unless the step leaves
    /// the representable coordinate range.
    #[must_use]
    pub fn checked_offset(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.delta();
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// Squared Euclidean distance between two cells.
    #[must_use]
    pub fn squared_distance(self, other: Cell) -> u64 {
        let dx = u64::from(self.x.abs_diff(other.x));
        let dy = u64::from(self.y.abs_diff(other.y));
        (dx * dx).saturating_add(dy * dy)
    }

    /// Reports whether `other` lies exactly one axis-aligned step away.
    #[must_use]
    pub fn is_adjacent_to(self, other: Cell) -> bool {
        u64::from(self.x.abs_diff(other.x)) + u64::from(self.y.abs_diff(other.y)) == 1
    }
}

/// Axis-aligned movement directions considered by neighbour generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing x.
    East,
    /// Movement toward decreasing y.
    South,
    /// Movement toward decreasing x.
    West,
    /// Movement toward increasing y.
    North,
}

impl Direction {
    /// Unit offset applied to a cell when stepping in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
            Self::North => (0, 1),
        }
    }
}

/// Neighbour offsets in generation order.
///
/// The order is observable: searches break priority ties by the order in
/// which neighbours were discovered.
pub const NEIGHBOR_DIRECTIONS: [Direction; 4] = [
    Direction::East,
    Direction::South,
    Direction::West,
    Direction::North,
];

/// Inclusive rectangle of cells spanned by two corners.
///
/// Deserialised bounds go through [`CellBounds::from_corners`], so the corners
/// are ordered whatever the input held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "CornerPair")]
pub struct CellBounds {
    bottom_left: Cell,
    top_right: Cell,
}

#[derive(Deserialize)]
struct CornerPair {
    bottom_left: Cell,
    top_right: Cell,
}

impl From<CornerPair> for CellBounds {
    fn from(corners: CornerPair) -> Self {
        Self::from_corners(corners.bottom_left, corners.top_right)
    }
}

impl CellBounds {
    /// Builds bounds from two arbitrary opposite corners.
    ///
    /// Coordinates are sorted per axis so that `bottom_left` never exceeds
    /// `top_right`, whatever orientation the projection produced.
    #[must_use]
    pub fn from_corners(a: Cell, b: Cell) -> Self {
        Self {
            bottom_left: Cell::new(a.x.min(b.x), a.y.min(b.y)),
            top_right: Cell::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Corner with the smallest coordinates.
    #[must_use]
    pub const fn bottom_left(&self) -> Cell {
        self.bottom_left
    }

    /// Corner with the largest coordinates.
    #[must_use]
    pub const fn top_right(&self) -> Cell {
        self.top_right
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        (self.bottom_left.x..=self.top_right.x).contains(&cell.x)
            && (self.bottom_left.y..=self.top_right.y).contains(&cell.y)
    }

    /// Number of cell columns covered by the bounds.
    ///
    /// Wide enough to count the full `i32` range, which spans 2^32 columns.
    #[must_use]
    pub fn width(&self) -> u64 {
        u64::from(self.top_right.x.abs_diff(self.bottom_left.x)) + 1
    }

    /// Number of cell rows covered by the bounds.
    #[must_use]
    pub fn height(&self) -> u64 {
        u64::from(self.top_right.y.abs_diff(self.bottom_left.y)) + 1
    }

    /// Number of cells covered by the bounds.
    #[must_use]
    pub fn area(&self) -> u64 {
        self.width().saturating_mul(self.height())
    }
}

/// Opaque identifier of an entity occupying a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OccupantId(u32);

impl OccupantId {
    /// Creates a new occupant identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Cost-relevant tag carried by every occupant.
///
/// Empty cells have no occupant at all, so there is no "empty" kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupantKind {
    /// Player-built tower.
    Tower,
    /// Static wall segment.
    Wall,
    /// Any other entity; priced with the default blocked cost.
    Other,
}

/// Handle stored by the grid for an occupied cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Occupant {
    id: OccupantId,
    kind: OccupantKind,
}

impl Occupant {
    /// Creates a new occupant handle.
    #[must_use]
    pub const fn new(id: OccupantId, kind: OccupantKind) -> Self {
        Self { id, kind }
    }

    /// Identifier assigned by the owning game system.
    #[must_use]
    pub const fn id(&self) -> OccupantId {
        self.id
    }

    /// Tag used for terrain cost lookup.
    #[must_use]
    pub const fn kind(&self) -> OccupantKind {
        self.kind
    }
}

/// Per-cell traversal weights keyed by occupant kind.
///
/// The table is built once and handed to the pathfinder by reference; edge
/// costs are derived from it and scaled by the grid's cell size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainCosts {
    /// Weight of a cell without an occupant.
    pub empty: f32,
    /// Weight of a cell holding a tower.
    pub tower: f32,
    /// Weight of a cell holding a wall.
    pub wall: f32,
    /// Weight of a cell holding any other occupant.
    pub other: f32,
}

impl TerrainCosts {
    /// Cost table used by the game: open ground is cheap, everything else is
    /// forty times more expensive.
    pub const STANDARD: Self = Self {
        empty: 1.0,
        tower: 40.0,
        wall: 40.0,
        other: 40.0,
    };

    /// Weight of a cell given its current occupant kind.
    #[must_use]
    pub const fn cost_of(&self, kind: Option<OccupantKind>) -> f32 {
        match kind {
            None => self.empty,
            Some(OccupantKind::Tower) => self.tower,
            Some(OccupantKind::Wall) => self.wall,
            Some(OccupantKind::Other) => self.other,
        }
    }
}

impl Default for TerrainCosts {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Monotonic stamp advanced whenever the grid occupancy is touched.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Revision(u64);

impl Revision {
    /// Revision of a freshly constructed grid.
    pub const INITIAL: Self = Self(0);

    /// Creates a revision wrapper around the provided counter value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the underlying counter value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Revision that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Least-cost route between two cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    cells: Vec<Cell>,
    cost: f32,
}

impl Path {
    /// Wraps an ordered cell sequence and its total cost.
    ///
    /// Returns `None` for an empty sequence: a path always contains at least
    /// its source.
    #[must_use]
    pub fn new(cells: Vec<Cell>, cost: f32) -> Option<Self> {
        if cells.is_empty() {
            return None;
        }
        Some(Self { cells, cost })
    }

    /// Cells from source to target, both inclusive.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Sum of the edge costs along the path.
    #[must_use]
    pub const fn cost(&self) -> f32 {
        self.cost
    }

    /// First cell of the path.
    #[must_use]
    pub fn source(&self) -> Cell {
        self.cells[0]
    }

    /// Last cell of the path.
    #[must_use]
    pub fn target(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    /// Number of cells in the path; never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; provided alongside [`Path::len`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Consumes the path, yielding the ordered cells.
    #[must_use]
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}

/// Result of a single shortest-path search.
#[derive(Clone, Debug, PartialEq)]
pub enum PathOutcome {
    /// The target was reached.
    Found(Path),
    /// The frontier emptied or the iteration budget ran out first.
    NotFound,
}

impl PathOutcome {
    /// Reports whether a path was found.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Borrows the found path, if any.
    #[must_use]
    pub const fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(path) => Some(path),
            Self::NotFound => None,
        }
    }

    /// Consumes the outcome, yielding the found path, if any.
    #[must_use]
    pub fn into_path(self) -> Option<Path> {
        match self {
            Self::Found(path) => Some(path),
            Self::NotFound => None,
        }
    }

    /// Total cost of the found path, if any.
    #[must_use]
    pub fn cost(&self) -> Option<f32> {
        self.path().map(Path::cost)
    }
}

/// Orthographic projection from viewport pixels to world space.
///
/// Pixel (0, 0) is the bottom-left corner of the viewport and the camera
/// center maps to the middle of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrthographicCamera {
    /// World position shown at the middle of the viewport.
    pub center: Vec2,
    /// Viewport pixels spanned by one world unit.
    pub pixels_per_unit: f32,
}

impl OrthographicCamera {
    /// Creates a camera looking at `center`.
    #[must_use]
    pub const fn new(center: Vec2, pixels_per_unit: f32) -> Self {
        Self {
            center,
            pixels_per_unit,
        }
    }

    /// Reports whether the camera maps pixels to finite world positions.
    ///
    /// A zero or non-finite zoom collapses the projection; a negative zoom
    /// only mirrors it.
    #[must_use]
    pub fn is_projectable(&self) -> bool {
        self.center.is_finite() && self.pixels_per_unit.is_finite() && self.pixels_per_unit != 0.0
    }

    /// Converts a viewport pixel into a world position.
    #[must_use]
    pub fn viewport_to_world(&self, pixel: Vec2, viewport_width: u32, viewport_height: u32) -> Vec2 {
        let half_viewport = Vec2::new(viewport_width as f32, viewport_height as f32) * 0.5;
        self.center + (pixel - half_viewport) / self.pixels_per_unit
    }
}

/// Commands that express all permissible grid mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Places (or replaces) the occupant stored at a cell.
    PlaceOccupant {
        /// Cell receiving the occupant.
        cell: Cell,
        /// Occupant to store.
        occupant: Occupant,
    },
    /// Removes whatever occupies a cell.
    ClearCell {
        /// Cell to clear.
        cell: Cell,
    },
    /// Reports the current viewport so the grid can refresh its bounds.
    ResizeViewport {
        /// Viewport width in pixels.
        width: u32,
        /// Viewport height in pixels.
        height: u32,
        /// Projection used to convert viewport corners into world space.
        camera: OrthographicCamera,
    },
}

/// Events broadcast by the grid after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that an occupant was stored at a cell.
    OccupantPlaced {
        /// Cell that received the occupant.
        cell: Cell,
        /// Occupant now stored at the cell.
        occupant: Occupant,
        /// Occupant that was displaced, if the cell was occupied.
        replaced: Option<Occupant>,
    },
    /// Confirms that a cell was cleared.
    CellCleared {
        /// Cell that was cleared.
        cell: Cell,
        /// Occupant that was removed, if the cell was occupied.
        previous: Option<Occupant>,
    },
    /// Announces that the visible bounds were recomputed.
    BoundsChanged {
        /// Bounds in effect after the viewport change.
        bounds: CellBounds,
    },
}
