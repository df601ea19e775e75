//! TOML scenario files replayed by the command-line adapter.

use std::{fs, path::Path};

use anyhow::{ensure, Context, Result};
use glam::Vec2;
use serde::Deserialize;
use tilepath_core::{Cell, Command, Occupant, OccupantId, OccupantKind, OrthographicCamera};
use tilepath_grid::GridConfig;
use tilepath_system_pathfinding::PathfinderConfig;

/// Grid settings, viewport, occupants and search endpoints loaded from disk.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Scenario {
    #[serde(default)]
    pub(crate) grid: GridConfig,
    pub(crate) viewport: ViewportConfig,
    #[serde(default)]
    pub(crate) pathfinder: PathfinderConfig,
    #[serde(default)]
    pub(crate) search: SearchConfig,
    #[serde(default)]
    pub(crate) occupants: Vec<OccupantPlacement>,
}

/// Viewport dimensions and the orthographic camera looking at the grid.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ViewportConfig {
    pub(crate) width: u32,
    pub(crate) height: u32,
    #[serde(default)]
    pub(crate) center: [f32; 2],
    #[serde(default = "default_pixels_per_unit")]
    pub(crate) pixels_per_unit: f32,
}

/// Endpoints searched when the command line does not override them.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SearchConfig {
    pub(crate) source: Option<Cell>,
    pub(crate) target: Option<Cell>,
}

/// Occupant placed on the grid before searching.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct OccupantPlacement {
    pub(crate) cell: Cell,
    pub(crate) kind: OccupantKind,
    /// Explicit identifier; defaults to the placement's 1-based position.
    #[serde(default)]
    pub(crate) id: Option<u32>,
}

fn default_pixels_per_unit() -> f32 {
    1.0
}

impl ViewportConfig {
    fn camera(&self) -> OrthographicCamera {
        OrthographicCamera::new(Vec2::from(self.center), self.pixels_per_unit)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.camera().is_projectable(),
            "viewport camera must have a finite center and a finite, non-zero \
             pixels_per_unit (received center {:?}, pixels_per_unit {})",
            self.center,
            self.pixels_per_unit
        );
        Ok(())
    }
}

impl Scenario {
    /// Reads and parses a scenario file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    /// Parses scenario TOML contents.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(contents).context("invalid scenario toml")?;
        scenario.viewport.validate()?;
        Ok(scenario)
    }

    /// Commands that bring an empty grid into the scenario's state: the
    /// viewport first, then every occupant in file order.
    pub(crate) fn commands(&self) -> Vec<Command> {
        let viewport = &self.viewport;
        let mut commands = Vec::with_capacity(self.occupants.len() + 1);
        commands.push(Command::ResizeViewport {
            width: viewport.width,
            height: viewport.height,
            camera: viewport.camera(),
        });

        for (index, placement) in self.occupants.iter().enumerate() {
            let fallback = u32::try_from(index + 1).unwrap_or(u32::MAX);
            let id = OccupantId::new(placement.id.unwrap_or(fallback));
            commands.push(Command::PlaceOccupant {
                cell: placement.cell,
                occupant: Occupant::new(id, placement.kind),
            });
        }
        commands
    }
}
