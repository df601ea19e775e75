#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that replays a grid scenario and reports the
//! least-cost path through it.

mod scenario;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tilepath_core::{Cell, PathOutcome};
use tilepath_grid::{apply, SpatialGrid};
use tilepath_rendering::{ascii_map, Color, DebugDraw, LineSegment, PathOverlay};
use tilepath_system_pathfinding::Pathfinder;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::scenario::Scenario;

#[derive(Debug, Parser)]
#[command(
    name = "tilepath",
    about = "Replays a grid scenario and searches for the least-cost path"
)]
struct Cli {
    /// Scenario file describing the grid, viewport and occupants.
    scenario: PathBuf,
    /// Search source as `X,Y`; overrides the scenario.
    #[arg(long, value_parser = parse_cell, allow_hyphen_values = true)]
    from: Option<Cell>,
    /// Search target as `X,Y`; overrides the scenario.
    #[arg(long, value_parser = parse_cell, allow_hyphen_values = true)]
    to: Option<Cell>,
    /// Skip printing the text map of the visible bounds.
    #[arg(long)]
    no_map: bool,
    /// Print the debug line segments joining path cell centers.
    #[arg(long)]
    segments: bool,
    /// Log at debug level unless `RUST_LOG` is set.
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the Tilepath command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let scenario = Scenario::load(&cli.scenario)?;
    let mut grid =
        SpatialGrid::from_config(&scenario.grid).context("invalid grid configuration")?;
    let pathfinder =
        Pathfinder::new(scenario.pathfinder).context("invalid pathfinder configuration")?;

    let mut events = Vec::new();
    for command in scenario.commands() {
        apply(&mut grid, command, &mut events);
    }
    info!(
        events = events.len(),
        occupants = grid.occupant_count(),
        "scenario replayed"
    );

    let Some(source) = cli.from.or(scenario.search.source) else {
        bail!("no search source: pass --from or set search.source in the scenario");
    };
    let Some(target) = cli.to.or(scenario.search.target) else {
        bail!("no search target: pass --to or set search.target in the scenario");
    };

    let (outcome, stats) = pathfinder.shortest_path_with_stats(&grid, source, target);
    info!(
        iterations = stats.iterations,
        expanded = stats.expanded,
        frontier_pushes = stats.frontier_pushes,
        "search finished"
    );

    let path_cells = outcome.path().map(|path| path.cells());
    if !cli.no_map {
        match ascii_map(&grid, path_cells) {
            Ok(map) => print!("{map}"),
            Err(error) => warn!(%error, "map skipped"),
        }
    }

    match &outcome {
        PathOutcome::Found(path) => {
            println!("path of {} cells, cost {:.2}", path.len(), path.cost());
            println!("{}", format_cells(path.cells()));
            if cli.segments {
                let mut printer = SegmentPrinter;
                let _ = PathOverlay::default().draw(&grid, path.cells(), &mut printer);
            }
        }
        PathOutcome::NotFound => {
            println!(
                "no path from {} to {} within {} iterations",
                format_cell(source),
                format_cell(target),
                pathfinder.max_iterations()
            );
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_cell(value: &str) -> Result<Cell, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but received `{value}`"))?;
    let x = x
        .trim()
        .parse()
        .map_err(|error| format!("invalid x coordinate `{x}`: {error}"))?;
    let y = y
        .trim()
        .parse()
        .map_err(|error| format!("invalid y coordinate `{y}`: {error}"))?;
    Ok(Cell::new(x, y))
}

fn format_cell(cell: Cell) -> String {
    format!("({}, {})", cell.x(), cell.y())
}

fn format_cells(cells: &[Cell]) -> String {
    cells
        .iter()
        .map(|cell| format_cell(*cell))
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Debug sink that prints every segment to stdout.
struct SegmentPrinter;

impl DebugDraw for SegmentPrinter {
    fn draw_line(&mut self, segment: LineSegment, color: Color) {
        println!(
            "line ({:.2}, {:.2}) -> ({:.2}, {:.2}) rgba({:.2}, {:.2}, {:.2}, {:.2})",
            segment.start.x,
            segment.start.y,
            segment.end.x,
            segment.end.y,
            color.red,
            color.green,
            color.blue,
            color.alpha
        );
    }
}
