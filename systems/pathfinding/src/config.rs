//! Search budget and cost table configuration.

use serde::{Deserialize, Serialize};
use tilepath_core::TerrainCosts;

/// Default number of frontier pops allowed per search.
pub const MAX_ITERATIONS: u32 = 10_000;

/// Deserialisable settings for a [`crate::Pathfinder`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathfinderConfig {
    /// Frontier pops allowed before a search gives up.
    pub max_iterations: u32,
    /// Per-cell traversal weights keyed by occupant kind.
    pub costs: TerrainCosts,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            costs: TerrainCosts::STANDARD,
        }
    }
}

/// Errors that can occur when constructing a pathfinder.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum PathfinderError {
    /// Terrain weights must be finite and non-negative for least-cost search.
    #[error("terrain cost for {kind} must be finite and non-negative (received {cost})")]
    InvalidTerrainCost {
        /// Occupant kind whose weight failed validation.
        kind: &'static str,
        /// Provided weight.
        cost: f32,
    },
}

pub(crate) fn validate(config: &PathfinderConfig) -> Result<(), PathfinderError> {
    let costs = &config.costs;
    for (kind, cost) in [
        ("empty cells", costs.empty),
        ("towers", costs.tower),
        ("walls", costs.wall),
        ("other occupants", costs.other),
    ] {
        if !cost.is_finite() || cost < 0.0 {
            return Err(PathfinderError::InvalidTerrainCost { kind, cost });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_standard_budget() {
        let config: PathfinderConfig = toml::from_str("").expect("empty table parses");

        assert_eq!(config.max_iterations, 10_000);
        assert_eq!(config.costs, TerrainCosts::STANDARD);
    }

    #[test]
    fn partial_cost_tables_keep_remaining_defaults() {
        let config: PathfinderConfig = toml::from_str(
            r#"
            max_iterations = 250

            [costs]
            wall = 99.0
            "#,
        )
        .expect("valid config");

        assert_eq!(config.max_iterations, 250);
        assert_eq!(config.costs.wall, 99.0);
        assert_eq!(config.costs.tower, 40.0);
        assert_eq!(config.costs.empty, 1.0);
    }

    #[test]
    fn negative_costs_are_rejected() {
        let mut config = PathfinderConfig::default();
        config.costs.tower = -1.0;

        assert_eq!(
            validate(&config),
            Err(PathfinderError::InvalidTerrainCost {
                kind: "towers",
                cost: -1.0,
            })
        );
    }

    #[test]
    fn non_finite_costs_are_rejected() {
        let mut config = PathfinderConfig::default();
        config.costs.empty = f32::NAN;

        assert!(validate(&config).is_err());
        assert!(validate(&PathfinderConfig::default()).is_ok());
    }
}
