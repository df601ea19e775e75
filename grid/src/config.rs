//! Construction parameters and validation for the spatial grid.

use serde::{Deserialize, Serialize};

/// Cell size used when a configuration omits it.
pub const DEFAULT_CELL_SIZE: f32 = 1.0;

/// Deserialisable settings for a [`crate::SpatialGrid`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// World units spanned by one cell edge. Must be positive.
    pub cell_size: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

/// Errors that can occur when constructing a grid.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Cell size must be a positive finite number to avoid degenerate division.
    #[error("cell size must be positive and finite (received {cell_size})")]
    InvalidCellSize {
        /// Provided cell size that failed validation.
        cell_size: f32,
    },
}

pub(crate) fn validate_cell_size(cell_size: f32) -> Result<f32, GridError> {
    if cell_size.is_finite() && cell_size > 0.0 {
        Ok(cell_size)
    } else {
        Err(GridError::InvalidCellSize { cell_size })
    }
}
