//! Grid configuration.
//!
//! A [`GridConfig`] describes the grid geometry only; it can be written in
//! TOML:
//!
//! ```toml
//! tolerance = 1e-9
//!
//! [region.min]
//! x = 0.0
//! y = 0.0
//!
//! [region.max]
//! x = 100.0
//! y = 100.0
//!
//! [resolution]
//! kind = "cell_count"
//! columns = 100
//! rows = 100
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::BoundingBox;
use crate::grid_index::DEFAULT_TOLERANCE;

/// How the region is divided into cells
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum Resolution {
    /// Fixed cell dimensions; counts are derived by rounding up
    CellSize {
        /// Cell width in world units
        width: f64,
        /// Cell height in world units
        height: f64,
    },
    /// Fixed counts; cell dimensions are derived by dividing the region
    CellCount {
        /// Number of columns
        columns: usize,
        /// Number of rows
        rows: usize,
    },
}

/// Grid index configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Area covered by the grid
    pub region: BoundingBox,

    /// Cell layout
    pub resolution: Resolution,

    /// How far (world units) a point may lie outside the region and still be accepted
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            region: BoundingBox::from_coords(0.0, 0.0, 100.0, 100.0),
            resolution: Resolution::CellCount {
                columns: 100,
                rows: 100,
            },
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl GridConfig {
    /// Creates a configuration with the default tolerance
    pub fn new(region: BoundingBox, resolution: Resolution) -> Self {
        Self {
            region,
            resolution,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Replaces the out-of-region tolerance
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Parses a configuration from TOML.
    ///
    /// # Errors
    /// [`GridError::Config`](crate::GridError::Config) if the text is not a
    /// valid configuration.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    /// [`GridError::Config`](crate::GridError::Config) if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}
