//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the crate.
//! Users can import everything they need with:
//!
//! ```
//! use segment_grid::prelude::*;
//! ```

pub use crate::{BoundingBox, Cell, FeatureId, GridConfig, GridError, GridIndex, LineSegment, Point, Resolution};
