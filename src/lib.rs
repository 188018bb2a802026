//! # Segment Grid - Uniform Grid Spatial Index for Line Segments
//!
//! A Rust library that indexes 2D line segments in a regular grid of
//! rectangular cells and answers range queries ("which segments might touch
//! this rectangle?") by looking only at the cells the query overlaps.
//!
//! ## Features
//!
//! - **Exact cell traversal**: every cell a segment passes through is recorded,
//!   found by walking the segment edge crossing by edge crossing
//! - **Guaranteed termination**: each traversal step strictly advances along the
//!   segment; a stalled walk is reported as an error instead of looping
//! - **Candidate queries**: queries return a conservative superset, never miss
//!   a segment touching the query box
//! - **Build once, query many**: queries take `&self` and can run from many threads
//!
//! ## Quick Start
//!
//! ```rust
//! use segment_grid::prelude::*;
//!
//! // Cover [0,0]-[100,100] with 100x100 unit cells
//! let region = BoundingBox::from_coords(0.0, 0.0, 100.0, 100.0);
//! let mut grid = GridIndex::with_counts(region, 100, 100)?;
//!
//! // Index some segments under caller-chosen feature ids
//! grid.insert(7, LineSegment::new(Point::new(2.5, 3.5), Point::new(10.0, 3.5)))?;
//! grid.insert(8, LineSegment::new(Point::new(40.0, 40.0), Point::new(60.0, 45.0)))?;
//!
//! // Candidates near the first segment
//! let mut results = Vec::new();
//! grid.query_into(&BoundingBox::from_coords(2.0, 3.0, 11.0, 4.0), &mut results);
//! assert_eq!(results, vec![7]);
//!
//! // Nothing indexed here
//! grid.query_into(&BoundingBox::from_coords(80.0, 80.0, 90.0, 90.0), &mut results);
//! assert!(results.is_empty());
//! # Ok::<(), segment_grid::GridError>(())
//! ```
//!
//! ## How It Works
//!
//! The grid stores one bucket of feature ids per cell. Inserting a segment
//! walks it from the first endpoint to the second: in each cell the segment is
//! intersected with the cell edges facing the direction of travel, the nearest
//! crossing is the exit, and the walk continues in the neighbouring cell.
//! A query clips its box to the grid region, converts the corners to a range
//! of cells and unions their buckets.
//!
//! Results are candidates: an id is returned when its segment shares a cell
//! with the query box, so callers that need exact answers test the geometry
//! of each candidate themselves.

pub mod cell;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid_index;
pub mod prelude;
pub mod traversal;

#[cfg(test)]
mod integration_test;
#[cfg(test)]
mod property_tests;

/// Opaque caller-supplied handle for an indexed segment
pub type FeatureId = u32;

pub use cell::{Cell, CellEdge};
pub use config::{GridConfig, Resolution};
pub use error::{GridError, Result};
pub use geometry::{BoundingBox, LineSegment, Point};
pub use grid_index::GridIndex;
pub use traversal::unlerp;
