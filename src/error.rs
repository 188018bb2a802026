//! Error types for the grid index

use crate::geometry::{BoundingBox, LineSegment};
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, GridError>;

/// Grid index error type
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum GridError {
    /// Region is empty, non-finite, or has zero area
    #[error("Invalid region: {region:?}")]
    InvalidRegion {
        /// Offending region
        region: BoundingBox,
    },

    /// Cell dimensions must be finite and strictly positive
    #[error("Invalid cell size: {width} x {height}")]
    InvalidCellSize {
        /// Requested cell width
        width: f64,
        /// Requested cell height
        height: f64,
    },

    /// Column and row counts must be non-zero
    #[error("Invalid cell count: {columns} columns x {rows} rows")]
    InvalidCellCount {
        /// Requested column count
        columns: usize,
        /// Requested row count
        rows: usize,
    },

    /// Total number of cells does not fit in memory addressing
    #[error("Grid too large: {columns} columns x {rows} rows")]
    GridTooLarge {
        /// Derived column count
        columns: usize,
        /// Derived row count
        rows: usize,
    },

    /// Point lies outside the region beyond tolerance
    #[error("Point ({x}, {y}) is outside the grid region")]
    OutOfRange {
        /// X coordinate
        x: f64,
        /// Y coordinate
        y: f64,
    },

    /// Segment endpoint lies outside the region; nothing was inserted
    #[error("Segment {segment:?} is outside the grid region")]
    SegmentOutOfBounds {
        /// Rejected segment
        segment: LineSegment,
    },

    /// Traversal step failed to advance along the segment (internal invariant)
    #[error("Traversal stalled in cell ({column}, {row}) at t = {t}")]
    DegenerateTraversal {
        /// Column of the cell the traversal stalled in
        column: usize,
        /// Row of the cell the traversal stalled in
        row: usize,
        /// Parametric position reached before stalling
        t: f64,
    },

    /// Configuration could not be parsed or serialized
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for GridError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for GridError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Config(e.to_string())
    }
}
