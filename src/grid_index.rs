//! Uniform grid index over 2D line segments.
//!
//! The region is split into `columns x rows` cells of equal size. Each cell
//! keeps a bucket of feature ids; a segment's id is stored in every cell the
//! segment passes through (see [`GridIndex::cells_of_segment`]). Range queries
//! union the buckets of the cells overlapping the query box.
//!
//! Buckets are stored row-major: cell `(column, row)` lives at
//! `row * columns + column`.

use std::collections::HashSet;

use log::{debug, trace, warn};

use crate::FeatureId;
use crate::cell::Cell;
use crate::config::{GridConfig, Resolution};
use crate::error::{GridError, Result};
use crate::geometry::{BoundingBox, LineSegment, Point};

/// Distance (in cells) within which a coordinate counts as lying on a grid line
pub(crate) const BOUNDARY_EPSILON: f64 = 1e-9;

/// Default tolerance (world units) for points just outside the region
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Uniform grid spatial index for line segments
///
/// Built once, filled with [`insert`](Self::insert), then queried with
/// [`query`](Self::query). Queries take `&self`, so a filled index can be
/// shared across threads.
///
/// # Examples
/// ```
/// use segment_grid::prelude::*;
///
/// let region = BoundingBox::from_coords(0.0, 0.0, 100.0, 100.0);
/// let mut grid = GridIndex::with_counts(region, 100, 100).unwrap();
///
/// let segment = LineSegment::new(Point::new(2.5, 3.5), Point::new(10.0, 3.5));
/// grid.insert(7, segment).unwrap();
///
/// let hits = grid.query(&BoundingBox::from_coords(2.0, 3.0, 11.0, 4.0));
/// assert!(hits.contains(&7));
/// let misses = grid.query(&BoundingBox::from_coords(50.0, 50.0, 60.0, 60.0));
/// assert!(misses.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct GridIndex {
    /// Area covered by the grid; fixed after construction
    pub(crate) region: BoundingBox,
    /// Width of one cell
    pub(crate) cell_width: f64,
    /// Height of one cell
    pub(crate) cell_height: f64,
    /// Number of cells along x
    pub(crate) columns: usize,
    /// Number of cells along y
    pub(crate) rows: usize,
    /// Slack allowed for points just outside the region
    pub(crate) tolerance: f64,
    /// Row-major feature id buckets, one per cell
    pub(crate) buckets: Vec<Vec<FeatureId>>,
    /// Number of successful insertions
    pub(crate) num_items: usize,
}

impl GridIndex {
    /// Creates a grid with fixed cell dimensions.
    ///
    /// The column and row counts are `ceil(region extent / cell size)`, so the
    /// last column/row may reach past the far edge of `region`.
    ///
    /// # Errors
    /// [`GridError::InvalidRegion`] for an empty, non-finite or zero-area region,
    /// [`GridError::InvalidCellSize`] for non-positive or non-finite cell sizes,
    /// [`GridError::GridTooLarge`] if the cell count overflows.
    pub fn with_cell_size(region: BoundingBox, cell_width: f64, cell_height: f64) -> Result<Self> {
        Self::check_region(&region)?;
        if !(cell_width.is_finite() && cell_width > 0.0 && cell_height.is_finite() && cell_height > 0.0) {
            return Err(GridError::InvalidCellSize {
                width: cell_width,
                height: cell_height,
            });
        }

        let columns = cells_along(region.width(), cell_width);
        let rows = cells_along(region.height(), cell_height);
        Self::from_parts(region, cell_width, cell_height, columns, rows, DEFAULT_TOLERANCE)
    }

    /// Divides the region into `columns x rows` equal cells.
    ///
    /// # Errors
    /// [`GridError::InvalidRegion`] for an unusable region,
    /// [`GridError::InvalidCellCount`] if either count is zero,
    /// [`GridError::GridTooLarge`] if `columns * rows` overflows.
    pub fn with_counts(region: BoundingBox, columns: usize, rows: usize) -> Result<Self> {
        Self::check_region(&region)?;
        if columns == 0 || rows == 0 {
            return Err(GridError::InvalidCellCount { columns, rows });
        }

        let cell_width = region.width() / columns as f64;
        let cell_height = region.height() / rows as f64;
        Self::from_parts(region, cell_width, cell_height, columns, rows, DEFAULT_TOLERANCE)
    }

    /// Creates a grid from a [`GridConfig`].
    ///
    /// # Errors
    /// Same as [`with_cell_size`](Self::with_cell_size) and
    /// [`with_counts`](Self::with_counts); a negative or non-finite tolerance is
    /// reported as [`GridError::Config`].
    pub fn from_config(config: &GridConfig) -> Result<Self> {
        if !(config.tolerance.is_finite() && config.tolerance >= 0.0) {
            return Err(GridError::Config(format!(
                "tolerance must be a finite non-negative number, got {}",
                config.tolerance
            )));
        }

        let mut grid = match config.resolution {
            Resolution::CellSize { width, height } => Self::with_cell_size(config.region, width, height)?,
            Resolution::CellCount { columns, rows } => Self::with_counts(config.region, columns, rows)?,
        };
        grid.tolerance = config.tolerance;
        Ok(grid)
    }

    fn check_region(region: &BoundingBox) -> Result<()> {
        if !region.is_finite() || region.is_empty() || region.width() <= 0.0 || region.height() <= 0.0 {
            return Err(GridError::InvalidRegion { region: *region });
        }
        Ok(())
    }

    fn from_parts(
        region: BoundingBox,
        cell_width: f64,
        cell_height: f64,
        columns: usize,
        rows: usize,
        tolerance: f64,
    ) -> Result<Self> {
        let cell_count = columns
            .checked_mul(rows)
            .ok_or(GridError::GridTooLarge { columns, rows })?;

        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(cell_count)
            .map_err(|_| GridError::GridTooLarge { columns, rows })?;
        buckets.resize_with(cell_count, Vec::new);

        debug!(
            "[GridIndex] created {}x{} grid, cell {}x{}, region ({}, {})-({}, {})",
            columns,
            rows,
            cell_width,
            cell_height,
            region.min.x,
            region.min.y,
            region.max.x,
            region.max.y
        );

        Ok(Self {
            region,
            cell_width,
            cell_height,
            columns,
            rows,
            tolerance,
            buckets,
            num_items: 0,
        })
    }

    // --- Grid geometry ---

    /// Region covered by the grid
    pub fn region(&self) -> BoundingBox {
        self.region
    }

    /// Width of one cell
    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    /// Height of one cell
    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    /// Number of columns
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.buckets.len()
    }

    /// Slack allowed for points just outside the region
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns true if `cell` is inside the grid
    #[inline]
    pub fn contains_cell(&self, cell: Cell) -> bool {
        cell.column < self.columns && cell.row < self.rows
    }

    /// Cell containing `point`.
    ///
    /// Points on the region's far edges map to the last column/row. A point on
    /// an interior grid line maps to the cell above/right of the line.
    ///
    /// # Errors
    /// [`GridError::OutOfRange`] if the point lies outside the region by more
    /// than the tolerance (NaN coordinates included).
    pub fn cell_of(&self, point: Point) -> Result<Cell> {
        if !self.region.contains_with_tolerance(point, self.tolerance) {
            return Err(GridError::OutOfRange {
                x: point.x,
                y: point.y,
            });
        }
        Ok(self.cell_toward(point, Point::default()))
    }

    /// Cell containing `point`, breaking ties on grid lines by `direction`.
    ///
    /// On each axis a negative direction picks the cell below/left of a grid
    /// line the point sits on, anything else picks the cell above/right.
    /// The result is clamped into the grid.
    pub(crate) fn cell_toward(&self, point: Point, direction: Point) -> Cell {
        Cell::new(
            axis_index((point.x - self.region.min.x) / self.cell_width, direction.x, self.columns),
            axis_index((point.y - self.region.min.y) / self.cell_height, direction.y, self.rows),
        )
    }

    /// World-space bounds of a cell
    #[inline]
    pub fn cell_bounds(&self, cell: Cell) -> BoundingBox {
        let min_x = self.region.min.x + cell.column as f64 * self.cell_width;
        let min_y = self.region.min.y + cell.row as f64 * self.cell_height;
        BoundingBox::from_coords(
            min_x,
            min_y,
            self.region.min.x + (cell.column + 1) as f64 * self.cell_width,
            self.region.min.y + (cell.row + 1) as f64 * self.cell_height,
        )
    }

    /// Feature ids recorded in a cell (empty for cells outside the grid)
    pub fn bucket(&self, cell: Cell) -> &[FeatureId] {
        if !self.contains_cell(cell) {
            return &[];
        }
        &self.buckets[self.bucket_index(cell)]
    }

    #[inline]
    fn bucket_index(&self, cell: Cell) -> usize {
        cell.row * self.columns + cell.column
    }

    // --- Build phase ---

    /// Records `id` in every cell `segment` passes through.
    ///
    /// The insertion is atomic: on error no bucket is modified.
    ///
    /// # Errors
    /// [`GridError::SegmentOutOfBounds`] if an endpoint lies outside the
    /// region, [`GridError::DegenerateTraversal`] if the cell walk fails to
    /// make progress.
    pub fn insert(&mut self, id: FeatureId, segment: LineSegment) -> Result<()> {
        let cells = match self.cells_of_segment(&segment) {
            Ok(cells) => cells,
            Err(err) => {
                match &err {
                    GridError::DegenerateTraversal { .. } => {
                        warn!("[GridIndex] insert of feature {} aborted: {}", id, err);
                    }
                    _ => debug!("[GridIndex] insert of feature {} rejected: {}", id, err),
                }
                return Err(err);
            }
        };

        for &cell in &cells {
            let index = self.bucket_index(cell);
            let bucket = &mut self.buckets[index];
            if bucket.last() != Some(&id) {
                bucket.push(id);
            }
        }
        self.num_items += 1;

        trace!("[GridIndex] inserted feature {} into {} cells", id, cells.len());
        Ok(())
    }

    /// Inserts a batch of segments in order.
    ///
    /// Stops at the first segment that fails; segments before it stay
    /// inserted. Returns the number of segments inserted.
    ///
    /// # Errors
    /// The error of the first failing [`insert`](Self::insert).
    pub fn insert_all<I>(&mut self, segments: I) -> Result<usize>
    where
        I: IntoIterator<Item = (FeatureId, LineSegment)>,
    {
        let mut inserted = 0;
        for (id, segment) in segments {
            self.insert(id, segment)?;
            inserted += 1;
        }
        Ok(inserted)
    }

    // --- Query phase ---

    /// Candidate features whose segments may intersect `bbox`.
    ///
    /// The box is clipped to the region first; a box outside the region
    /// yields an empty set. The result is a superset: callers needing exact
    /// answers must test each candidate's geometry.
    pub fn query(&self, bbox: &BoundingBox) -> HashSet<FeatureId> {
        let mut results = HashSet::new();
        if let Some((first, last)) = self.cell_range(bbox) {
            for row in first.row..=last.row {
                let start = self.bucket_index(Cell::new(first.column, row));
                let end = self.bucket_index(Cell::new(last.column, row));
                for bucket in &self.buckets[start..=end] {
                    results.extend(bucket.iter().copied());
                }
            }
        }
        trace!("[GridIndex] query {:?} -> {} candidates", bbox, results.len());
        results
    }

    /// Like [`query`](Self::query), but writes into a reusable vector.
    ///
    /// `results` is cleared first and ends up sorted with no duplicates.
    pub fn query_into(&self, bbox: &BoundingBox, results: &mut Vec<FeatureId>) {
        results.clear();
        let Some((first, last)) = self.cell_range(bbox) else {
            return;
        };

        for row in first.row..=last.row {
            let start = self.bucket_index(Cell::new(first.column, row));
            let end = self.bucket_index(Cell::new(last.column, row));
            for bucket in &self.buckets[start..=end] {
                results.extend_from_slice(bucket);
            }
        }
        results.sort_unstable();
        results.dedup();
    }

    /// Inclusive range of cells overlapped by `bbox` after clipping to the region.
    ///
    /// Boxes are closed: a min corner on a grid line also takes the cell
    /// below/left of it, a max corner on a grid line the cell above/right.
    /// Returns `None` if the clipped box is empty.
    pub fn cell_range(&self, bbox: &BoundingBox) -> Option<(Cell, Cell)> {
        // Clipping drops NaN (f64::max/min prefer the number), so test first
        if bbox.is_empty() {
            return None;
        }
        let clipped = bbox.intersection(&self.region);
        if clipped.is_empty() {
            return None;
        }
        let first = self.cell_toward(clipped.min, Point::new(-1.0, -1.0));
        let last = self.cell_toward(clipped.max, Point::new(1.0, 1.0));
        trace!(
            "[GridIndex] cell range ({}, {})-({}, {})",
            first.column, first.row, last.column, last.row
        );
        Some((first, last))
    }

    // --- Stats ---

    /// Number of successful insertions
    pub fn len(&self) -> usize {
        self.num_items
    }

    /// Returns true if nothing has been inserted
    pub fn is_empty(&self) -> bool {
        self.num_items == 0
    }

    /// Total number of ids stored across all buckets
    pub fn entry_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Number of cells holding at least one id
    pub fn occupied_cells(&self) -> usize {
        self.buckets.iter().filter(|bucket| !bucket.is_empty()).count()
    }
}

impl Default for GridIndex {
    /// 100x100 unit cells over `[0,0]-[100,100]`
    fn default() -> Self {
        let region = BoundingBox::from_coords(0.0, 0.0, 100.0, 100.0);
        let cell_count = 100 * 100;
        Self {
            region,
            cell_width: 1.0,
            cell_height: 1.0,
            columns: 100,
            rows: 100,
            tolerance: DEFAULT_TOLERANCE,
            buckets: vec![Vec::new(); cell_count],
            num_items: 0,
        }
    }
}

/// Number of cells of size `size` needed to cover `extent`.
///
/// A quotient within rounding noise of an integer is not bumped up by `ceil`.
#[expect(clippy::cast_possible_truncation, reason = "count is a non-negative whole number; saturates on overflow")]
fn cells_along(extent: f64, size: f64) -> usize {
    let exact = extent / size;
    let nearest = exact.round();
    let count = if (exact - nearest).abs() <= BOUNDARY_EPSILON * nearest.max(1.0) {
        nearest
    } else {
        exact.ceil()
    };
    (count as usize).max(1)
}

/// Index along one axis for a coordinate already scaled to cell units
#[expect(clippy::cast_possible_truncation, reason = "index is a positive whole number, clamped to count - 1")]
fn axis_index(scaled: f64, direction: f64, count: usize) -> usize {
    let nearest = scaled.round();
    let index = if (scaled - nearest).abs() <= BOUNDARY_EPSILON {
        if direction < 0.0 { nearest - 1.0 } else { nearest }
    } else {
        scaled.floor()
    };

    if index <= 0.0 {
        0
    } else {
        (index as usize).min(count - 1)
    }
}
