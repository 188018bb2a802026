//! Cell traversal for segment insertion.
//!
//! A segment is walked from its first endpoint to its second, one cell at a
//! time. In every cell the segment is intersected with the cell's edges that
//! face the direction of travel; the nearest crossing (measured with
//! [`unlerp`]) is the exit, and the walk steps across that edge into the
//! neighbouring cell. Exits through a corner step diagonally.
//!
//! Every step moves strictly forward along the segment and strictly closer to
//! the end cell, so a walk takes at most `|dcolumn| + |drow|` steps. A step that
//! would not advance is reported as [`GridError::DegenerateTraversal`].

use crate::cell::{Cell, CellEdge};
use crate::error::{GridError, Result};
use crate::geometry::{BoundingBox, LineSegment, Point};
use crate::grid_index::GridIndex;

/// Two exit crossings closer than this (in `t`) are one corner exit
const CORNER_EPSILON: f64 = 1e-9;

/// Returns `t` such that `p = a + t * (b - a)`.
///
/// Measured along whichever axis has the larger delta, so near-vertical and
/// near-horizontal segments stay well conditioned. A zero-length segment
/// yields 0.
pub fn unlerp(a: Point, b: Point, p: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    if dx.abs() > dy.abs() {
        (p.x - a.x) / dx
    } else if dy != 0.0 {
        (p.y - a.y) / dy
    } else {
        0.0
    }
}

/// Crossings of `segment` with the four edges of `bounds`, tagged by edge
fn edge_crossings(bounds: BoundingBox, segment: LineSegment) -> impl Iterator<Item = (CellEdge, Point)> {
    CellEdge::ALL
        .into_iter()
        .filter_map(move |edge| segment.intersect(&edge.segment(&bounds)).map(|p| (edge, p)))
}

/// True if the walk is already at the end cell along the axis `edge` crosses
#[inline]
fn reached(current: Cell, end: Cell, edge: CellEdge) -> bool {
    match edge {
        CellEdge::Bottom => current.row <= end.row,
        CellEdge::Right => current.column >= end.column,
        CellEdge::Top => current.row >= end.row,
        CellEdge::Left => current.column <= end.column,
    }
}

/// Moves `end` onto `start` on any axis where it lies behind the direction of travel
fn ahead_of(start: Cell, end: Cell, delta: Point) -> Cell {
    let column = if (delta.x > 0.0 && end.column < start.column)
        || (delta.x < 0.0 && end.column > start.column)
        || delta.x == 0.0
    {
        start.column
    } else {
        end.column
    };
    let row = if (delta.y > 0.0 && end.row < start.row)
        || (delta.y < 0.0 && end.row > start.row)
        || delta.y == 0.0
    {
        start.row
    } else {
        end.row
    };
    Cell::new(column, row)
}

impl GridIndex {
    /// Points where `segment` crosses the boundary of `cell`.
    ///
    /// Edges are tested bottom, right, top, left. Edges the segment runs
    /// along contribute nothing; a crossing through a corner is reported by
    /// both edges meeting there.
    pub fn cell_segment_intersections(&self, cell: Cell, segment: &LineSegment) -> Vec<Point> {
        edge_crossings(self.cell_bounds(cell), *segment)
            .map(|(_, point)| point)
            .collect()
    }

    /// Cells `segment` passes through, ordered from `a()` to `b()`.
    ///
    /// Endpoints on a grid line are assigned to the cell on the side of
    /// travel (start) or of arrival (end). A segment running along a grid
    /// line is assigned to the cells above/right of it. Each cell appears once.
    /// Endpoints outside the region but within tolerance are moved onto the
    /// region boundary first.
    ///
    /// # Errors
    /// [`GridError::SegmentOutOfBounds`] if an endpoint lies outside the
    /// region beyond tolerance, [`GridError::DegenerateTraversal`] if a
    /// step fails to advance.
    pub fn cells_of_segment(&self, segment: &LineSegment) -> Result<Vec<Cell>> {
        let (a, b) = (segment.a(), segment.b());
        if !self.region.contains_with_tolerance(a, self.tolerance)
            || !self.region.contains_with_tolerance(b, self.tolerance)
        {
            return Err(GridError::SegmentOutOfBounds { segment: *segment });
        }

        // Endpoints in the tolerance band are walked as if on the region edge
        let clamped = LineSegment::new(self.region.clamp(a), self.region.clamp(b));
        let delta = clamped.delta();
        let start = self.cell_toward(clamped.a(), delta);
        if clamped.is_degenerate() {
            return Ok(vec![start]);
        }
        let end = ahead_of(start, self.cell_toward(clamped.b(), delta * -1.0), delta);

        let mut cells = Vec::with_capacity(
            start.column.abs_diff(end.column) + start.row.abs_diff(end.row) + 1,
        );
        cells.push(start);

        let mut current = start;
        let mut t = 0.0;
        while current != end {
            let stalled = GridError::DegenerateTraversal {
                column: current.column,
                row: current.row,
                t,
            };

            let Some((exit_t, (dc, dr))) = self.exit_step(current, end, &clamped) else {
                return Err(stalled);
            };
            if exit_t <= t {
                return Err(stalled);
            }

            current = match (
                current.column.checked_add_signed(dc),
                current.row.checked_add_signed(dr),
            ) {
                (Some(column), Some(row)) if self.contains_cell(Cell::new(column, row)) => {
                    Cell::new(column, row)
                }
                _ => return Err(stalled),
            };
            t = exit_t;
            cells.push(current);
        }

        Ok(cells)
    }

    /// Parametric position and column/row step of the exit from `current`
    fn exit_step(&self, current: Cell, end: Cell, segment: &LineSegment) -> Option<(f64, (isize, isize))> {
        let delta = segment.delta();
        let (a, b) = (segment.a(), segment.b());

        // At most two edges face the direction of travel
        let mut exits = [None; 2];
        let mut count = 0;
        for (edge, point) in edge_crossings(self.cell_bounds(current), *segment) {
            if edge.faces(delta) && !reached(current, end, edge) && count < exits.len() {
                exits[count] = Some((unlerp(a, b, point), edge));
                count += 1;
            }
        }

        let nearest = exits.iter().flatten().map(|&(t, _)| t).reduce(f64::min)?;

        let mut exit_t = nearest;
        let mut step = (0, 0);
        for &(t, edge) in exits.iter().flatten() {
            if t - nearest <= CORNER_EPSILON {
                let (dc, dr) = edge.step();
                step.0 += dc;
                step.1 += dr;
                exit_t = exit_t.max(t);
            }
        }
        Some((exit_t, step))
    }
}
