//! Cell handles and cell edges.
//!
//! A cell is never stored as an object; it is a `(column, row)` pair whose
//! world-space box is derived on demand by the grid.

use crate::geometry::{BoundingBox, LineSegment, Point};

/// Grid cell identified by column and row
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Column index (x axis)
    pub column: usize,
    /// Row index (y axis)
    pub row: usize,
}

impl Cell {
    /// Creates a new cell handle
    #[inline]
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((column, row): (usize, usize)) -> Self {
        Self::new(column, row)
    }
}

/// One of the four edges of a cell, in bottom/right/top/left order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CellEdge {
    /// Edge at `min.y`
    Bottom,
    /// Edge at `max.x`
    Right,
    /// Edge at `max.y`
    Top,
    /// Edge at `min.x`
    Left,
}

impl CellEdge {
    /// All edges, counter-clockwise starting at the bottom
    pub const ALL: [Self; 4] = [
        Self::Bottom,
        Self::Right,
        Self::Top,
        Self::Left,
    ];

    /// The edge of `bounds` as a segment, wound counter-clockwise
    pub fn segment(self, bounds: &BoundingBox) -> LineSegment {
        let (min, max) = (bounds.min, bounds.max);
        match self {
            Self::Bottom => LineSegment::new(min, Point::new(max.x, min.y)),
            Self::Right => LineSegment::new(Point::new(max.x, min.y), max),
            Self::Top => LineSegment::new(max, Point::new(min.x, max.y)),
            Self::Left => LineSegment::new(Point::new(min.x, max.y), min),
        }
    }

    /// Column/row step taken when leaving a cell through this edge
    #[inline]
    pub fn step(self) -> (isize, isize) {
        match self {
            Self::Bottom => (0, -1),
            Self::Right => (1, 0),
            Self::Top => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    /// True if a segment moving along `delta` can leave a cell through this edge
    #[inline]
    pub fn faces(self, delta: Point) -> bool {
        match self {
            Self::Bottom => delta.y < 0.0,
            Self::Right => delta.x > 0.0,
            Self::Top => delta.y > 0.0,
            Self::Left => delta.x < 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_wind_counter_clockwise() {
        let bounds = BoundingBox::from_coords(2.0, 3.0, 3.0, 4.0);
        let mut previous_end = CellEdge::Left.segment(&bounds).b();
        for edge in CellEdge::ALL {
            let segment = edge.segment(&bounds);
            assert_eq!(segment.a(), previous_end, "{edge:?} should start where the previous edge ended");
            previous_end = segment.b();
        }
    }

    #[test]
    fn test_edge_faces_direction_of_travel() {
        let east_north = Point::new(1.0, 0.5);
        assert!(CellEdge::Right.faces(east_north));
        assert!(CellEdge::Top.faces(east_north));
        assert!(!CellEdge::Left.faces(east_north));
        assert!(!CellEdge::Bottom.faces(east_north));

        let vertical = Point::new(0.0, -2.0);
        assert!(CellEdge::Bottom.faces(vertical));
        assert!(!CellEdge::Right.faces(vertical), "no x motion never leaves sideways");
        assert!(!CellEdge::Left.faces(vertical), "no x motion never leaves sideways");
    }
}
