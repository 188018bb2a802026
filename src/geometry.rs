//! Geometry primitives consumed by the grid index.
//!
//! One concrete `f64` representation for points, axis-aligned boxes and line
//! segments. The only non-trivial operation is [`LineSegment::intersect`], the
//! segment/segment test the cell traversal is driven by.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Parameter tolerance of the segment/segment intersection test.
const INTERSECT_EPSILON: f64 = 1e-9;

/// A point (or vector) in world coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Creates a new point
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 2D cross product (z component of the 3D cross product)
    #[inline]
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Returns true if both coordinates are within `epsilon` of `other`
    #[inline]
    pub fn approx_eq(self, other: Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }

    /// Returns true if both coordinates are finite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    #[inline]
    fn mul(self, scale: f64) -> Self {
        Self::new(self.x * scale, self.y * scale)
    }
}

/// Axis-aligned bounding box: minX, minY, maxX, maxY
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum corner
    pub min: Point,
    /// Maximum corner
    pub max: Point,
}

impl BoundingBox {
    /// Creates a box from its min and max corners
    #[inline]
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Creates a box from raw coordinates (`min_x`, `min_y`, `max_x`, `max_y`)
    #[inline]
    pub const fn from_coords(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// Width (x extent)
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Height (y extent)
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Center point
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// True if min > max on either axis, or any extent is NaN
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.min.x <= self.max.x && self.min.y <= self.max.y)
    }

    /// True if all four coordinates are finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Closed containment test
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Containment test with the box grown by `tolerance` on every side
    #[inline]
    pub fn contains_with_tolerance(&self, point: Point, tolerance: f64) -> bool {
        self.expand(tolerance).contains(point)
    }

    /// Nearest point of the box to `point`
    #[inline]
    pub fn clamp(&self, point: Point) -> Point {
        Point::new(
            point.x.max(self.min.x).min(self.max.x),
            point.y.max(self.min.y).min(self.max.y),
        )
    }

    /// Closed overlap test
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Overlap of two boxes; the result [`is_empty`](Self::is_empty) if they are disjoint
    #[inline]
    pub fn intersection(&self, other: &Self) -> Self {
        Self::from_coords(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
        )
    }

    /// Grows the box by `margin` on all sides
    #[inline]
    pub fn expand(&self, margin: f64) -> Self {
        Self::from_coords(
            self.min.x - margin,
            self.min.y - margin,
            self.max.x + margin,
            self.max.y + margin,
        )
    }
}

/// Line segment from `a` to `b`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    a: Point,
    b: Point,
}

impl LineSegment {
    /// Creates a segment between two endpoints
    #[inline]
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// First endpoint
    #[inline]
    pub fn a(&self) -> Point {
        self.a
    }

    /// Second endpoint
    #[inline]
    pub fn b(&self) -> Point {
        self.b
    }

    /// Vector from `a` to `b`
    #[inline]
    pub fn delta(&self) -> Point {
        self.b - self.a
    }

    /// Euclidean length
    #[inline]
    pub fn length(&self) -> f64 {
        let d = self.delta();
        d.x.hypot(d.y)
    }

    /// True if both endpoints coincide
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }

    /// Point at parameter `t` (0 = `a`, 1 = `b`)
    #[inline]
    pub fn point_at(&self, t: f64) -> Point {
        self.a + self.delta() * t
    }

    /// Smallest box containing both endpoints
    #[inline]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_coords(
            self.a.x.min(self.b.x),
            self.a.y.min(self.b.y),
            self.a.x.max(self.b.x),
            self.a.y.max(self.b.y),
        )
    }

    /// Intersection point with another segment, if any.
    ///
    /// Solves `a + t * d1 = other.a + s * d2` with cross products; both
    /// parameters must lie in `[0, 1]` (with a small tolerance so that hits
    /// on shared endpoints and box corners are not lost). Parallel and
    /// collinear segments report no intersection.
    pub fn intersect(&self, other: &Self) -> Option<Point> {
        let d1 = self.delta();
        let d2 = other.delta();

        let denom = d1.cross(d2);
        let scale = d1.x.hypot(d1.y) * d2.x.hypot(d2.y);
        if denom.abs() <= f64::EPSILON * scale || scale == 0.0 {
            return None;
        }

        let offset = other.a - self.a;
        let t = offset.cross(d2) / denom;
        let s = offset.cross(d1) / denom;

        let range = -INTERSECT_EPSILON..=1.0 + INTERSECT_EPSILON;
        if range.contains(&t) && range.contains(&s) {
            Some(self.point_at(t))
        } else {
            None
        }
    }
}
