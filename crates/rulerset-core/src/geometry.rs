//! Geometry kernel: distances, angle normalization, rotation and
//! line intersection.
//!
//! Every function here is pure and safe to call from any thread.

use kurbo::{Affine, Line, Point, Rect, Vec2};

/// Determinant threshold below which two lines are treated as parallel.
pub const INTERSECTION_EPSILON: f64 = 1e-9;

/// Lines shorter than this have no usable direction.
pub const MIN_DIRECTION_LENGTH: f64 = 1e-6;

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Midpoint of the segment `a`-`b`.
pub fn midpoint(a: Point, b: Point) -> Point {
    a.midpoint(b)
}

/// Normalize an angle in degrees to `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Shortest signed difference `a - b` in degrees, in `(-180, 180]`.
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let d = normalize_degrees(a - b);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Direction of a vector in degrees, `[0, 360)`, or `None` for a
/// (near) zero vector.
pub fn vector_degrees(v: Vec2) -> Option<f64> {
    if v.hypot() < MIN_DIRECTION_LENGTH {
        return None;
    }
    Some(normalize_degrees(v.atan2().to_degrees()))
}

/// Direction of a line from `p0` towards `p1` in degrees.
pub fn direction_degrees(line: Line) -> Option<f64> {
    vector_degrees(line.p1 - line.p0)
}

/// Rotate `point` about `origin` by `delta_degrees`.
pub fn rotate(origin: Point, point: Point, delta_degrees: f64) -> Point {
    Affine::rotate_about(delta_degrees.to_radians(), origin) * point
}

/// Point at `length` from `origin` in direction `angle_degrees`.
pub fn polar(origin: Point, angle_degrees: f64, length: f64) -> Point {
    let rad = angle_degrees.to_radians();
    Point::new(origin.x + length * rad.cos(), origin.y + length * rad.sin())
}

/// Intersection of the infinite lines through `p1`-`p2` and `p3`-`p4`.
///
/// Returns `None` when the lines are parallel (or either is degenerate).
pub fn line_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    let det = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if det.abs() < INTERSECTION_EPSILON {
        return None;
    }

    let a = p1.x * p2.y - p1.y * p2.x;
    let b = p3.x * p4.y - p3.y * p4.x;
    let x = (a * (p3.x - p4.x) - (p1.x - p2.x) * b) / det;
    let y = (a * (p3.y - p4.y) - (p1.y - p2.y) * b) / det;
    Some(Point::new(x, y))
}

/// Axis-aligned bounds of a segment.
pub fn segment_bounds(a: Point, b: Point) -> Rect {
    Rect::from_points(a, b)
}
