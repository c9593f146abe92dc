//! Shape definitions for committed drawing content.

mod polyline;

pub use polyline::Polyline;

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Unique identifier for shapes (opaque string, UUID v4 for new shapes).
pub type ShapeId = String;

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> &str;

    /// Get the bounding box in drawing coordinates.
    fn bounds(&self) -> Rect;

    /// Vertices usable as snap targets, in drawing order.
    fn vertices(&self) -> &[Point];

    /// Straight segments making up the shape outline.
    fn segments(&self) -> Vec<(Point, Point)>;
}

/// Enum wrapper for all shape types.
///
/// Closed set of variants; new kinds (circles, arcs) get a new arm here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Polyline(Polyline),
}

impl Shape {
    pub fn id(&self) -> &str {
        match self {
            Shape::Polyline(s) => s.id(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Polyline(s) => s.bounds(),
        }
    }

    pub fn vertices(&self) -> &[Point] {
        match self {
            Shape::Polyline(s) => s.vertices(),
        }
    }

    pub fn segments(&self) -> Vec<(Point, Point)> {
        match self {
            Shape::Polyline(s) => s.segments(),
        }
    }

    pub fn as_polyline(&self) -> Option<&Polyline> {
        match self {
            Shape::Polyline(p) => Some(p),
        }
    }
}

impl From<Polyline> for Shape {
    fn from(polyline: Polyline) -> Self {
        Shape::Polyline(polyline)
    }
}
