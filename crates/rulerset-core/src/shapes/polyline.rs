//! Polyline shape: the committed form of a pen stroke.

use super::{ShapeId, ShapeTrait};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ordered sequence of points, in drawing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub(crate) id: ShapeId,
    /// Points in capture order.
    pub(crate) points: Vec<Point>,
}

impl Polyline {
    /// Create a polyline with a fresh unique identifier.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            points,
        }
    }

    /// Rebuild a polyline with a known identifier (e.g. when loading).
    pub fn with_id(id: impl Into<ShapeId>, points: Vec<Point>) -> Self {
        Self {
            id: id.into(),
            points,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last segment, if the polyline has at least two points.
    pub fn last_segment(&self) -> Option<(Point, Point)> {
        match self.points.as_slice() {
            [.., a, b] => Some((*a, *b)),
            _ => None,
        }
    }
}

impl ShapeTrait for Polyline {
    fn id(&self) -> &str {
        &self.id
    }

    fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };

        self.points
            .iter()
            .skip(1)
            .fold(Rect::from_points(*first, *first), |acc, p| acc.union_pt(*p))
    }

    fn vertices(&self) -> &[Point] {
        &self.points
    }

    fn segments(&self) -> Vec<(Point, Point)> {
        self.points.windows(2).map(|w| (w[0], w[1])).collect()
    }
}
