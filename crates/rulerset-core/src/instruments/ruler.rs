//! Straight ruler.

use super::{clamp_size, sanitize_angle, InstrumentTrait};
use crate::geometry::polar;
use crate::tools::ToolKind;
use kurbo::{Line, Point};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Allowed ruler lengths in pixels.
pub const RULER_LENGTH_RANGE: RangeInclusive<f64> = 20.0..=4000.0;

/// A ruler: a straight edge starting at `position` and running `length`
/// pixels in direction `angle`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ruler {
    pub position: Point,
    pub length: f64,
    /// Degrees, `[0, 360)`.
    pub angle: f64,
}

impl Ruler {
    pub const DEFAULT_POSITION: Point = Point::new(400.0, 400.0);
    pub const DEFAULT_LENGTH: f64 = 400.0;

    pub fn new(position: Point) -> Self {
        Self {
            position,
            length: Self::DEFAULT_LENGTH,
            angle: 0.0,
        }
    }

    pub fn with_length(self, length: f64) -> Self {
        Self {
            length: clamp_size(length, self.length, &RULER_LENGTH_RANGE),
            ..self
        }
    }

    /// The far end of the measuring edge.
    pub fn end(&self) -> Point {
        polar(self.position, self.angle, self.length)
    }
}

impl Default for Ruler {
    fn default() -> Self {
        Self::new(Self::DEFAULT_POSITION)
    }
}

impl InstrumentTrait for Ruler {
    fn kind(&self) -> ToolKind {
        ToolKind::Ruler
    }

    fn anchor_position(&self) -> Point {
        self.position
    }

    fn anchor_line(&self) -> Option<Line> {
        Some(Line::new(self.position, self.end()))
    }

    fn angle(&self) -> f64 {
        self.angle
    }

    fn moved(self, position: Point) -> Self {
        Self { position, ..self }
    }

    fn rotated(self, angle_degrees: f64) -> Self {
        Self {
            angle: sanitize_angle(angle_degrees, self.angle),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let ruler = Ruler::default();
        assert_eq!(ruler.position, Point::new(400.0, 400.0));
        assert_eq!(ruler.length, 400.0);
        assert_eq!(ruler.angle, 0.0);
    }

    #[test]
    fn test_transforms_are_pure() {
        let ruler = Ruler::default();
        let moved = ruler.moved(Point::new(10.0, 20.0));
        let rotated = moved.rotated(-90.0);
        let longer = rotated.with_length(600.0);

        assert_eq!(ruler.position, Point::new(400.0, 400.0));
        assert_eq!(moved.position, Point::new(10.0, 20.0));
        assert!((rotated.angle - 270.0).abs() < 1e-9);
        assert_eq!(longer.length, 600.0);
        assert_eq!(rotated.length, 400.0);
    }

    #[test]
    fn test_length_clamped() {
        assert_eq!(Ruler::default().with_length(1.0).length, 20.0);
        assert_eq!(Ruler::default().with_length(1e9).length, 4000.0);
        assert_eq!(Ruler::default().with_length(f64::INFINITY).length, 400.0);
    }

    #[test]
    fn test_anchor_line_follows_angle() {
        let ruler = Ruler::new(Point::ZERO).rotated(90.0).with_length(100.0);
        let line = ruler.anchor_line().unwrap();
        assert_eq!(line.p0, Point::ZERO);
        assert!(line.p1.x.abs() < 1e-9);
        assert!((line.p1.y - 100.0).abs() < 1e-9);
    }
}
