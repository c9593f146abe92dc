//! Protractor.

use super::{clamp_size, sanitize_angle, InstrumentTrait};
use crate::geometry::polar;
use crate::tools::ToolKind;
use kurbo::{Line, Point};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Allowed protractor radii in pixels.
pub const PROTRACTOR_RADIUS_RANGE: RangeInclusive<f64> = 20.0..=1000.0;

/// A protractor centered at `position`; `angle` is the measured ray.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Protractor {
    pub position: Point,
    pub radius: f64,
    /// Degrees, `[0, 360)`.
    pub angle: f64,
}

impl Protractor {
    pub const DEFAULT_POSITION: Point = Point::new(500.0, 600.0);
    pub const DEFAULT_RADIUS: f64 = 120.0;

    pub fn new(position: Point) -> Self {
        Self {
            position,
            radius: Self::DEFAULT_RADIUS,
            angle: 0.0,
        }
    }

    pub fn with_radius(self, radius: f64) -> Self {
        Self {
            radius: clamp_size(radius, self.radius, &PROTRACTOR_RADIUS_RANGE),
            ..self
        }
    }
}

impl Default for Protractor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_POSITION)
    }
}

impl InstrumentTrait for Protractor {
    fn kind(&self) -> ToolKind {
        ToolKind::Protractor
    }

    fn anchor_position(&self) -> Point {
        self.position
    }

    /// The ray at the current angle.
    fn anchor_line(&self) -> Option<Line> {
        Some(Line::new(self.position, polar(self.position, self.angle, self.radius)))
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
        let p = Protractor::default();
        assert_eq!(p.radius, 120.0);
        assert_eq!(p.angle, 0.0);
    }

    #[test]
    fn test_rotation_wraps() {
        let p = Protractor::default().rotated(370.0);
        assert!((p.angle - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_ray_length_is_radius() {
        let p = Protractor::new(Point::ZERO).with_radius(50.0).rotated(180.0);
        let ray = p.anchor_line().unwrap();
        assert!((ray.p1.x + 50.0).abs() < 1e-9);
        assert!(ray.p1.y.abs() < 1e-9);
    }
}
