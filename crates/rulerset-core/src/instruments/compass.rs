//! Compass.

use super::{clamp_size, InstrumentTrait};
use crate::tools::ToolKind;
use kurbo::{Line, Point};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Radii accepted from direct input (slider), in pixels.
pub const COMPASS_RADIUS_RANGE: RangeInclusive<f64> = 0.0..=2000.0;

/// Radii reachable through multiplicative (pinch) adjustment.
pub const COMPASS_SCALE_RANGE: RangeInclusive<f64> = 10.0..=2000.0;

/// A compass with its needle at `center`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Compass {
    pub center: Point,
    pub radius: f64,
}

impl Compass {
    pub const DEFAULT_CENTER: Point = Point::new(500.0, 800.0);
    pub const DEFAULT_RADIUS: f64 = 0.0;

    pub fn new(center: Point) -> Self {
        Self {
            center,
            radius: Self::DEFAULT_RADIUS,
        }
    }

    pub fn with_radius(self, radius: f64) -> Self {
        Self {
            radius: clamp_size(radius, self.radius, &COMPASS_RADIUS_RANGE),
            ..self
        }
    }

    /// Scale the radius by a gesture factor, clamped to
    /// [`COMPASS_SCALE_RANGE`].
    pub fn scaled_radius(self, factor: f64) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            log::warn!("ignoring compass scale factor {}", factor);
            return self;
        }
        Self {
            radius: clamp_size(self.radius * factor, self.radius, &COMPASS_SCALE_RANGE),
            ..self
        }
    }
}

impl Default for Compass {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CENTER)
    }
}

impl InstrumentTrait for Compass {
    fn kind(&self) -> ToolKind {
        ToolKind::Compass
    }

    fn anchor_position(&self) -> Point {
        self.center
    }

    /// Compasses do not take part in angle snapping.
    fn anchor_line(&self) -> Option<Line> {
        None
    }

    fn angle(&self) -> f64 {
        0.0
    }

    fn moved(self, center: Point) -> Self {
        Self { center, ..self }
    }

    /// Rotationally symmetric; orientation is not tracked.
    fn rotated(self, _angle_degrees: f64) -> Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = Compass::default();
        assert_eq!(c.center, Point::new(500.0, 800.0));
        assert_eq!(c.radius, 0.0);
        assert!(c.anchor_line().is_none());
    }

    #[test]
    fn test_scaled_radius_clamped() {
        let c = Compass::default().with_radius(100.0);
        assert_eq!(c.scaled_radius(1.5).radius, 150.0);
        assert_eq!(c.scaled_radius(1000.0).radius, 2000.0);
        assert_eq!(c.scaled_radius(0.01).radius, 10.0);
        // Zero radius grows to the lower bound instead of staying degenerate
        assert_eq!(Compass::default().scaled_radius(2.0).radius, 10.0);
    }

    #[test]
    fn test_scaled_radius_rejects_bad_factor() {
        let c = Compass::default().with_radius(100.0);
        assert_eq!(c.scaled_radius(0.0), c);
        assert_eq!(c.scaled_radius(f64::NAN), c);
    }

    #[test]
    fn test_with_radius_clamped() {
        assert_eq!(Compass::default().with_radius(-5.0).radius, 0.0);
        assert_eq!(Compass::default().with_radius(9000.0).radius, 2000.0);
    }

    #[test]
    fn test_rotation_is_identity() {
        let c = Compass::default().with_radius(42.0);
        assert_eq!(c.rotated(90.0), c);
    }
}
