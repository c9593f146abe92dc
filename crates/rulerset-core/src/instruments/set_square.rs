//! Set-square (drafting triangle).

use super::{clamp_size, sanitize_angle, InstrumentTrait};
use crate::geometry::polar;
use crate::tools::ToolKind;
use kurbo::{Line, Point};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Allowed set-square sizes (base leg length) in pixels.
pub const SET_SQUARE_SIZE_RANGE: RangeInclusive<f64> = 20.0..=2000.0;

/// Triangle shape of the set-square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SetSquareVariant {
    /// 45°-45°-90°.
    #[default]
    Deg45,
    /// 30°-60°-90°.
    Deg30_60,
}

impl SetSquareVariant {
    /// Angle at the far end of the base leg, in degrees.
    pub fn base_angle(self) -> f64 {
        match self {
            SetSquareVariant::Deg45 => 45.0,
            SetSquareVariant::Deg30_60 => 30.0,
        }
    }

    /// Toggle between the two variants.
    pub fn next(self) -> Self {
        match self {
            SetSquareVariant::Deg45 => SetSquareVariant::Deg30_60,
            SetSquareVariant::Deg30_60 => SetSquareVariant::Deg45,
        }
    }
}

/// A set-square with its right angle at `position` and base leg of `size`
/// pixels running in direction `angle`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetSquare {
    pub position: Point,
    /// Degrees, `[0, 360)`.
    pub angle: f64,
    pub size: f64,
    pub variant: SetSquareVariant,
}

impl SetSquare {
    pub const DEFAULT_POSITION: Point = Point::new(600.0, 400.0);
    pub const DEFAULT_SIZE: f64 = 200.0;

    pub fn new(position: Point) -> Self {
        Self {
            position,
            angle: 0.0,
            size: Self::DEFAULT_SIZE,
            variant: SetSquareVariant::default(),
        }
    }

    pub fn with_size(self, size: f64) -> Self {
        Self {
            size: clamp_size(size, self.size, &SET_SQUARE_SIZE_RANGE),
            ..self
        }
    }

    pub fn with_variant(self, variant: SetSquareVariant) -> Self {
        Self { variant, ..self }
    }

    /// Corners: right-angle vertex, end of the base leg, apex of the
    /// perpendicular leg.
    pub fn vertices(&self) -> [Point; 3] {
        let height = self.size * self.variant.base_angle().to_radians().tan();
        [
            self.position,
            polar(self.position, self.angle, self.size),
            polar(self.position, self.angle - 90.0, height),
        ]
    }
}

impl Default for SetSquare {
    fn default() -> Self {
        Self::new(Self::DEFAULT_POSITION)
    }
}

impl InstrumentTrait for SetSquare {
    fn kind(&self) -> ToolKind {
        ToolKind::SetSquare
    }

    fn anchor_position(&self) -> Point {
        self.position
    }

    /// The base leg.
    fn anchor_line(&self) -> Option<Line> {
        Some(Line::new(self.position, polar(self.position, self.angle, self.size)))
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
        let sq = SetSquare::default();
        assert_eq!(sq.size, 200.0);
        assert_eq!(sq.angle, 0.0);
        assert_eq!(sq.variant, SetSquareVariant::Deg45);
    }

    #[test]
    fn test_variant_toggle() {
        let sq = SetSquare::default().with_variant(SetSquareVariant::Deg45.next());
        assert_eq!(sq.variant, SetSquareVariant::Deg30_60);
        assert_eq!(sq.variant.next(), SetSquareVariant::Deg45);
    }

    #[test]
    fn test_size_clamped() {
        assert_eq!(SetSquare::default().with_size(0.0).size, 20.0);
        assert_eq!(SetSquare::default().with_size(5000.0).size, 2000.0);
    }

    #[test]
    fn test_vertices_45() {
        let sq = SetSquare::new(Point::ZERO).with_size(100.0);
        let [corner, base_end, apex] = sq.vertices();
        assert_eq!(corner, Point::ZERO);
        assert!((base_end.x - 100.0).abs() < 1e-9);
        assert!(apex.x.abs() < 1e-9);
        assert!((apex.y + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_anchor_line_is_base_leg() {
        let sq = SetSquare::new(Point::new(10.0, 10.0)).rotated(45.0);
        let line = sq.anchor_line().unwrap();
        assert_eq!(line.p0, Point::new(10.0, 10.0));
        let dir = crate::geometry::direction_degrees(line).unwrap();
        assert!((dir - 45.0).abs() < 1e-9);
    }
}
