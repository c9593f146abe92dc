//! Virtual drafting instruments.
//!
//! Instruments are small `Copy` values. Every transform returns an updated
//! value instead of mutating in place, so snapshots held by the history stay
//! untouched.

mod compass;
mod protractor;
mod ruler;
mod set_square;

pub use compass::{Compass, COMPASS_RADIUS_RANGE, COMPASS_SCALE_RANGE};
pub use protractor::{Protractor, PROTRACTOR_RADIUS_RANGE};
pub use ruler::{Ruler, RULER_LENGTH_RANGE};
pub use set_square::{SetSquare, SetSquareVariant, SET_SQUARE_SIZE_RANGE};

use crate::tools::ToolKind;
use kurbo::{Line, Point, Vec2};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Common trait for all instruments.
pub trait InstrumentTrait: Copy {
    /// Tool that manipulates this instrument.
    fn kind(&self) -> ToolKind;

    /// The point the instrument is held by (and snapped to).
    fn anchor_position(&self) -> Point;

    /// Reference line for angle snapping, if the instrument has one.
    fn anchor_line(&self) -> Option<Line>;

    /// Orientation in degrees, `[0, 360)`.
    fn angle(&self) -> f64;

    /// Move the anchor to `position`.
    fn moved(self, position: Point) -> Self;

    /// Set the orientation.
    fn rotated(self, angle_degrees: f64) -> Self;

    /// Move the anchor by `delta`.
    fn translated(self, delta: Vec2) -> Self {
        let position = self.anchor_position() + delta;
        self.moved(position)
    }

    /// Rotate by `delta_degrees` relative to the current orientation.
    fn rotated_by(self, delta_degrees: f64) -> Self {
        let angle = self.angle() + delta_degrees;
        self.rotated(angle)
    }
}

/// Clamp a requested size into `range`; non-finite requests keep `current`.
pub(crate) fn clamp_size(requested: f64, current: f64, range: &RangeInclusive<f64>) -> f64 {
    if !requested.is_finite() {
        log::warn!("ignoring non-finite instrument size {}", requested);
        return current;
    }
    requested.clamp(*range.start(), *range.end())
}

/// Normalize a requested angle; non-finite requests keep `current`.
pub(crate) fn sanitize_angle(requested: f64, current: f64) -> f64 {
    if !requested.is_finite() {
        log::warn!("ignoring non-finite instrument angle {}", requested);
        return current;
    }
    crate::geometry::normalize_degrees(requested)
}

/// Enum wrapper over the four instruments for uniform access.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Instrument {
    Ruler(Ruler),
    SetSquare(SetSquare),
    Protractor(Protractor),
    Compass(Compass),
}

impl Instrument {
    pub fn kind(&self) -> ToolKind {
        match self {
            Instrument::Ruler(i) => i.kind(),
            Instrument::SetSquare(i) => i.kind(),
            Instrument::Protractor(i) => i.kind(),
            Instrument::Compass(i) => i.kind(),
        }
    }

    pub fn anchor_position(&self) -> Point {
        match self {
            Instrument::Ruler(i) => i.anchor_position(),
            Instrument::SetSquare(i) => i.anchor_position(),
            Instrument::Protractor(i) => i.anchor_position(),
            Instrument::Compass(i) => i.anchor_position(),
        }
    }

    pub fn anchor_line(&self) -> Option<Line> {
        match self {
            Instrument::Ruler(i) => i.anchor_line(),
            Instrument::SetSquare(i) => i.anchor_line(),
            Instrument::Protractor(i) => i.anchor_line(),
            Instrument::Compass(i) => i.anchor_line(),
        }
    }

    pub fn angle(&self) -> f64 {
        match self {
            Instrument::Ruler(i) => i.angle(),
            Instrument::SetSquare(i) => i.angle(),
            Instrument::Protractor(i) => i.angle(),
            Instrument::Compass(i) => i.angle(),
        }
    }
}
