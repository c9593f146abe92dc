//! Viewport zoom and pan.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.1;
/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 10.0;

/// Viewport manages the view transform between screen and drawing
/// coordinates.
///
/// Hosts convert pointer positions with [`Viewport::screen_to_world`] before
/// handing them to the session; the zoom also scales the snap radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Current translation offset (pan).
    pub offset: Vec2,
    /// Current zoom level (1.0 = 100%).
    pub zoom: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

impl Viewport {
    /// Create a viewport at zoom 1 with no pan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform from drawing coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Transform from screen coordinates to drawing coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to drawing coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a drawing point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Pan by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        if delta.x.is_finite() && delta.y.is_finite() {
            self.offset += delta;
        }
    }

    /// Set the zoom, clamped to the allowed range.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            log::warn!("ignoring non-finite zoom {}", zoom);
            return;
        }
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Multiply the zoom by `factor`, clamped.
    pub fn zoom_by(&mut self, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            log::warn!("ignoring zoom factor {}", factor);
            return;
        }
        self.set_zoom(self.zoom * factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_viewport() {
        let viewport = Viewport::new();
        assert_eq!(viewport.offset, Vec2::ZERO);
        assert!((viewport.zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_offset() {
        let mut viewport = Viewport::new();
        viewport.offset = Vec2::new(50.0, 100.0);
        let world = viewport.screen_to_world(Point::new(100.0, 200.0));
        assert!((world.x - 50.0).abs() < f64::EPSILON);
        assert!((world.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_zoom() {
        let mut viewport = Viewport::new();
        viewport.set_zoom(2.0);
        let world = viewport.screen_to_world(Point::new(100.0, 200.0));
        assert!((world.x - 50.0).abs() < f64::EPSILON);
        assert!((world.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut viewport = Viewport::new();
        viewport.offset = Vec2::new(30.0, -20.0);
        viewport.set_zoom(1.5);

        let original = Point::new(123.0, 456.0);
        let back = viewport.world_to_screen(viewport.screen_to_world(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut viewport = Viewport::new();
        viewport.zoom_by(0.001);
        assert!((viewport.zoom - MIN_ZOOM).abs() < f64::EPSILON);

        viewport.set_zoom(1000.0);
        assert!((viewport.zoom - MAX_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_rejects_bad_factor() {
        let mut viewport = Viewport::new();
        viewport.zoom_by(-2.0);
        viewport.zoom_by(f64::NAN);
        viewport.set_zoom(f64::INFINITY);
        assert!((viewport.zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pan() {
        let mut viewport = Viewport::new();
        viewport.pan(Vec2::new(10.0, 20.0));
        assert!((viewport.offset.x - 10.0).abs() < f64::EPSILON);
        assert!((viewport.offset.y - 20.0).abs() < f64::EPSILON);
    }
}
