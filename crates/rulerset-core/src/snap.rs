//! Snap functionality for aligning an input point to existing geometry,
//! the grid and common angles.

use crate::geometry::{self, angle_diff, distance, line_intersection, segment_bounds};
use crate::shapes::Shape;
use kurbo::{Line, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Angles (degrees, relative to the anchor line) that angle snapping prefers.
pub const COMMON_ANGLES: [f64; 9] = [0.0, 30.0, 45.0, 60.0, 90.0, 120.0, 135.0, 150.0, 180.0];

/// Snap radius at zoom 1, in pixels.
pub const DEFAULT_BASE_SNAP_RADIUS: f64 = 24.0;

/// Lower bound of the zoom-adjusted snap radius, in pixels.
pub const DEFAULT_MIN_SNAP_RADIUS: f64 = 8.0;

/// Maximum angular distance to a common angle for angle snapping.
pub const DEFAULT_ANGLE_TOLERANCE: f64 = 7.0;

/// Physical grid spacing.
pub const DEFAULT_GRID_SPACING_MM: f64 = 5.0;

/// Pixel density assumed when the host does not report one.
pub const REFERENCE_DPI: f64 = 160.0;

const MM_PER_INCH: f64 = 25.4;

/// Distances closer than this are considered equal and resolved by priority.
pub const TIE_EPSILON: f64 = 1e-6;

/// Above this many segments near the input point, intersection candidates
/// are not computed.
pub const MAX_INTERSECTION_SEGMENTS: usize = 64;

/// Tolerance for deciding whether an intersection lies on a segment.
const ON_SEGMENT_EPSILON: f64 = 1e-6;

/// Why a point was snapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SnapReason {
    /// Not snapped, the raw point is returned.
    #[default]
    None,
    /// Snapped to a grid intersection.
    Grid,
    /// Snapped to a vertex, midpoint, intersection or instrument anchor.
    Point,
    /// Snapped onto a common angle relative to the anchor line.
    Angle,
}

impl SnapReason {
    /// Tie-break rank, higher wins.
    pub fn priority(self) -> u8 {
        match self {
            SnapReason::None => 0,
            SnapReason::Grid => 1,
            SnapReason::Angle => 2,
            SnapReason::Point => 3,
        }
    }
}

impl fmt::Display for SnapReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SnapReason::None => "none",
            SnapReason::Grid => "grid",
            SnapReason::Point => "point",
            SnapReason::Angle => "angle",
        };
        f.write_str(name)
    }
}

/// A qualifying snap target produced by one candidate source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapCandidate {
    pub point: Point,
    pub reason: SnapReason,
    /// Distance from the raw input point.
    pub distance: f64,
}

/// Result of a snap operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapResult {
    /// The snapped point (the raw point when nothing qualified).
    pub point: Point,
    /// The single reason reported for this result.
    pub reason: SnapReason,
    /// Runner-up candidates from the other sources, best first.
    pub alternatives: Vec<SnapCandidate>,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            reason: SnapReason::None,
            alternatives: Vec::new(),
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.reason != SnapReason::None
    }
}

/// Tunables for the snap engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Master switch; when off every snap returns the raw point.
    pub enabled: bool,
    /// Snap radius at zoom 1, in pixels.
    pub base_radius: f64,
    /// Lower bound for the zoom-adjusted radius.
    pub min_radius: f64,
    /// Physical grid spacing in millimeters.
    pub grid_spacing_mm: f64,
    /// Device pixel density.
    pub dpi: f64,
    /// Angular tolerance for common-angle snapping, in degrees.
    pub angle_tolerance: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_radius: DEFAULT_BASE_SNAP_RADIUS,
            min_radius: DEFAULT_MIN_SNAP_RADIUS,
            grid_spacing_mm: DEFAULT_GRID_SPACING_MM,
            dpi: REFERENCE_DPI,
            angle_tolerance: DEFAULT_ANGLE_TOLERANCE,
        }
    }
}

impl SnapConfig {
    /// Effective snap radius at the given zoom.
    pub fn radius_for_zoom(&self, zoom: f64) -> f64 {
        snap_radius(zoom, self.base_radius, self.min_radius)
    }

    /// Grid spacing in pixels.
    pub fn grid_spacing_px(&self) -> f64 {
        grid_spacing_px(self.grid_spacing_mm, self.dpi)
    }
}

/// Zoom-adjusted snap radius: `max(min, base / zoom)`.
pub fn snap_radius(zoom: f64, base: f64, min: f64) -> f64 {
    if !zoom.is_finite() || zoom <= 0.0 {
        return base.max(min);
    }
    (base / zoom).max(min)
}

/// Convert a physical grid spacing to pixels.
pub fn grid_spacing_px(mm: f64, dpi: f64) -> f64 {
    mm * dpi / MM_PER_INCH
}

/// Everything the snap engine looks at besides the raw point.
#[derive(Debug, Clone)]
pub struct SnapContext<'a> {
    /// Effective snap radius in pixels.
    pub radius: f64,
    /// Committed shapes.
    pub shapes: &'a [Shape],
    /// Instrument anchor positions.
    pub anchors: Vec<Point>,
    /// Reference line for angle snapping.
    pub anchor_line: Option<Line>,
    /// Grid spacing in pixels; non-positive disables grid snapping.
    pub grid_spacing: f64,
    /// Angular tolerance in degrees.
    pub angle_tolerance: f64,
}

impl<'a> SnapContext<'a> {
    pub fn new(radius: f64, shapes: &'a [Shape]) -> Self {
        Self {
            radius,
            shapes,
            anchors: Vec::new(),
            anchor_line: None,
            grid_spacing: 0.0,
            angle_tolerance: DEFAULT_ANGLE_TOLERANCE,
        }
    }

    pub fn with_anchors(mut self, anchors: Vec<Point>) -> Self {
        self.anchors = anchors;
        self
    }

    pub fn with_anchor_line(mut self, line: Option<Line>) -> Self {
        self.anchor_line = line;
        self
    }

    pub fn with_grid_spacing(mut self, spacing: f64) -> Self {
        self.grid_spacing = spacing;
        self
    }

    pub fn with_angle_tolerance(mut self, tolerance: f64) -> Self {
        self.angle_tolerance = tolerance;
        self
    }
}

/// Snap `raw` to the best qualifying candidate.
///
/// Closest candidate wins; near-equal distances fall back to
/// Point > Angle > Grid. Returns `raw` with [`SnapReason::None`] when nothing
/// lies within the radius.
pub fn snap(raw: Point, ctx: &SnapContext<'_>) -> SnapResult {
    let mut candidates: Vec<SnapCandidate> = Vec::with_capacity(3);

    if let Some(p) = nearest_point_target(raw, ctx) {
        candidates.push(p);
    }

    if let Some(angle_point) = ctx
        .anchor_line
        .and_then(|line| snap_to_angle(raw, line, ctx.angle_tolerance))
    {
        candidates.push(SnapCandidate {
            point: angle_point,
            reason: SnapReason::Angle,
            distance: distance(raw, angle_point),
        });
    }

    if let Some(grid_point) = snap_to_grid(raw, ctx.grid_spacing) {
        candidates.push(SnapCandidate {
            point: grid_point,
            reason: SnapReason::Grid,
            distance: distance(raw, grid_point),
        });
    }

    candidates.retain(|c| c.distance <= ctx.radius);

    let Some(best_index) = best_candidate(&candidates) else {
        return SnapResult::none(raw);
    };

    let best = candidates.remove(best_index);
    candidates.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then(b.reason.priority().cmp(&a.reason.priority()))
    });

    log::debug!("snap {:?} -> {:?} ({})", raw, best.point, best.reason);

    SnapResult {
        point: best.point,
        reason: best.reason,
        alternatives: candidates,
    }
}

/// Index of the winning candidate under the distance/priority rule.
fn best_candidate(candidates: &[SnapCandidate]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, c) in candidates.iter().enumerate() {
        let better = match best {
            None => true,
            Some(b) => is_better(c, &candidates[b]),
        };
        if better {
            best = Some(i);
        }
    }
    best
}

fn is_better(a: &SnapCandidate, b: &SnapCandidate) -> bool {
    if (a.distance - b.distance).abs() <= TIE_EPSILON {
        a.reason.priority() > b.reason.priority()
    } else {
        a.distance < b.distance
    }
}

/// Round each coordinate to the nearest multiple of `spacing`.
pub fn snap_to_grid(point: Point, spacing: f64) -> Option<Point> {
    if !spacing.is_finite() || spacing <= 0.0 {
        return None;
    }
    Some(Point::new(
        (point.x / spacing).round() * spacing,
        (point.y / spacing).round() * spacing,
    ))
}

/// Nearest common angle (or its mirror across the anchor) to `relative`.
///
/// Returns the signed offset `relative - target` when within `tolerance`.
fn common_angle_offset(relative: f64, tolerance: f64) -> Option<f64> {
    let mut best: Option<f64> = None;
    for base in COMMON_ANGLES {
        for target in [base, base + 180.0] {
            let d = angle_diff(relative, target);
            if d.abs() <= tolerance && best.is_none_or(|b| d.abs() < b.abs()) {
                best = Some(d);
            }
        }
    }
    best
}

/// Rotate `raw` about the anchor start so that its direction, measured
/// against the anchor line, lands on a common angle.
///
/// Distance from the anchor start is preserved. `None` for a zero-length
/// anchor, a raw point on the anchor start, or no common angle in range.
pub fn snap_to_angle(raw: Point, anchor: Line, tolerance: f64) -> Option<Point> {
    let anchor_dir = geometry::direction_degrees(anchor)?;
    let raw_dir = geometry::vector_degrees(raw - anchor.p0)?;
    let relative = angle_diff(raw_dir, anchor_dir);
    let offset = common_angle_offset(relative, tolerance)?;
    Some(geometry::rotate(anchor.p0, raw, -offset))
}

/// Closest vertex, midpoint, intersection or instrument anchor within radius.
fn nearest_point_target(raw: Point, ctx: &SnapContext<'_>) -> Option<SnapCandidate> {
    let mut best: Option<SnapCandidate> = None;
    let mut consider = |point: Point| {
        let d = distance(raw, point);
        if d > ctx.radius {
            return;
        }
        if best.is_none_or(|b| d < b.distance - TIE_EPSILON) {
            best = Some(SnapCandidate {
                point,
                reason: SnapReason::Point,
                distance: d,
            });
        }
    };

    for shape in ctx.shapes {
        for &vertex in shape.vertices() {
            consider(vertex);
        }
        for (a, b) in shape.segments() {
            consider(geometry::midpoint(a, b));
        }
    }

    for point in intersection_targets(raw, ctx) {
        consider(point);
    }

    for &anchor in &ctx.anchors {
        consider(anchor);
    }

    best
}

/// Pairwise intersections of the committed segments near `raw`.
fn intersection_targets(raw: Point, ctx: &SnapContext<'_>) -> Vec<Point> {
    let r = ctx.radius;
    let nearby: Vec<(Point, Point)> = ctx
        .shapes
        .iter()
        .flat_map(|shape| shape.segments())
        .filter(|&(a, b)| segment_bounds(a, b).inflate(r, r).contains(raw))
        .collect();

    if nearby.len() > MAX_INTERSECTION_SEGMENTS {
        log::debug!(
            "skipping intersection snap: {} segments near {:?}",
            nearby.len(),
            raw
        );
        return Vec::new();
    }

    let mut points = Vec::new();
    for (i, &(a1, a2)) in nearby.iter().enumerate() {
        for &(b1, b2) in &nearby[i + 1..] {
            let Some(p) = line_intersection(a1, a2, b1, b2) else {
                continue;
            };
            let on_a = segment_bounds(a1, a2)
                .inflate(ON_SEGMENT_EPSILON, ON_SEGMENT_EPSILON)
                .contains(p);
            let on_b = segment_bounds(b1, b2)
                .inflate(ON_SEGMENT_EPSILON, ON_SEGMENT_EPSILON)
                .contains(p);
            if on_a && on_b {
                points.push(p);
            }
        }
    }
    points
}
