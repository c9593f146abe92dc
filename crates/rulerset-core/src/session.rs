//! Drawing session: the interaction state machine.
//!
//! A [`DrawingSession`] owns the current [`DrawingState`], its undo history,
//! the drag state and the pending notifications. Every transition builds a
//! new state value and replaces the old one; snapshots pushed to the history
//! are never touched afterwards.

use crate::calibration::Calibration;
use crate::geometry;
use crate::history::{History, Revert, DEFAULT_HISTORY_CAPACITY};
use crate::instruments::{
    Compass, Instrument, InstrumentTrait, Protractor, Ruler, SetSquare, SetSquareVariant,
};
use crate::shapes::{Polyline, Shape, ShapeTrait};
use crate::snap::{self, SnapConfig, SnapContext, SnapReason, SnapResult};
use crate::tools::{DragState, DragTarget, ToolKind};
use crate::viewport::Viewport;
use kurbo::{Line, Point, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything the host renders, captured as one value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DrawingState {
    pub tool: ToolKind,
    /// Committed shapes in commit order.
    pub shapes: Vec<Shape>,
    /// In-progress pen stroke.
    pub stroke: Vec<Point>,
    pub ruler: Option<Ruler>,
    pub set_square: Option<SetSquare>,
    pub protractor: Option<Protractor>,
    pub compass: Option<Compass>,
    /// Most recently selected instrument tool.
    pub last_instrument: Option<ToolKind>,
    pub viewport: Viewport,
    pub calibration: Calibration,
}

impl DrawingState {
    /// The instrument manipulated by `tool`, if it has been instantiated.
    pub fn instrument(&self, tool: ToolKind) -> Option<Instrument> {
        match tool {
            ToolKind::Pen => None,
            ToolKind::Ruler => self.ruler.map(Instrument::Ruler),
            ToolKind::SetSquare => self.set_square.map(Instrument::SetSquare),
            ToolKind::Protractor => self.protractor.map(Instrument::Protractor),
            ToolKind::Compass => self.compass.map(Instrument::Compass),
        }
    }

    /// All instantiated instruments.
    pub fn instruments(&self) -> impl Iterator<Item = Instrument> + '_ {
        [
            self.ruler.map(Instrument::Ruler),
            self.set_square.map(Instrument::SetSquare),
            self.protractor.map(Instrument::Protractor),
            self.compass.map(Instrument::Compass),
        ]
        .into_iter()
        .flatten()
    }

    /// Store `instrument` in its slot.
    pub fn set_instrument(&mut self, instrument: Instrument) {
        match instrument {
            Instrument::Ruler(i) => self.ruler = Some(i),
            Instrument::SetSquare(i) => self.set_square = Some(i),
            Instrument::Protractor(i) => self.protractor = Some(i),
            Instrument::Compass(i) => self.compass = Some(i),
        }
    }

    fn ensure_instrument(&mut self, tool: ToolKind) {
        if self.instrument(tool).is_some() {
            return;
        }
        if let Some(instrument) = default_instrument(tool) {
            log::debug!("instantiating {} with defaults", tool);
            self.set_instrument(instrument);
        }
    }
}

fn default_instrument(tool: ToolKind) -> Option<Instrument> {
    match tool {
        ToolKind::Pen => None,
        ToolKind::Ruler => Some(Instrument::Ruler(Ruler::default())),
        ToolKind::SetSquare => Some(Instrument::SetSquare(SetSquare::default())),
        ToolKind::Protractor => Some(Instrument::Protractor(Protractor::default())),
        ToolKind::Compass => Some(Instrument::Compass(Compass::default())),
    }
}

fn moved_instrument(instrument: Instrument, position: Point) -> Instrument {
    match instrument {
        Instrument::Ruler(i) => Instrument::Ruler(i.moved(position)),
        Instrument::SetSquare(i) => Instrument::SetSquare(i.moved(position)),
        Instrument::Protractor(i) => Instrument::Protractor(i.moved(position)),
        Instrument::Compass(i) => Instrument::Compass(i.moved(position)),
    }
}

/// Session settings that are not part of the undoable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub snap: SnapConfig,
    pub history_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            snap: SnapConfig::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// Informational messages for the host. None of them are failures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Notification {
    NothingToUndo,
    NothingToRedo,
    SnapToggled(bool),
    Calibrated { px_per_cm: f64 },
    CalibrationRejected,
    /// The reported snap reason changed to a real snap.
    SnapChanged(SnapReason),
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::NothingToUndo => f.write_str("Nothing to undo"),
            Notification::NothingToRedo => f.write_str("Nothing to redo"),
            Notification::SnapToggled(true) => f.write_str("Snap ON"),
            Notification::SnapToggled(false) => f.write_str("Snap OFF"),
            Notification::Calibrated { px_per_cm } => {
                write!(f, "Calibrated: {:.2} px/cm", px_per_cm)
            }
            Notification::CalibrationRejected => {
                f.write_str("Calibration needs a positive length and distance")
            }
            Notification::SnapChanged(reason) => write!(f, "Snapped to {}", reason),
        }
    }
}

/// The interactive drawing session.
#[derive(Debug, Clone)]
pub struct DrawingSession {
    state: DrawingState,
    history: History<DrawingState>,
    drag: DragState,
    /// What the push at drag start displaced, for cancel.
    drag_revert: Option<Revert<DrawingState>>,
    config: SessionConfig,
    last_snap: Option<SnapResult>,
    notifications: Vec<Notification>,
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl DrawingSession {
    /// Create a session with the pen active and nothing drawn.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            state: DrawingState::default(),
            history: History::new(config.history_capacity),
            drag: DragState::Idle,
            drag_revert: None,
            config,
            last_snap: None,
            notifications: Vec::new(),
        }
    }

    /// Start from existing shapes (e.g. a loaded drawing) with empty history.
    pub fn with_shapes(config: SessionConfig, shapes: Vec<Shape>) -> Self {
        let mut session = Self::new(config);
        session.state.shapes = shapes;
        session
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    pub fn tool(&self) -> ToolKind {
        self.state.tool
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.state.shapes
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn history(&self) -> &History<DrawingState> {
        &self.history
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// The most recently reported snap result.
    pub fn last_snap(&self) -> Option<&SnapResult> {
        self.last_snap.as_ref()
    }

    /// Drain pending notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Record the current state before a change.
    fn push_history(&mut self) {
        self.drag_revert = None;
        self.history.push(self.state.clone());
    }

    /// Record the current state at the start of a drag, keeping what the
    /// push displaced until the drag ends.
    fn push_drag_history(&mut self) {
        self.drag_revert = Some(self.history.push_revertible(self.state.clone()));
    }

    fn end_drag(&mut self) {
        self.drag = DragState::Idle;
        self.drag_revert = None;
    }

    fn notify(&mut self, notification: Notification) {
        log::debug!("notification: {}", notification);
        self.notifications.push(notification);
    }

    /// Build the next state from a copy of the current one.
    fn update(&mut self, f: impl FnOnce(&mut DrawingState)) {
        let mut next = self.state.clone();
        f(&mut next);
        self.state = next;
    }

    // --- Tools ---

    /// Switch the active tool. Any in-progress stroke is discarded.
    pub fn select_tool(&mut self, tool: ToolKind) {
        self.push_history();
        self.end_drag();
        self.update(|s| {
            s.tool = tool;
            s.stroke.clear();
            if tool.is_instrument() {
                s.ensure_instrument(tool);
                s.last_instrument = Some(tool);
            }
        });
        log::debug!("tool selected: {}", tool);
    }

    // --- Pointer drag ---

    /// Start a drag gesture at `raw` (drawing coordinates).
    pub fn pointer_down(&mut self, raw: Point) {
        self.push_drag_history();
        let tool = self.state.tool;

        if tool == ToolKind::Pen {
            let anchor = self.pen_anchor_line();
            let snapped = self.snap_point(raw, anchor, None);
            self.update(|s| s.stroke = vec![snapped]);
            self.drag = DragState::Dragging(DragTarget::Stroke);
            return;
        }

        self.update(|s| s.ensure_instrument(tool));
        let Some(instrument) = self.state.instrument(tool) else {
            return;
        };
        // The grab offset is taken from the unsnapped anchor; moves snap it.
        let anchor = instrument.anchor_position();
        let result = self.compute_snap(anchor, None, Some(tool));
        self.report_snap(result);
        self.drag = DragState::Dragging(DragTarget::Instrument {
            tool,
            grab_offset: anchor - raw,
        });
    }

    /// Continue the active drag. Ignored when no drag is in progress.
    pub fn pointer_move(&mut self, raw: Point) {
        match self.drag.target() {
            Some(DragTarget::Stroke) => {
                let anchor = self.pen_anchor_line();
                let snapped = self.snap_point(raw, anchor, None);
                self.update(|s| s.stroke.push(snapped));
            }
            Some(DragTarget::Instrument { tool, grab_offset }) => {
                let Some(instrument) = self.state.instrument(tool) else {
                    return;
                };
                let target = raw + grab_offset;
                let snapped = self.snap_point(target, None, Some(tool));
                self.update(|s| s.set_instrument(moved_instrument(instrument, snapped)));
            }
            Some(DragTarget::Transform) | None => {}
        }
    }

    /// Finish the active drag, committing a pen stroke of at least two points.
    pub fn pointer_up(&mut self) {
        let target = self.drag.target();
        self.end_drag();

        if target != Some(DragTarget::Stroke) {
            return;
        }

        let polyline = if self.state.stroke.len() < 2 {
            log::debug!("discarding stroke with {} point(s)", self.state.stroke.len());
            None
        } else {
            let polyline = Polyline::from_points(self.state.stroke.clone());
            log::info!(
                "committed polyline {} with {} points",
                polyline.id(),
                polyline.len()
            );
            Some(polyline)
        };
        self.update(|s| {
            s.stroke.clear();
            s.shapes.extend(polyline.map(Shape::Polyline));
        });
    }

    /// Abandon the active drag, leaving the session as if it never started.
    pub fn pointer_cancel(&mut self) {
        if !self.drag.is_active() {
            return;
        }
        self.drag = DragState::Idle;
        let Some(revert) = self.drag_revert.take() else {
            return;
        };
        if let Some(before) = self.history.revert(revert) {
            log::debug!("drag cancelled, restoring previous state");
            self.state = before;
        }
    }

    // --- Angle anchor ---

    /// Reference line for angle snapping while drawing.
    ///
    /// From the previous stroke point (along the last-used instrument's
    /// direction, else horizontal); before the first point, the last-used
    /// instrument's anchor line, else the last committed segment continued
    /// from its end.
    pub fn pen_anchor_line(&self) -> Option<Line> {
        let instrument_line = self
            .state
            .last_instrument
            .and_then(|tool| self.state.instrument(tool))
            .and_then(|i| i.anchor_line());

        if let Some(&previous) = self.state.stroke.last() {
            let direction = instrument_line
                .and_then(geometry::direction_degrees)
                .unwrap_or(0.0);
            return Some(Line::new(previous, geometry::polar(previous, direction, 1.0)));
        }

        if instrument_line.is_some() {
            return instrument_line;
        }

        self.state
            .shapes
            .iter()
            .rev()
            .filter_map(Shape::as_polyline)
            .find_map(|p| p.last_segment())
            .map(|(a, b)| Line::new(b, b + (b - a)))
    }

    // --- Snapping ---

    fn snap_context<'a>(&'a self, anchor_line: Option<Line>, exclude: Option<ToolKind>) -> SnapContext<'a> {
        let snap = &self.config.snap;
        let anchors = self
            .state
            .instruments()
            .filter(|i| Some(i.kind()) != exclude)
            .map(|i| i.anchor_position())
            .collect();
        SnapContext::new(snap.radius_for_zoom(self.state.viewport.zoom), &self.state.shapes)
            .with_anchors(anchors)
            .with_anchor_line(anchor_line)
            .with_grid_spacing(snap.grid_spacing_px())
            .with_angle_tolerance(snap.angle_tolerance)
    }

    fn compute_snap(&self, raw: Point, anchor_line: Option<Line>, exclude: Option<ToolKind>) -> SnapResult {
        if !self.config.snap.enabled {
            return SnapResult::none(raw);
        }
        snap::snap(raw, &self.snap_context(anchor_line, exclude))
    }

    /// Snap `raw`, record the result and return the point to use.
    fn snap_point(&mut self, raw: Point, anchor_line: Option<Line>, exclude: Option<ToolKind>) -> Point {
        let result = self.compute_snap(raw, anchor_line, exclude);
        let point = result.point;
        self.report_snap(result);
        point
    }

    fn report_snap(&mut self, result: SnapResult) {
        let previous = self.last_snap.as_ref().map(|r| r.reason);
        if result.is_snapped() && previous != Some(result.reason) {
            log::debug!("snap {} at ({:.1}, {:.1})", result.reason, result.point.x, result.point.y);
            self.notify(Notification::SnapChanged(result.reason));
        }
        self.last_snap = Some(result);
    }

    /// Compute the snap the pen would apply at `raw` without changing the
    /// drawing. The result becomes [`last_snap`](Self::last_snap).
    pub fn snap_preview(&mut self, raw: Point) -> SnapResult {
        let anchor = self.pen_anchor_line();
        let result = self.compute_snap(raw, anchor, None);
        self.report_snap(result.clone());
        result
    }

    /// Flip snapping on or off. Not recorded in history.
    pub fn toggle_snap(&mut self) -> bool {
        let enabled = !self.config.snap.enabled;
        self.config.snap.enabled = enabled;
        log::info!("snapping {}", if enabled { "enabled" } else { "disabled" });
        self.notify(Notification::SnapToggled(enabled));
        enabled
    }

    pub fn snap_enabled(&self) -> bool {
        self.config.snap.enabled
    }

    // --- History ---

    /// Restore the previous state. Returns false when there is nothing to
    /// undo.
    pub fn undo(&mut self) -> bool {
        self.end_drag();
        match self.history.undo(self.state.clone()) {
            Some(previous) => {
                self.state = previous;
                true
            }
            None => {
                self.notify(Notification::NothingToUndo);
                false
            }
        }
    }

    /// Re-apply the last undone change. Returns false when there is nothing
    /// to redo.
    pub fn redo(&mut self) -> bool {
        self.end_drag();
        match self.history.redo(self.state.clone()) {
            Some(next) => {
                self.state = next;
                true
            }
            None => {
                self.notify(Notification::NothingToRedo);
                false
            }
        }
    }

    /// Mark the start of a continuous adjustment (slider drag). The
    /// instrument setters that follow are undone together.
    pub fn begin_adjustment(&mut self) {
        self.push_history();
    }

    // --- Instrument transforms (no history push) ---

    pub fn move_ruler(&mut self, position: Point) {
        self.update(|s| s.ruler = Some(s.ruler.unwrap_or_default().moved(position)));
    }

    pub fn rotate_ruler(&mut self, angle_degrees: f64) {
        self.update(|s| s.ruler = s.ruler.map(|r| r.rotated(angle_degrees)));
    }

    pub fn set_ruler_length(&mut self, length: f64) {
        self.update(|s| s.ruler = s.ruler.map(|r| r.with_length(length)));
    }

    pub fn move_set_square(&mut self, position: Point) {
        self.update(|s| {
            s.set_square = Some(s.set_square.unwrap_or_default().moved(position))
        });
    }

    pub fn rotate_set_square(&mut self, angle_degrees: f64) {
        self.update(|s| s.set_square = s.set_square.map(|q| q.rotated(angle_degrees)));
    }

    pub fn set_set_square_size(&mut self, size: f64) {
        self.update(|s| s.set_square = s.set_square.map(|q| q.with_size(size)));
    }

    pub fn set_set_square_variant(&mut self, variant: SetSquareVariant) {
        self.update(|s| s.set_square = s.set_square.map(|q| q.with_variant(variant)));
    }

    pub fn move_protractor(&mut self, position: Point) {
        self.update(|s| {
            s.protractor = Some(s.protractor.unwrap_or_default().moved(position))
        });
    }

    pub fn rotate_protractor(&mut self, angle_degrees: f64) {
        self.update(|s| s.protractor = s.protractor.map(|p| p.rotated(angle_degrees)));
    }

    pub fn set_protractor_radius(&mut self, radius: f64) {
        self.update(|s| s.protractor = s.protractor.map(|p| p.with_radius(radius)));
    }

    pub fn move_compass(&mut self, center: Point) {
        self.update(|s| s.compass = Some(s.compass.unwrap_or_default().moved(center)));
    }

    pub fn set_compass_radius(&mut self, radius: f64) {
        self.update(|s| s.compass = s.compass.map(|c| c.with_radius(radius)));
    }

    pub fn scale_compass_radius(&mut self, factor: f64) {
        self.update(|s| s.compass = s.compass.map(|c| c.scaled_radius(factor)));
    }

    // --- Calibration ---

    /// Set the pixel-per-centimeter scale from a measured reference.
    /// Non-positive or non-finite inputs are rejected with a notification.
    pub fn calibrate(&mut self, reference_px: f64, real_cm: f64) -> bool {
        let Some(calibration) = Calibration::from_reference(reference_px, real_cm) else {
            log::warn!("rejecting calibration {} px / {} cm", reference_px, real_cm);
            self.notify(Notification::CalibrationRejected);
            return false;
        };
        self.push_history();
        self.update(|s| s.calibration = calibration);
        log::info!("calibrated to {:.3} px/cm", calibration.px_per_cm);
        self.notify(Notification::Calibrated {
            px_per_cm: calibration.px_per_cm,
        });
        true
    }

    pub fn px_to_cm(&self, px: f64) -> f64 {
        self.state.calibration.px_to_cm(px)
    }

    pub fn cm_to_px(&self, cm: f64) -> f64 {
        self.state.calibration.cm_to_px(cm)
    }

    // --- Viewport ---

    pub fn set_zoom(&mut self, zoom: f64) {
        self.update(|s| s.viewport.set_zoom(zoom));
    }

    pub fn zoom_by(&mut self, factor: f64) {
        self.update(|s| s.viewport.zoom_by(factor));
    }

    /// Pan by a delta in screen coordinates.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.update(|s| s.viewport.pan(delta));
    }

    // --- Two-finger transform ---

    /// Start a pan/zoom/rotate gesture. Ignored while another drag is active.
    pub fn transform_start(&mut self) {
        if self.drag.is_active() {
            log::debug!("transform ignored during active drag");
            return;
        }
        self.push_drag_history();
        self.drag = DragState::Dragging(DragTarget::Transform);
    }

    /// Apply one transform step. `pan` is in screen coordinates, `zoom` a
    /// multiplicative factor and `rotation_degrees` a relative rotation.
    ///
    /// The zoom always applies to the viewport. With the pen active the
    /// viewport also pans; with an instrument tool the instrument moves and
    /// rotates instead (the compass also scales its radius by the zoom and
    /// does not rotate).
    pub fn transform_update(&mut self, pan: Vec2, zoom: f64, rotation_degrees: f64) {
        if self.drag.target() != Some(DragTarget::Transform) {
            return;
        }
        let tool = self.state.tool;
        let world_pan = pan / self.state.viewport.zoom;

        self.update(|s| {
            s.viewport.zoom_by(zoom);
            match tool {
                ToolKind::Pen => s.viewport.pan(pan),
                ToolKind::Ruler => {
                    s.ruler = s.ruler.map(|r| r.translated(world_pan).rotated_by(rotation_degrees))
                }
                ToolKind::SetSquare => {
                    s.set_square = s
                        .set_square
                        .map(|q| q.translated(world_pan).rotated_by(rotation_degrees))
                }
                ToolKind::Protractor => {
                    s.protractor = s
                        .protractor
                        .map(|p| p.translated(world_pan).rotated_by(rotation_degrees))
                }
                ToolKind::Compass => {
                    s.compass = s.compass.map(|c| {
                        let c = c.translated(world_pan);
                        if (zoom - 1.0).abs() > f64::EPSILON {
                            c.scaled_radius(zoom)
                        } else {
                            c
                        }
                    })
                }
            }
        });
    }

    pub fn transform_end(&mut self) {
        if self.drag.target() == Some(DragTarget::Transform) {
            self.end_drag();
        }
    }
}
