//! Decoded host input events and their dispatch onto a session.
//!
//! Pointer coordinates are in drawing space; the host undoes its own
//! pan/zoom first (see [`Viewport::screen_to_world`](crate::Viewport::screen_to_world)).

use crate::instruments::SetSquareVariant;
use crate::session::DrawingSession;
use crate::tools::ToolKind;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// A discrete input event from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputEvent {
    PointerDown {
        position: Point,
    },
    PointerMove {
        position: Point,
    },
    PointerUp,
    PointerCancel,
    /// Single tap: reports the snap at `position` without drawing.
    Tap {
        position: Point,
    },
    /// Long press toggles snapping.
    LongPress,
    TransformStart,
    /// One step of a two-finger gesture.
    Transform {
        #[serde(default)]
        pan: Vec2,
        #[serde(default = "unit_zoom")]
        zoom: f64,
        #[serde(default)]
        rotation: f64,
    },
    TransformEnd,
    SelectTool {
        tool: ToolKind,
    },
    Undo,
    Redo,
    Calibrate {
        reference_px: f64,
        real_cm: f64,
    },
    /// Start of a slider drag; the slider events that follow undo as one.
    AdjustStart,
    RulerLength {
        length: f64,
    },
    RulerAngle {
        angle: f64,
    },
    SetSquareSize {
        size: f64,
    },
    SetSquareVariant {
        variant: SetSquareVariant,
    },
    ProtractorAngle {
        angle: f64,
    },
    ProtractorRadius {
        radius: f64,
    },
    CompassRadius {
        radius: f64,
    },
}

fn unit_zoom() -> f64 {
    1.0
}

impl DrawingSession {
    /// Apply one input event.
    pub fn handle_event(&mut self, event: InputEvent) {
        log::trace!("input event: {:?}", event);
        match event {
            InputEvent::PointerDown { position } => self.pointer_down(position),
            InputEvent::PointerMove { position } => self.pointer_move(position),
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::PointerCancel => self.pointer_cancel(),
            InputEvent::Tap { position } => {
                self.snap_preview(position);
            }
            InputEvent::LongPress => {
                self.toggle_snap();
            }
            InputEvent::TransformStart => self.transform_start(),
            InputEvent::Transform {
                pan,
                zoom,
                rotation,
            } => self.transform_update(pan, zoom, rotation),
            InputEvent::TransformEnd => self.transform_end(),
            InputEvent::SelectTool { tool } => self.select_tool(tool),
            InputEvent::Undo => {
                self.undo();
            }
            InputEvent::Redo => {
                self.redo();
            }
            InputEvent::Calibrate {
                reference_px,
                real_cm,
            } => {
                self.calibrate(reference_px, real_cm);
            }
            InputEvent::AdjustStart => self.begin_adjustment(),
            InputEvent::RulerLength { length } => self.set_ruler_length(length),
            InputEvent::RulerAngle { angle } => self.rotate_ruler(angle),
            InputEvent::SetSquareSize { size } => self.set_set_square_size(size),
            InputEvent::SetSquareVariant { variant } => self.set_set_square_variant(variant),
            InputEvent::ProtractorAngle { angle } => self.rotate_protractor(angle),
            InputEvent::ProtractorRadius { radius } => self.set_protractor_radius(radius),
            InputEvent::CompassRadius { radius } => self.set_compass_radius(radius),
        }
    }

    /// Apply a sequence of events in order.
    pub fn handle_events(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.handle_event(event);
        }
    }
}
