//! Tool selection and the drag-gesture state machine.

use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Pen,
    Ruler,
    SetSquare,
    Protractor,
    Compass,
}

impl ToolKind {
    /// Whether this tool manipulates an instrument rather than drawing.
    pub fn is_instrument(self) -> bool {
        !matches!(self, ToolKind::Pen)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ToolKind::Pen => "pen",
            ToolKind::Ruler => "ruler",
            ToolKind::SetSquare => "set square",
            ToolKind::Protractor => "protractor",
            ToolKind::Compass => "compass",
        };
        f.write_str(name)
    }
}

/// What an active drag is manipulating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragTarget {
    /// Capturing a pen stroke.
    Stroke,
    /// Moving an instrument; `grab_offset` is anchor minus the pointer
    /// position at drag start.
    Instrument { tool: ToolKind, grab_offset: Vec2 },
    /// Two-finger pan/zoom/rotate.
    Transform,
}

/// State of a drag interaction.
///
/// Pointer moves and ends are only honored while `Dragging`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// Waiting for a gesture to start.
    #[default]
    Idle,
    /// A gesture is in progress.
    Dragging(DragTarget),
}

impl DragState {
    /// Check if a drag is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    pub fn target(&self) -> Option<DragTarget> {
        match self {
            DragState::Dragging(target) => Some(*target),
            DragState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tool() {
        assert_eq!(ToolKind::default(), ToolKind::Pen);
        assert!(!ToolKind::Pen.is_instrument());
        assert!(ToolKind::Compass.is_instrument());
    }

    #[test]
    fn test_drag_state() {
        let idle = DragState::default();
        assert!(!idle.is_active());
        assert!(idle.target().is_none());

        let dragging = DragState::Dragging(DragTarget::Stroke);
        assert!(dragging.is_active());
        assert_eq!(dragging.target(), Some(DragTarget::Stroke));
    }

    #[test]
    fn test_tool_display() {
        assert_eq!(ToolKind::SetSquare.to_string(), "set square");
    }
}
