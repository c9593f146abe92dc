//! RulerSet Core Library
//!
//! Precision-drawing core: snapping, virtual drafting instruments and the
//! drawing session state machine with bounded undo/redo.

pub mod calibration;
pub mod document;
pub mod geometry;
pub mod history;
pub mod input;
pub mod instruments;
pub mod session;
pub mod shapes;
pub mod snap;
pub mod tools;
pub mod viewport;

pub use calibration::Calibration;
pub use document::{DocumentError, DrawingDocument, PolylineRecord};
pub use history::{History, Revert, DEFAULT_HISTORY_CAPACITY};
pub use input::InputEvent;
pub use instruments::{Compass, Instrument, InstrumentTrait, Protractor, Ruler, SetSquare, SetSquareVariant};
pub use session::{DrawingSession, DrawingState, Notification, SessionConfig};
pub use shapes::{Polyline, Shape, ShapeId, ShapeTrait};
pub use snap::{snap, snap_to_grid, SnapConfig, SnapContext, SnapReason, SnapResult};
pub use tools::{DragState, DragTarget, ToolKind};
pub use viewport::Viewport;
