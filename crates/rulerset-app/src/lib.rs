//! RulerSet gesture replay
//!
//! Drives a drawing session from a recorded script of input events and
//! produces the resulting drawing.

mod replay;

pub use replay::{load_script, replay, replay_file, ReplayError, ReplayOutcome, ReplayScript};
