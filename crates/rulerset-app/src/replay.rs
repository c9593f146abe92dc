//! Script loading and replay.

use rulerset_core::document::{self, DocumentError, DrawingDocument};
use rulerset_core::{DrawingSession, DrawingState, InputEvent, Notification, SessionConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error("Drawing error: {0}")]
    Document(#[from] DocumentError),
}

/// A recorded session: optional settings and starting drawing, then the
/// events to feed in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub config: SessionConfig,
    /// Drawing to start from.
    #[serde(default)]
    pub drawing: Option<DrawingDocument>,
    pub events: Vec<InputEvent>,
}

/// Scripts may also be a bare event array.
#[derive(Deserialize)]
#[serde(untagged)]
enum ScriptFile {
    Events(Vec<InputEvent>),
    Full(ReplayScript),
}

/// Result of a replay.
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub state: DrawingState,
    pub notifications: Vec<Notification>,
    /// The committed shapes in the drawing file format.
    pub drawing_json: String,
}

/// Parse a script from JSON.
pub fn load_script(json: &str) -> Result<ReplayScript, ReplayError> {
    let script = match serde_json::from_str::<ScriptFile>(json)? {
        ScriptFile::Full(script) => script,
        ScriptFile::Events(events) => ReplayScript {
            events,
            ..ReplayScript::default()
        },
    };
    Ok(script)
}

/// Run a script through a fresh session.
pub fn replay(script: ReplayScript) -> Result<ReplayOutcome, ReplayError> {
    let shapes = match &script.drawing {
        Some(drawing) => drawing.to_shapes()?,
        None => Vec::new(),
    };
    log::info!(
        "replaying {} events over {} shapes",
        script.events.len(),
        shapes.len()
    );

    let mut session = DrawingSession::with_shapes(script.config, shapes);
    let mut notifications = Vec::new();
    for event in script.events {
        session.handle_event(event);
        for notification in session.take_notifications() {
            log::info!("{}", notification);
            notifications.push(notification);
        }
    }

    let drawing_json = document::to_json(session.shapes())?;
    Ok(ReplayOutcome {
        state: session.state().clone(),
        notifications,
        drawing_json,
    })
}

/// Read a script file and replay it.
pub fn replay_file(path: impl AsRef<Path>) -> Result<ReplayOutcome, ReplayError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    replay(load_script(&json)?)
}
