//! Drawing file format.
//!
//! A drawing is stored as a JSON array of polylines:
//!
//! ```json
//! [{"id": "…", "points": [{"x": 1.0, "y": 2.0}, {"x": 3.0, "y": 4.0}]}]
//! ```
//!
//! Unknown fields are ignored when reading.

use crate::shapes::{Polyline, Shape};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors decoding a drawing.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid drawing JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Polyline {0} has fewer than two points")]
    TooFewPoints(String),
    #[error("Duplicate polyline id: {0}")]
    DuplicateId(String),
}

/// One stored polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolylineRecord {
    pub id: String,
    pub points: Vec<Point>,
}

impl From<&Polyline> for PolylineRecord {
    fn from(polyline: &Polyline) -> Self {
        Self {
            id: polyline.id.clone(),
            points: polyline.points.clone(),
        }
    }
}

/// An ordered list of polylines.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawingDocument {
    pub polylines: Vec<PolylineRecord>,
}

impl DrawingDocument {
    /// Capture the given shapes in order.
    pub fn from_shapes(shapes: &[Shape]) -> Self {
        let polylines = shapes
            .iter()
            .filter_map(Shape::as_polyline)
            .map(PolylineRecord::from)
            .collect();
        Self { polylines }
    }

    /// Rebuild shapes, keeping the stored ids.
    pub fn to_shapes(&self) -> Result<Vec<Shape>, DocumentError> {
        let mut seen = HashSet::new();
        self.polylines
            .iter()
            .map(|record| {
                if record.points.len() < 2 {
                    return Err(DocumentError::TooFewPoints(record.id.clone()));
                }
                if !seen.insert(record.id.as_str()) {
                    return Err(DocumentError::DuplicateId(record.id.clone()));
                }
                Ok(Shape::Polyline(Polyline::with_id(
                    record.id.clone(),
                    record.points.clone(),
                )))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.polylines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Encode shapes as drawing JSON.
pub fn to_json(shapes: &[Shape]) -> Result<String, DocumentError> {
    Ok(DrawingDocument::from_shapes(shapes).to_json()?)
}

/// Decode drawing JSON into shapes.
pub fn from_json(json: &str) -> Result<Vec<Shape>, DocumentError> {
    DrawingDocument::from_json(json)?.to_shapes()
}
