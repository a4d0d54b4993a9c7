use crate::domain::Geometry;
use serde::{Deserialize, Serialize};

/// Body of `POST /insert/poly`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertPolygon {
    pub id: i64,
    pub polygon: Geometry,
}

/// Error body the backend writes next to any non-200 status.
#[derive(Debug, Deserialize)]
pub struct ErrorPayload {
    pub error: ErrorDetails,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetails {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorPayload {
    pub fn describe(&self) -> String {
        match self.error.message.as_deref() {
            Some(message) if !message.is_empty() => format!("{}: {message}", self.error.kind),
            _ => self.error.kind.clone(),
        }
    }
}
