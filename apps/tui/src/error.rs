use thiserror::Error;

/// Everything that can go wrong between a user action and its applied response.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {status}: {message}")]
    Status { status: u16, message: String },

    #[error("no record with id {0}")]
    RecordNotFound(i64),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("polygon stored on record {id} is not valid GeoJSON: {source}")]
    EmbeddedPolygon {
        id: i64,
        #[source]
        source: serde_json::Error,
    },

    #[error("{field} must be a whole number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid coordinates {0:?}, expected \"lat,lng\"")]
    InvalidCoordinates(String),

    #[error("nothing has been drawn yet")]
    NothingDrawn,

    #[error("invalid server url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

pub type Result<T, E = EditorError> = std::result::Result<T, E>;
