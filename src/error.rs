// Typed errors with thiserror. Everything here is a configuration error caught at load time;
// the per-frame path is total and never fails.

use thiserror::Error;

/// Engine error types.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid segment '{name}': start {start} must be finite and below end {end}")]
    InvalidSegment { name: String, start: f32, end: f32 },

    #[error("Invalid delay for '{name}': {delay} is outside [0, 1)")]
    InvalidDelay { name: String, delay: f32 },

    #[error("Invalid chapter map: {0}")]
    InvalidChapters(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}
