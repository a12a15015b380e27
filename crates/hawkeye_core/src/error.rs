use thiserror::Error;

/// Errors produced at the crate's serde boundary.
///
/// The adjudication core itself degrades gracefully (missing calibration or
/// short history yield `None`/identity results, never errors); only the JSON
/// export surface is fallible.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("deserialization error: {0}")]
    Deserialization(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            CoreError::Deserialization(err.to_string())
        } else {
            CoreError::Serialization(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
