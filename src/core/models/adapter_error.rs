use std::path::PathBuf;

use thiserror::Error;

/// Every way a single adapter run can fail. Each variant ends the process
/// with exit code 1 and an `{"error": ...}` payload on stderr.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("image path is required")]
    MissingImagePath,

    #[error("image file not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("OCR failed: {0}")]
    RecognitionFailed(String),

    #[error("invalid settings file {}: {reason}", .path.display())]
    InvalidSettings { path: PathBuf, reason: String },

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

impl AdapterError {
    pub fn recognition_failure(error: anyhow::Error) -> Self {
        AdapterError::RecognitionFailed(format!("{:#}", error))
    }
}
