use thiserror::Error;

/// Top-level error type for the CamGate runtime.
#[derive(Debug, Error)]
pub enum CamError {
    #[error("invalid camera id: {0}")]
    Validation(String),

    #[error("camera directory error: {0}")]
    Directory(String),

    #[error("admission backend error: {0}")]
    Backend(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
