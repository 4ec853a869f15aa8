//! Error types for the erythrocyte counter.

/// Result type alias using [`CountError`]
pub type Result<T> = std::result::Result<T, CountError>;

#[derive(Debug, thiserror::Error)]
pub enum CountError {
    /// Input is not a non-empty, fully backed 3-channel image
    #[error("invalid input image: {0}")]
    InvalidInput(String),

    /// Parameter set cannot drive the pipeline (zero kernels, inverted bounds)
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Image decoding/encoding error
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
