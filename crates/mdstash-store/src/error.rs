/// Errors from image store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Malformed base64 or data-URI payload. Returned to the caller,
    /// never panicked across the boundary; no file is written.
    #[error("invalid image payload: {0}")]
    Decode(String),

    /// I/O error from the underlying filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
