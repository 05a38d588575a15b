/// Errors from markup operations.
///
/// Per-reference read/copy failures are not errors: they leave the
/// reference unchanged. Only whole-operation failures (e.g. the export
/// destination cannot be created) surface here.
#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    /// I/O error from the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for markup operations.
pub type MarkupResult<T> = Result<T, MarkupError>;
