use mdstash_markup::MarkupError;
use mdstash_store::StoreError;

/// Errors from facade operations.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// Image store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Markup operation failure.
    #[error(transparent)]
    Markup(#[from] MarkupError),
}

/// Result alias for facade operations.
pub type EditorResult<T> = Result<T, EditorError>;
