use serde::{Deserialize, Serialize};

/// A parsed markdown image reference: the `![alt](target)` pair.
///
/// References are ephemeral: they are recomputed on every extraction pass
/// and never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef {
    /// Alt text between the brackets.
    pub alt: String,
    /// The link target: a filesystem path, an `http(s)://` URL, or a
    /// `data:` URI.
    pub target: String,
}

impl ImageRef {
    /// Create a new reference.
    pub fn new(alt: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            alt: alt.into(),
            target: target.into(),
        }
    }

    /// Returns `true` if the target is a remote URL.
    pub fn is_remote(&self) -> bool {
        self.target.starts_with("http://") || self.target.starts_with("https://")
    }

    /// Returns `true` if the target is already an inlined `data:` URI.
    pub fn is_inline(&self) -> bool {
        self.target.starts_with("data:")
    }

    /// Returns `true` if the target is a local filesystem path, neither
    /// remote nor already inlined.
    pub fn is_local(&self) -> bool {
        !self.is_remote() && !self.is_inline()
    }

    /// Render back to markdown source form.
    pub fn to_markdown(&self) -> String {
        format!("![{}]({})", self.alt, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_reference() {
        let r = ImageRef::new("screenshot", "images/shot.png");
        assert!(r.is_local());
        assert!(!r.is_remote());
        assert!(!r.is_inline());
    }

    #[test]
    fn remote_references() {
        assert!(ImageRef::new("a", "http://example.com/x.png").is_remote());
        assert!(ImageRef::new("a", "https://example.com/x.png").is_remote());
        assert!(!ImageRef::new("a", "https://example.com/x.png").is_local());
    }

    #[test]
    fn inline_reference() {
        let r = ImageRef::new("a", "data:image/png;base64,AAAA");
        assert!(r.is_inline());
        assert!(!r.is_local());
    }

    #[test]
    fn to_markdown_roundtrips_source_form() {
        let r = ImageRef::new("alt text", "shot.png");
        assert_eq!(r.to_markdown(), "![alt text](shot.png)");
    }
}
