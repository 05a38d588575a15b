use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Recognized image formats.
///
/// This is the single extension/MIME table used across the workspace: the
/// store uses it to filter directory listings and name files, the markup
/// layer uses it to build `data:` URIs. Anything outside this table is not
/// treated as an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
    Svg,
}

impl ImageFormat {
    /// All recognized formats.
    pub const ALL: [Self; 5] = [Self::Png, Self::Jpeg, Self::Gif, Self::Webp, Self::Svg];

    /// Canonical file extension, including the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => ".png",
            Self::Jpeg => ".jpg",
            Self::Gif => ".gif",
            Self::Webp => ".webp",
            Self::Svg => ".svg",
        }
    }

    /// MIME type for `data:` URIs.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
            Self::Svg => "image/svg+xml",
        }
    }

    /// Parse from a file extension, with or without the leading dot.
    /// Case-insensitive. Both `jpg` and `jpeg` map to [`ImageFormat::Jpeg`].
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }

    /// Parse from a MIME type string such as the header of a `data:` URI.
    /// Matches loosely: `image/jpg` is accepted as JPEG.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.to_ascii_lowercase();
        if mime.contains("image/jpeg") || mime.contains("image/jpg") {
            Some(Self::Jpeg)
        } else if mime.contains("image/png") {
            Some(Self::Png)
        } else if mime.contains("image/gif") {
            Some(Self::Gif)
        } else if mime.contains("image/webp") {
            Some(Self::Webp)
        } else if mime.contains("image/svg") {
            Some(Self::Svg)
        } else {
            None
        }
    }

    /// Parse from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Returns `true` if the path carries a recognized image extension.
    pub fn is_image_path(path: &Path) -> bool {
        Self::from_path(path).is_some()
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension().trim_start_matches('.'))
    }
}
