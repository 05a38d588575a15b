use std::fs;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose, Engine as _};
use mdstash_types::{ImageFormat, ImageRef};
use tracing::debug;

use crate::extract::IMAGE_RE;

/// Rewrites local image references into embedded base64 data URIs.
///
/// This is a pure text transform over the filesystem: it reads referenced
/// files but never writes anything. A reference that is already remote or
/// inlined is skipped; a reference that cannot be read (missing file,
/// permission denied) is left exactly as written, so one bad reference
/// never fails the whole document.
#[derive(Clone, Debug, Default)]
pub struct InlineConverter {
    fallback_root: Option<PathBuf>,
}

impl InlineConverter {
    /// Converter that resolves targets only as written.
    pub fn new() -> Self {
        Self::default()
    }

    /// Converter that additionally tries `root/<filename>` when a target
    /// does not resolve as written (typically the image store root), so
    /// references saved as bare filenames still inline.
    pub fn with_fallback_root(root: impl Into<PathBuf>) -> Self {
        Self {
            fallback_root: Some(root.into()),
        }
    }

    /// Replace every readable local image reference with a data URI. The
    /// MIME type comes from the target's extension (png default).
    pub fn inline_images(&self, text: &str) -> String {
        IMAGE_RE
            .replace_all(text, |caps: &regex::Captures<'_>| {
                let reference = ImageRef::new(&caps[1], &caps[2]);
                if !reference.is_local() {
                    return caps[0].to_string();
                }
                match self.read_target(&reference.target) {
                    Some(bytes) => {
                        let mime = ImageFormat::from_path(Path::new(&reference.target))
                            .unwrap_or(ImageFormat::Png)
                            .mime_type();
                        let encoded = general_purpose::STANDARD.encode(&bytes);
                        format!("![{}](data:{mime};base64,{encoded})", reference.alt)
                    }
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    fn read_target(&self, target: &str) -> Option<Vec<u8>> {
        if let Ok(bytes) = fs::read(target) {
            return Some(bytes);
        }
        if let Some(root) = &self.fallback_root {
            if let Some(name) = Path::new(target).file_name() {
                if let Ok(bytes) = fs::read(root.join(name)) {
                    return Some(bytes);
                }
            }
        }
        debug!(target, "image reference left unchanged (unreadable)");
        None
    }
}
