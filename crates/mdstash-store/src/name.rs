use std::path::Path;

use mdstash_hash::ContentHasher;
use mdstash_types::ImageFormat;

/// Naming policy for a saved image.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ImageName {
    /// `img_<hash12>.<ext>`: deterministic for given bytes, so repeated
    /// saves of identical content land on the same path (idempotent).
    #[default]
    ContentHash,
    /// `img_<timestamp>_<hash12>.<ext>`: includes a wall-clock component,
    /// intentionally non-idempotent for versioned snapshots.
    Timestamped,
    /// Caller-provided filename. If it carries no extension, the declared
    /// format's extension is appended.
    Custom(String),
}

impl ImageName {
    /// Render the filename for the given payload and declared format.
    pub fn file_name(&self, data: &[u8], format: ImageFormat) -> String {
        match self {
            Self::ContentHash => {
                let hash12 = ContentHasher::IMAGE.hash(data).short12();
                format!("img_{hash12}{}", format.extension())
            }
            Self::Timestamped => {
                let hash12 = ContentHasher::IMAGE.hash(data).short12();
                let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
                format!("img_{timestamp}_{hash12}{}", format.extension())
            }
            Self::Custom(name) => {
                if Path::new(name).extension().is_some() {
                    name.clone()
                } else {
                    format!("{name}{}", format.extension())
                }
            }
        }
    }
}
