use std::fs;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose, Engine as _};
use mdstash_types::ImageFormat;
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::name::ImageName;
use crate::payload::ImagePayload;

/// Directory-owning image store.
///
/// The store exclusively owns its root directory: no other component writes
/// into it. Listings are flat (non-recursive) and filtered to recognized
/// image extensions; the directory itself is the index.
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Open (or create) a store rooted at `base`.
    pub fn open(base: impl AsRef<Path>) -> StoreResult<Self> {
        let root = base.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Open (or create) a store in a named subfolder of `base`, e.g. a
    /// per-document identifier.
    pub fn open_subfolder(base: impl AsRef<Path>, subfolder: &str) -> StoreResult<Self> {
        Self::open(base.as_ref().join(subfolder))
    }

    /// The storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Save raw image bytes under the given naming policy.
    ///
    /// Parent directories are created as needed (a custom name may contain
    /// subdirectories). An existing file at the same path is silently
    /// replaced (last writer wins). Returns the path actually written.
    pub fn save(
        &self,
        data: &[u8],
        name: ImageName,
        format: ImageFormat,
    ) -> StoreResult<PathBuf> {
        let file_name = name.file_name(data, format);
        let path = self.root.join(&file_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, data)?;
        debug!(path = %path.display(), bytes = data.len(), "image saved");
        Ok(path)
    }

    /// Save an encoded textual payload: a `data:<mime>;base64,` URI or bare
    /// base64. The URI's MIME header picks the extension (png when absent
    /// or unrecognized). Malformed base64 yields a decode error and no file
    /// is written; callers must check the result.
    pub fn save_encoded(&self, encoded: &str, name: ImageName) -> StoreResult<PathBuf> {
        let (bytes, format) = ImagePayload::from_text(encoded).resolve()?;
        self.save(&bytes, name, format.unwrap_or(ImageFormat::Png))
    }

    /// Load image bytes. The path is tried as given first, then relative to
    /// the storage root. Returns `Ok(None)` if neither resolves to a file.
    pub fn load(&self, path: impl AsRef<Path>) -> StoreResult<Option<Vec<u8>>> {
        let path = path.as_ref();
        if path.is_file() {
            return Ok(Some(fs::read(path)?));
        }
        let in_root = self.root.join(path);
        if in_root.is_file() {
            return Ok(Some(fs::read(in_root)?));
        }
        Ok(None)
    }

    /// Load an image as a self-contained `data:` URI. The MIME type is
    /// inferred from the file extension (png default).
    pub fn load_as_data_uri(&self, path: impl AsRef<Path>) -> StoreResult<Option<String>> {
        let path = path.as_ref();
        let Some(bytes) = self.load(path)? else {
            return Ok(None);
        };
        let mime = ImageFormat::from_path(path)
            .unwrap_or(ImageFormat::Png)
            .mime_type();
        let encoded = general_purpose::STANDARD.encode(&bytes);
        Ok(Some(format!("data:{mime};base64,{encoded}")))
    }

    /// List all image files directly under the storage root (non-recursive),
    /// filtered to recognized extensions and sorted for deterministic order.
    pub fn list(&self) -> StoreResult<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let mut images = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_file() && ImageFormat::is_image_path(&path) {
                images.push(path);
            }
        }
        images.sort();
        Ok(images)
    }

    /// Delete every listed image, best-effort. Per-file failures are logged
    /// and skipped; the returned count includes only successful deletions.
    pub fn delete_all(&self) -> StoreResult<usize> {
        let mut count = 0;
        for path in self.list()? {
            match fs::remove_file(&path) {
                Ok(()) => count += 1,
                Err(e) => warn!(path = %path.display(), error = %e, "failed to delete image"),
            }
        }
        debug!(count, "bulk delete complete");
        Ok(count)
    }

    /// Recursively remove the entire storage root. Removing an already
    /// absent root is a no-op.
    pub fn delete_store(&self) -> StoreResult<()> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for ImageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageStore")
            .field("root", &self.root)
            .finish()
    }
}
