use std::path::{Path, PathBuf};

use mdstash_cache::{RenderCache, SendDecision};
use mdstash_markup::{export_referenced_images, extract_paths, ExportReport, InlineConverter};
use mdstash_store::{ImageName, ImagePayload, ImageStore};
use mdstash_types::ImageFormat;
use tracing::warn;

use crate::error::EditorResult;
use crate::request::ImageSaveRequest;

/// The editor-side core: image store + inline converter + render cache.
///
/// One `EditorCore` serves any number of editor instances; per-instance
/// state lives in the render cache, keyed by the opaque identifier the
/// host passes in. All calls are synchronous and driven by the host's
/// render/update cycle.
pub struct EditorCore {
    store: ImageStore,
    cache: RenderCache,
    converter: InlineConverter,
}

impl EditorCore {
    /// Open a core whose image store is rooted at `base`.
    pub fn open(base: impl AsRef<Path>) -> EditorResult<Self> {
        let store = ImageStore::open(base)?;
        let converter = InlineConverter::with_fallback_root(store.root());
        Ok(Self {
            store,
            cache: RenderCache::new(),
            converter,
        })
    }

    /// Open a core storing images under `base/subfolder`, e.g. keyed by a
    /// document identifier.
    pub fn open_subfolder(base: impl AsRef<Path>, subfolder: &str) -> EditorResult<Self> {
        let store = ImageStore::open_subfolder(base, subfolder)?;
        let converter = InlineConverter::with_fallback_root(store.root());
        Ok(Self {
            store,
            cache: RenderCache::new(),
            converter,
        })
    }

    /// The underlying image store.
    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    /// Produce the preview payload for an instance's current content:
    /// local image references inlined as data URIs, memoized per instance
    /// so unchanged content is never re-converted.
    pub fn preview(&self, instance: &str, raw: &str) -> String {
        self.cache
            .get_or_convert(instance, raw, |text| self.converter.inline_images(text))
    }

    /// Decide whether the instance's converted content needs transmitting
    /// to the rendering surface, suppressing resends of unchanged content.
    pub fn sync(&self, instance: &str, raw: &str) -> SendDecision {
        self.cache
            .should_send(instance, raw, |text| self.converter.inline_images(text))
    }

    /// Resolve pending image-save requests against the document.
    ///
    /// Each payload is saved under content-hash naming (format from the
    /// payload's MIME header, else the suggested filename's extension,
    /// else png) and its placeholder token is substituted with the stored
    /// path. A request that fails to decode or save is logged and skipped,
    /// leaving its placeholder in place so the host can retry or report.
    pub fn resolve_image_requests(&self, content: &str, requests: &[ImageSaveRequest]) -> String {
        let mut content = content.to_string();
        for request in requests {
            if request.data.is_empty() || request.placeholder.is_empty() {
                continue;
            }
            let (bytes, declared) = match ImagePayload::from_text(&request.data).resolve() {
                Ok(resolved) => resolved,
                Err(e) => {
                    warn!(placeholder = %request.placeholder, error = %e, "image payload rejected");
                    continue;
                }
            };
            let format = declared
                .or_else(|| {
                    request
                        .filename
                        .as_deref()
                        .and_then(|f| ImageFormat::from_path(Path::new(f)))
                })
                .unwrap_or(ImageFormat::Png);
            match self.store.save(&bytes, ImageName::ContentHash, format) {
                Ok(path) => {
                    content = content.replace(&request.placeholder, &path.display().to_string());
                }
                Err(e) => {
                    warn!(placeholder = %request.placeholder, error = %e, "image save failed");
                }
            }
        }
        content
    }

    /// Collect (and unless `dry_run`, delete) stored images the document no
    /// longer references.
    pub fn collect_orphans(&self, markdown: &str, dry_run: bool) -> EditorResult<Vec<PathBuf>> {
        let referenced = extract_paths(markdown);
        Ok(self.store.collect_orphans(&referenced, dry_run)?)
    }

    /// Copy the document's referenced images into `destination` and return
    /// the retargeted document text.
    pub fn export(&self, markdown: &str, destination: impl AsRef<Path>) -> EditorResult<ExportReport> {
        Ok(export_referenced_images(
            markdown,
            destination,
            Some(self.store.root()),
        )?)
    }
}

impl std::fmt::Debug for EditorCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorCore")
            .field("store", &self.store)
            .field("cache", &self.cache)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose, Engine as _};
    use std::fs;

    fn temp_core() -> (tempfile::TempDir, EditorCore) {
        let dir = tempfile::tempdir().unwrap();
        let core = EditorCore::open(dir.path().join("images")).unwrap();
        (dir, core)
    }

    // -----------------------------------------------------------------------
    // Image-save request resolution
    // -----------------------------------------------------------------------

    #[test]
    fn resolves_placeholder_to_stored_path() {
        let (_dir, core) = temp_core();
        let encoded = general_purpose::STANDARD.encode(b"pasted jpeg");
        let request = ImageSaveRequest {
            data: format!("data:image/jpeg;base64,{encoded}"),
            placeholder: "__img_0__".to_string(),
            filename: Some("paste.jpg".to_string()),
        };

        let resolved = core.resolve_image_requests("before ![p](__img_0__) after", &[request]);

        assert!(!resolved.contains("__img_0__"));
        let paths = extract_paths(&resolved);
        assert_eq!(paths.len(), 1);
        let path = paths.iter().next().unwrap();
        assert!(path.ends_with(".jpg"));
        assert_eq!(core.store().load(path).unwrap().unwrap(), b"pasted jpeg");
    }

    #[test]
    fn filename_extension_is_the_fallback_format() {
        let (_dir, core) = temp_core();
        let request = ImageSaveRequest {
            data: general_purpose::STANDARD.encode(b"webp bytes"),
            placeholder: "__img_0__".to_string(),
            filename: Some("shot.webp".to_string()),
        };
        let resolved = core.resolve_image_requests("![p](__img_0__)", &[request]);
        assert!(resolved.contains(".webp)"));
    }

    #[test]
    fn failed_decode_leaves_placeholder_in_place() {
        let (_dir, core) = temp_core();
        let request = ImageSaveRequest {
            data: "data:image/png;base64,not-base64!!".to_string(),
            placeholder: "__img_0__".to_string(),
            filename: None,
        };
        let resolved = core.resolve_image_requests("![p](__img_0__)", &[request]);
        assert!(resolved.contains("__img_0__"));
        assert!(core.store().list().unwrap().is_empty());
    }

    // -----------------------------------------------------------------------
    // Preview + sync cycle
    // -----------------------------------------------------------------------

    #[test]
    fn preview_inlines_stored_images() {
        let (_dir, core) = temp_core();
        let path = core
            .store()
            .save(b"pngbytes", ImageName::ContentHash, ImageFormat::Png)
            .unwrap();

        let raw = format!("![a]({})", path.file_name().unwrap().to_str().unwrap());
        let preview = core.preview("ed1", &raw);
        assert!(preview.contains("data:image/png;base64,"));
    }

    #[test]
    fn sync_suppresses_until_content_changes() {
        let (_dir, core) = temp_core();
        assert!(matches!(core.sync("ed1", "# doc"), SendDecision::Send(_)));
        assert_eq!(core.sync("ed1", "# doc"), SendDecision::Suppressed);
        assert!(matches!(core.sync("ed1", "# doc!"), SendDecision::Send(_)));
    }

    #[test]
    fn preview_is_a_noop_on_remote_only_documents() {
        let (_dir, core) = temp_core();
        let raw = "![a](https://x/y.png) and ![b](data:image/png;base64,AAAA)";
        assert_eq!(core.preview("ed1", raw), raw);
    }

    // -----------------------------------------------------------------------
    // Orphan collection through the facade
    // -----------------------------------------------------------------------

    #[test]
    fn referenced_images_survive_collection() {
        let (_dir, core) = temp_core();
        let shot = core
            .store()
            .save(b"shot", ImageName::Custom("shot.png".into()), ImageFormat::Png)
            .unwrap();
        let old = core
            .store()
            .save(b"old", ImageName::Custom("old.png".into()), ImageFormat::Png)
            .unwrap();

        let markdown = "![a](shot.png) ![b](http://x/y.png)";
        let orphans = core.collect_orphans(markdown, false).unwrap();

        assert_eq!(orphans, vec![old.clone()]);
        assert!(shot.exists());
        assert!(!old.exists());
    }

    #[test]
    fn dry_run_only_reports() {
        let (_dir, core) = temp_core();
        let old = core
            .store()
            .save(b"old", ImageName::Custom("old.png".into()), ImageFormat::Png)
            .unwrap();
        let orphans = core.collect_orphans("no references", true).unwrap();
        assert_eq!(orphans, vec![old.clone()]);
        assert!(old.exists());
    }

    // -----------------------------------------------------------------------
    // Export
    // -----------------------------------------------------------------------

    #[test]
    fn export_copies_store_images_by_filename() {
        let (_dir, core) = temp_core();
        core.store()
            .save(b"png", ImageName::Custom("stored.png".into()), ImageFormat::Png)
            .unwrap();
        let dest = tempfile::tempdir().unwrap();

        let report = core.export("![a](stored.png)", dest.path()).unwrap();

        assert_eq!(report.copied, 1);
        let exported = dest.path().join("stored.png");
        assert_eq!(fs::read(exported).unwrap(), b"png");
    }
}
