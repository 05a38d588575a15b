use std::fs;
use std::path::Path;

use mdstash_types::ImageRef;
use tracing::{debug, warn};

use crate::error::MarkupResult;
use crate::extract::IMAGE_RE;

/// Result of exporting a document's images: the rewritten text plus the
/// number of images actually copied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportReport {
    /// Document text with copied references retargeted to the destination.
    pub content: String,
    /// Number of images copied.
    pub copied: usize,
}

/// Copy every referenced local image into `destination` and rewrite the
/// matching references to point there.
///
/// Remote and `data:` references are skipped. A target that does not
/// resolve as written is retried as `fallback_root/<filename>` (typically
/// the image store root). Sources that still cannot be found are skipped;
/// a failing copy is logged and skipped. Only the destination directory
/// creation can fail the whole operation.
pub fn export_referenced_images(
    text: &str,
    destination: impl AsRef<Path>,
    fallback_root: Option<&Path>,
) -> MarkupResult<ExportReport> {
    let destination = destination.as_ref();
    fs::create_dir_all(destination)?;

    let mut content = text.to_string();
    let mut copied = 0;

    for caps in IMAGE_RE.captures_iter(text) {
        let reference = ImageRef::new(&caps[1], &caps[2]);
        if !reference.is_local() {
            continue;
        }

        let mut source = Path::new(&reference.target).to_path_buf();
        if !source.exists() {
            let Some(name) = source.file_name().map(|n| n.to_os_string()) else {
                continue;
            };
            match fallback_root {
                Some(root) => source = root.join(name),
                None => continue,
            }
        }
        if !source.exists() {
            debug!(target = %reference.target, "export skipped missing image");
            continue;
        }

        let Some(name) = source.file_name() else {
            continue;
        };
        let dest_file = destination.join(name);
        if let Err(e) = fs::copy(&source, &dest_file) {
            warn!(source = %source.display(), error = %e, "failed to copy image");
            continue;
        }

        content = content.replace(
            &format!("]({})", reference.target),
            &format!("]({})", dest_file.display()),
        );
        copied += 1;
    }

    debug!(copied, "image export complete");
    Ok(ExportReport { content, copied })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_and_retargets_local_references() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let image = src.path().join("shot.png");
        fs::write(&image, b"png").unwrap();

        let text = format!("![a]({})", image.display());
        let report = export_referenced_images(&text, dst.path(), None).unwrap();

        assert_eq!(report.copied, 1);
        let exported = dst.path().join("shot.png");
        assert!(exported.is_file());
        assert_eq!(
            report.content,
            format!("![a]({})", exported.display())
        );
    }

    #[test]
    fn remote_and_data_references_copy_nothing() {
        let dst = tempfile::tempdir().unwrap();
        let text = "![a](https://x/y.png) ![b](data:image/png;base64,AAAA)";
        let report = export_referenced_images(text, dst.path(), None).unwrap();
        assert_eq!(report.copied, 0);
        assert_eq!(report.content, text);
    }

    #[test]
    fn missing_source_is_skipped() {
        let dst = tempfile::tempdir().unwrap();
        let text = "![a](no/such/file.png)";
        let report = export_referenced_images(text, dst.path(), None).unwrap();
        assert_eq!(report.copied, 0);
        assert_eq!(report.content, text);
    }

    #[test]
    fn fallback_root_resolves_bare_filenames() {
        let store = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::write(store.path().join("stored.png"), b"png").unwrap();

        let report =
            export_referenced_images("![a](stored.png)", dst.path(), Some(store.path())).unwrap();

        assert_eq!(report.copied, 1);
        assert!(dst.path().join("stored.png").is_file());
        assert!(report
            .content
            .contains(&dst.path().join("stored.png").display().to_string()));
    }
}
