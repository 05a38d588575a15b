use std::collections::HashSet;
use std::fs;
use std::path::{self, Path, PathBuf};

use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::store::ImageStore;

impl ImageStore {
    /// Collect images not present in the given referenced-target set.
    ///
    /// Markup authors reference images via inconsistent relative paths while
    /// the store reports its own canonical paths, so matching is dual-form:
    /// a stored file counts as referenced if its absolutized path, its bare
    /// filename, or its raw path string appears among the references (also
    /// absolutized / reduced to filenames). The filename fallback trades a
    /// deletion-safe false negative on name collisions for never deleting a
    /// legitimately referenced file.
    ///
    /// With `dry_run` set, nothing is deleted. Otherwise each orphan is
    /// removed best-effort: a failing deletion is logged and the rest
    /// proceed. The full orphan list is returned either way, in store
    /// listing order.
    pub fn collect_orphans(
        &self,
        referenced: &HashSet<String>,
        dry_run: bool,
    ) -> StoreResult<Vec<PathBuf>> {
        let mut normalized: HashSet<String> = HashSet::new();
        for target in referenced {
            if let Ok(abs) = path::absolute(target) {
                normalized.insert(abs.to_string_lossy().into_owned());
            }
            if let Some(name) = Path::new(target).file_name() {
                normalized.insert(name.to_string_lossy().into_owned());
            }
        }

        let mut orphans = Vec::new();
        for stored in self.list()? {
            let raw = stored.to_string_lossy().into_owned();
            let abs = path::absolute(&stored)
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_else(|_| raw.clone());
            let name = stored
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let is_referenced = normalized.contains(&abs)
                || normalized.contains(&name)
                || referenced.contains(&raw);
            if is_referenced {
                continue;
            }

            if !dry_run {
                if let Err(e) = fs::remove_file(&stored) {
                    warn!(path = %stored.display(), error = %e, "failed to delete orphan");
                }
            }
            orphans.push(stored);
        }

        debug!(count = orphans.len(), dry_run, "orphan collection complete");
        Ok(orphans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::ImageName;
    use mdstash_types::ImageFormat;

    fn temp_store() -> (tempfile::TempDir, ImageStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::open(dir.path().join("images")).unwrap();
        (dir, store)
    }

    fn refs(targets: &[&str]) -> HashSet<String> {
        targets.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unreferenced_image_is_an_orphan() {
        let (_dir, store) = temp_store();
        let old = store
            .save(b"old", ImageName::Custom("old.png".into()), ImageFormat::Png)
            .unwrap();
        let orphans = store.collect_orphans(&refs(&[]), false).unwrap();
        assert_eq!(orphans, vec![old.clone()]);
        assert!(!old.exists());
    }

    #[test]
    fn bare_filename_reference_protects_stored_file() {
        let (_dir, store) = temp_store();
        let shot = store
            .save(b"shot", ImageName::Custom("shot.png".into()), ImageFormat::Png)
            .unwrap();
        // The document references the image by a path rooted elsewhere;
        // the filename fallback must still match.
        let orphans = store
            .collect_orphans(&refs(&["somewhere/else/shot.png"]), false)
            .unwrap();
        assert!(orphans.is_empty());
        assert!(shot.exists());
    }

    #[test]
    fn full_path_reference_protects_stored_file() {
        let (_dir, store) = temp_store();
        let shot = store
            .save(b"shot", ImageName::ContentHash, ImageFormat::Png)
            .unwrap();
        let orphans = store
            .collect_orphans(&refs(&[shot.to_str().unwrap()]), false)
            .unwrap();
        assert!(orphans.is_empty());
        assert!(shot.exists());
    }

    #[test]
    fn dry_run_reports_without_deleting() {
        let (_dir, store) = temp_store();
        let old = store
            .save(b"old", ImageName::Custom("old.png".into()), ImageFormat::Png)
            .unwrap();
        let orphans = store.collect_orphans(&refs(&[]), true).unwrap();
        assert_eq!(orphans, vec![old.clone()]);
        assert!(old.exists());
    }

    #[test]
    fn mixed_referenced_and_orphaned() {
        let (_dir, store) = temp_store();
        let shot = store
            .save(b"shot", ImageName::Custom("shot.png".into()), ImageFormat::Png)
            .unwrap();
        let old = store
            .save(b"old", ImageName::Custom("old.png".into()), ImageFormat::Png)
            .unwrap();

        let orphans = store.collect_orphans(&refs(&["shot.png"]), false).unwrap();
        assert_eq!(orphans, vec![old.clone()]);
        assert!(shot.exists());
        assert!(!old.exists());
    }

    #[test]
    fn orphans_come_back_in_listing_order() {
        let (_dir, store) = temp_store();
        store
            .save(b"b", ImageName::Custom("b.png".into()), ImageFormat::Png)
            .unwrap();
        store
            .save(b"a", ImageName::Custom("a.png".into()), ImageFormat::Png)
            .unwrap();
        let orphans = store.collect_orphans(&refs(&[]), true).unwrap();
        let names: Vec<_> = orphans
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.png", "b.png"]);
    }
}
