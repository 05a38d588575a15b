use std::collections::HashSet;
use std::sync::LazyLock;

use mdstash_types::ImageRef;
use regex::Regex;

/// The inline-image pattern: `![alt](target)`. Unterminated or otherwise
/// malformed syntax simply does not match; there is no partial extraction.
pub(crate) static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("image pattern is valid"));

/// Extract every image reference from a markdown document, in source order,
/// including remote and already-inlined ones.
pub fn extract_refs(text: &str) -> Vec<ImageRef> {
    IMAGE_RE
        .captures_iter(text)
        .map(|caps| ImageRef::new(&caps[1], &caps[2]))
        .collect()
}

/// Extract the set of local image paths referenced by a document.
///
/// Targets beginning with `http://`, `https://`, or `data:` are excluded;
/// duplicates collapse. An empty document yields an empty set.
pub fn extract_paths(text: &str) -> HashSet<String> {
    extract_refs(text)
        .into_iter()
        .filter(ImageRef::is_local)
        .map(|r| r.target)
        .collect()
}
