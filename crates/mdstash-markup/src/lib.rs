//! Markdown image handling for mdstash.
//!
//! Three text-level operations over the inline-image syntax
//! `![alt](target)`:
//!
//! - [`extract_refs`] / [`extract_paths`] — scan a document for image
//!   references and yield the local ones (remote URLs and `data:` URIs
//!   are excluded)
//! - [`InlineConverter`] — rewrite local references to embedded base64
//!   data URIs so the document is self-contained for preview or export
//! - [`export_referenced_images`] — copy referenced images into a
//!   destination directory and retarget the references
//!
//! Per-reference failures never fail the whole document: a reference that
//! cannot be read is left unchanged.

pub mod error;
pub mod export;
pub mod extract;
pub mod inline;

pub use error::{MarkupError, MarkupResult};
pub use export::{export_referenced_images, ExportReport};
pub use extract::{extract_paths, extract_refs};
pub use inline::InlineConverter;
