//! Foundation types for mdstash.
//!
//! This crate provides the types shared across the mdstash workspace.
//! Every other mdstash crate depends on `mdstash-types`.
//!
//! # Key Types
//!
//! - [`ContentDigest`] — BLAKE3 digest of a byte payload, used for
//!   content-addressed filenames and document change detection
//! - [`ImageFormat`] — the recognized image extension/MIME table
//! - [`ImageRef`] — a parsed `![alt](target)` markdown image reference

pub mod digest;
pub mod error;
pub mod format;
pub mod reference;

pub use digest::ContentDigest;
pub use error::TypeError;
pub use format::ImageFormat;
pub use reference::ImageRef;
