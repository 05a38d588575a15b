//! Content-addressed image storage for mdstash.
//!
//! The [`ImageStore`] owns a directory tree and is the only component that
//! writes into it. Images are flat files named either `img_<hash12>.<ext>`
//! (content-addressed, idempotent) or `img_<timestamp>_<hash12>.<ext>`
//! (versioned); there is no manifest, the directory listing is the index.
//!
//! # Design Rules
//!
//! 1. Content-hash naming is deterministic: saving identical bytes twice
//!    yields the same path, rewritten in place, never duplicated.
//! 2. Inbound payloads (raw bytes, `data:` URIs, bare base64) are resolved
//!    once at the boundary into a byte buffer via [`ImagePayload`].
//! 3. Reads that miss return `Ok(None)`, never an error.
//! 4. Batch deletions (bulk delete, orphan collection) isolate per-file
//!    failures: one failing file is logged and skipped, the rest proceed.

pub mod error;
pub mod gc;
pub mod name;
pub mod payload;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use name::ImageName;
pub use payload::ImagePayload;
pub use store::ImageStore;
