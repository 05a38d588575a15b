//! Content addressing for mdstash.
//!
//! A thin, pure layer over BLAKE3: deterministic digests used to derive
//! content-addressed image filenames and to detect document changes between
//! render cycles. Collision resistance here serves deduplication and change
//! detection, not any security boundary.

pub mod hasher;

pub use hasher::ContentHasher;
