//! Render cache for mdstash.
//!
//! Maps an opaque editor-instance identifier to the digest and converted
//! form of the content it last rendered, so repeated render cycles over
//! unchanged content skip both the expensive base64 inlining and the
//! re-transmission of identical payloads to the rendering surface.
//!
//! The cache is an explicit object owned by whoever drives rendering, not
//! a process global. Entries live for the cache's lifetime: one entry per
//! live editor instance, not per render, so the map stays small.

pub mod cache;

pub use cache::{RenderCache, SendDecision};
