//! High-level mdstash facade.
//!
//! [`EditorCore`] wires the image store, markup conversion, and render
//! cache into the surface a host embeds per editor widget: feed it raw
//! markdown and an opaque instance identifier each render cycle, get back
//! a preview payload (or a suppression signal when nothing changed), and
//! hand it the pending image-save requests the editor surface produced so
//! their placeholder tokens get substituted with stored paths.

pub mod core;
pub mod error;
pub mod request;

pub use crate::core::EditorCore;
pub use error::{EditorError, EditorResult};
pub use request::ImageSaveRequest;

pub use mdstash_cache::SendDecision;
pub use mdstash_markup::ExportReport;
