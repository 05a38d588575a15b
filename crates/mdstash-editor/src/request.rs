use serde::{Deserialize, Serialize};

/// A pending image save produced by the editor surface.
///
/// When an image is pasted or dropped, the surface inserts a placeholder
/// token into the document and ships the payload alongside. Resolving the
/// request saves the payload and substitutes the token with the stored
/// path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSaveRequest {
    /// The payload: a `data:<mime>;base64,` URI or bare base64 text.
    pub data: String,
    /// The token occupying the image's place in the document.
    pub placeholder: String,
    /// Suggested filename; its extension is used as a format hint when the
    /// payload does not declare a MIME type.
    #[serde(default)]
    pub filename: Option<String>,
}
