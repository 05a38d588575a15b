use base64::{engine::general_purpose, Engine as _};
use mdstash_types::ImageFormat;

use crate::error::{StoreError, StoreResult};

/// Inbound image payload, tagged by how the host supplied it.
///
/// The host hands the store either raw bytes, a `data:<mime>;base64,` URI,
/// or bare base64 text. The variant is resolved exactly once, at the store
/// boundary, into a normalized byte buffer before any filesystem operation
/// proceeds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImagePayload {
    /// Already-decoded bytes.
    Raw(Vec<u8>),
    /// A `data:<mime>;base64,<payload>` URI.
    DataUri(String),
    /// Base64 text without a data-URI prefix.
    Base64(String),
}

impl ImagePayload {
    /// Classify a textual payload: `data:` prefix means a data URI,
    /// anything else is treated as bare base64.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.starts_with("data:") {
            Self::DataUri(text)
        } else {
            Self::Base64(text)
        }
    }

    /// Resolve into decoded bytes plus the format declared by the payload,
    /// if any. Only a data URI declares a format (from its MIME header);
    /// raw bytes and bare base64 leave the choice to the caller.
    pub fn resolve(self) -> StoreResult<(Vec<u8>, Option<ImageFormat>)> {
        match self {
            Self::Raw(bytes) => Ok((bytes, None)),
            Self::Base64(text) => {
                let bytes = decode_base64(text.trim())?;
                Ok((bytes, None))
            }
            Self::DataUri(uri) => {
                let Some((header, body)) = uri.split_once(',') else {
                    return Err(StoreError::Decode(
                        "data URI has no comma separator".to_string(),
                    ));
                };
                let format = ImageFormat::from_mime(header);
                let bytes = decode_base64(body.trim())?;
                Ok((bytes, format))
            }
        }
    }
}

fn decode_base64(text: &str) -> StoreResult<Vec<u8>> {
    general_purpose::STANDARD
        .decode(text)
        .map_err(|e| StoreError::Decode(e.to_string()))
}
