//! Common part model used in both requests and responses.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

/// One unit of multimodal content.
///
/// The wire format is untagged: a part object either carries a `text` field,
/// an `inlineData` field, or something this crate does not model. The
/// `Unknown` variant keeps the last case an explicit, handled branch instead
/// of a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// A text part containing a string value
    Text {
        /// The text content of the part
        text: String,
    },
    /// A part containing inline binary data
    InlineData {
        /// The inline data content of the part
        #[serde(rename = "inlineData", alias = "inline_data")]
        inline_data: Blob,
    },
    /// A part whose shape this crate does not recognize
    Unknown(serde_json::Value),
}

impl Part {
    /// Creates a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Creates an inline-data part from raw bytes, base64-encoding them.
    pub fn inline_data(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::InlineData {
            inline_data: Blob {
                mime_type: mime_type.into(),
                data: STANDARD.encode(bytes),
            },
        }
    }
}

/// Inline binary data with its MIME type. The payload is base64 on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blob {
    /// The MIME type of the inline data
    #[serde(rename = "mimeType", alias = "mime_type")]
    pub mime_type: String,
    /// The base64-encoded data
    pub data: String,
}

impl Blob {
    /// Decodes the base64 payload back into raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.data)
    }
}
