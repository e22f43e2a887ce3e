//! Generation configuration for the Gemini API.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Configuration controlling what the model returns.
#[derive(Debug, Clone, Serialize, TypedBuilder)]
pub struct GenerationConfig {
    /// The modalities the response may contain.
    #[serde(rename = "responseModalities")]
    pub response_modalities: Vec<Modality>,
}

/// A kind of content the model can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modality {
    /// Binary image output.
    Image,
    /// Plain text output.
    Text,
}
