//! Request models for the Gemini API.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::{GenerationConfig, Modality, Part};

/// A request to the Gemini API.
#[derive(Debug, Clone, Serialize, TypedBuilder)]
pub struct Request {
    /// The contents of the request, images and prompt text.
    pub contents: Vec<Content>,
    /// Optional generation configuration, e.g. the response modalities.
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub generation_config: Option<GenerationConfig>,
}

/// A content object containing parts of the request.
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    /// The role of the content author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// The parts that make up the content.
    pub parts: Vec<Part>,
}

/// The author of a piece of content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Content supplied by the caller.
    User,
    /// Content produced by the model.
    Model,
}

impl Request {
    /// Creates a remix request: the given image parts in order, followed by
    /// exactly one text part with the prompt, asking for both image and text
    /// back.
    pub fn remix(image_parts: Vec<Part>, prompt: impl Into<String>) -> Self {
        let mut parts = image_parts;
        parts.push(Part::text(prompt));
        Self::builder()
            .contents(vec![Content {
                role: Some(Role::User),
                parts,
            }])
            .generation_config(
                GenerationConfig::builder()
                    .response_modalities(vec![Modality::Image, Modality::Text])
                    .build(),
            )
            .build()
    }
}
