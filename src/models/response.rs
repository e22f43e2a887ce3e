//! Response models for the Gemini API stream.

use serde::Deserialize;

use super::Part;

/// One chunk of a streamed response from the Gemini API.
///
/// Every field below `candidates` is optional: the service may emit chunks
/// with no candidates or candidates with no content, and those are valid,
/// skippable increments rather than errors.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// The generated candidates in this chunk.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// The version of the model used, when reported.
    pub model_version: Option<String>,
}

impl Response {
    /// The parts of the first candidate's content, empty if the chunk
    /// carries none.
    pub fn parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.parts.as_slice())
            .unwrap_or(&[])
    }
}

/// A candidate response from the model.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// The content of the candidate response, absent in empty chunks.
    pub content: Option<CandidateContent>,
    /// The reason why the generation finished, on the final chunk.
    pub finish_reason: Option<String>,
}

/// The content body of a candidate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateContent {
    /// The parts that make up the content.
    #[serde(default)]
    pub parts: Vec<Part>,
    /// The role of the content author.
    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_with_inline_image_deserializes() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"inlineData": {"mimeType": "image/png", "data": "aGk="}}],
                    "role": "model"
                }
            }],
            "modelVersion": "gemini-2.5-flash-image-preview"
        }"#;
        let response: Response = serde_json::from_str(json).unwrap();
        assert_eq!(response.parts().len(), 1);
        assert!(matches!(response.parts()[0], Part::InlineData { .. }));
    }

    #[test]
    fn chunk_without_candidates_is_valid_and_empty() {
        let response: Response = serde_json::from_str("{}").unwrap();
        assert!(response.parts().is_empty());
    }

    #[test]
    fn candidate_without_content_yields_no_parts() {
        let json = r#"{"candidates": [{"finishReason": "STOP"}]}"#;
        let response: Response = serde_json::from_str(json).unwrap();
        assert!(response.parts().is_empty());
    }
}
