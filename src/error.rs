//! Error types for the remix pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading images, talking to the API, or
/// consuming the response stream.
#[derive(Debug, Error)]
pub enum RemixError {
    /// Base error carrying a plain message, used for API-level failures
    /// (non-2xx responses, malformed stream chunks).
    #[error("[ImageRemix Error]: {message}")]
    Base {
        /// Error message
        message: String,
    },

    /// Error occurred during an API request.
    #[error("API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The API key environment variable is not set.
    #[error("GEMINI_API_KEY environment variable not set; export it or add it to a .env file")]
    MissingApiKey,

    /// Error occurred when parsing JSON.
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error occurred while reading an input image.
    #[error("Failed to read image file: {0}")]
    Io(#[from] std::io::Error),

    /// An input image is missing and a placeholder could not be synthesized
    /// at its path.
    #[error("Image file '{path}' not found and no placeholder could be created: {reason}")]
    ImageNotFound {
        /// The missing input path
        path: PathBuf,
        /// Why placeholder synthesis failed
        reason: String,
    },

    /// The MIME type of an input image could not be determined.
    #[error("Could not determine MIME type for '{path}'; use a common image format")]
    UnsupportedImageFormat {
        /// The offending input path
        path: PathBuf,
    },
}

impl RemixError {
    /// Creates a new Base error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::Base {
            message: message.into(),
        }
    }
}
