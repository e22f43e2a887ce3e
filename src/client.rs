//! Client for the Gemini streaming generate-content endpoint.

use futures::StreamExt;
use tokio::sync::mpsc;

use crate::{
    error::RemixError,
    models::{ModelParams, Request, RequestType, ResponseStream},
};

/// Default API endpoint for Google's Generative AI service
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Default API version
const DEFAULT_API_VERSION: &str = "v1beta";
/// Default channel buffer size for streaming responses
const DEFAULT_CHANNEL_BUFFER_SIZE: usize = 16;
/// Default buffer capacity for JSON parsing
const DEFAULT_JSON_BUFFER_CAPACITY: usize = 4096;

/// A client for one Gemini model.
#[derive(Debug, Clone)]
pub struct GenerativeModel {
    api_key: String,
    params: ModelParams,
    client: reqwest::Client,
}

impl GenerativeModel {
    /// Creates a new GenerativeModel with the specified API key and model
    /// parameters.
    pub fn new(api_key: impl Into<String>, params: ModelParams) -> Self {
        Self {
            api_key: api_key.into(),
            params,
            client: reqwest::Client::new(),
        }
    }

    /// Creates a new GenerativeModel from the `GEMINI_API_KEY` environment
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns [`RemixError::MissingApiKey`] if the variable is not set, so
    /// the configuration error surfaces before any network activity.
    pub fn from_env(model: impl Into<String>) -> Result<Self, RemixError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| RemixError::MissingApiKey)?;
        Ok(Self::new(api_key, ModelParams::builder().model(model).build()))
    }

    /// The model identifier this client targets.
    pub fn model(&self) -> &str {
        &self.params.model
    }

    fn build_url(&self, request_type: RequestType) -> String {
        format!(
            "{}/{}/models/{}:{}?key={}",
            DEFAULT_BASE_URL, DEFAULT_API_VERSION, self.params.model, request_type, self.api_key
        )
    }

    async fn make_request(
        &self,
        url: &str,
        request: &Request,
    ) -> Result<reqwest::Response, RemixError> {
        let response = self.client.post(url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(RemixError::new(format!(
                "Request failed with status {}: {}",
                status, error_body
            )));
        }

        Ok(response)
    }

    /// Sends the request to `streamGenerateContent` and returns the chunk
    /// stream.
    ///
    /// The response body is a JSON array of chunk objects that arrives
    /// incrementally; a background task scans it by brace depth and sends
    /// each complete object through a channel as soon as it parses.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or the service answers
    /// with a non-success status. Errors while reading or parsing the body
    /// are yielded through the stream itself.
    pub async fn stream_generate_response(
        &self,
        request: Request,
    ) -> Result<ResponseStream, RemixError> {
        let url = self.build_url(RequestType::StreamGenerateContent);
        let response = self.make_request(&url, &request).await?;

        let (tx, rx) = mpsc::channel(DEFAULT_CHANNEL_BUFFER_SIZE);
        let mut stream = response.bytes_stream();

        tokio::spawn(async move {
            let mut buffer = String::with_capacity(DEFAULT_JSON_BUFFER_CAPACITY);
            let mut in_object = false;
            let mut object_depth = 0;
            let mut in_string = false;
            let mut escaped = false;

            while let Some(chunk_result) = stream.next().await {
                match chunk_result {
                    Ok(chunk) => match std::str::from_utf8(&chunk) {
                        Ok(chunk_str) => {
                            for c in chunk_str.chars() {
                                match c {
                                    '"' if !escaped => {
                                        in_string = !in_string;
                                        buffer.push(c);
                                    }
                                    '\\' if !escaped => {
                                        escaped = true;
                                        buffer.push(c);
                                    }
                                    '{' if !in_string => {
                                        if !in_object {
                                            in_object = true;
                                            buffer.clear();
                                        }
                                        object_depth += 1;
                                        buffer.push(c);
                                    }
                                    '}' if !in_string => {
                                        object_depth -= 1;
                                        buffer.push(c);

                                        if object_depth == 0 && in_object {
                                            in_object = false;
                                            match serde_json::from_str(&buffer) {
                                                Ok(response) => {
                                                    if tx.send(Ok(response)).await.is_err() {
                                                        return;
                                                    }
                                                }
                                                Err(e) => {
                                                    if tx
                                                        .send(Err(RemixError::new(format!(
                                                            "Failed to parse response: {}",
                                                            e
                                                        ))))
                                                        .await
                                                        .is_err()
                                                    {
                                                        return;
                                                    }
                                                }
                                            }
                                            buffer.clear();
                                            buffer.reserve(DEFAULT_JSON_BUFFER_CAPACITY);
                                        }
                                    }
                                    '[' if !in_string && !in_object => buffer.clear(),
                                    ']' if !in_string && !in_object => buffer.clear(),
                                    _ => {
                                        if in_object {
                                            buffer.push(c);
                                        }
                                        escaped = false;
                                    }
                                }
                            }
                        }
                        Err(e) => {
                            if tx
                                .send(Err(RemixError::new(format!("UTF-8 decode error: {}", e))))
                                .await
                                .is_err()
                            {
                                return;
                            }
                        }
                    },
                    Err(e) => {
                        if tx
                            .send(Err(RemixError::new(e.to_string())))
                            .await
                            .is_err()
                        {
                            return;
                        }
                    }
                }
            }
        });

        Ok(ResponseStream::new(rx))
    }
}
