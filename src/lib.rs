#![deny(missing_docs)]

//! Remix local images with the Gemini image generation API.
//!
//! The crate is a thin pipeline: load image files into request parts, send
//! them with a prompt to the `streamGenerateContent` endpoint, then walk the
//! streamed response writing returned images to disk and printing returned
//! text. The binary in `src/main.rs` is the CLI glue around it.

pub mod client;
pub mod consumer;
pub mod error;
pub mod loader;
pub mod models;

pub use client::GenerativeModel;
pub use consumer::StreamSummary;
pub use error::RemixError;
