//! Walks the streamed response, saving images and printing text.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use futures::{pin_mut, Stream, StreamExt};
use log::{debug, error, warn};

use crate::{error::RemixError, models::Part, models::Response};

/// What a single invocation of the consumer did.
#[derive(Debug, Default)]
pub struct StreamSummary {
    /// Paths of the output files written, in arrival order.
    pub files_saved: Vec<PathBuf>,
    /// Number of text parts surfaced.
    pub text_parts: usize,
    /// Number of parts with an unrecognized shape.
    pub unknown_parts: usize,
}

/// Drains the response stream, writing each binary part to `output_dir` and
/// printing each text part.
///
/// Chunks without usable content are skipped. A failure to write one output
/// file is reported and does not stop the remaining parts. The per-file
/// index starts at 0 and increases for every binary part of this invocation.
///
/// # Errors
///
/// Returns the first transport or parse error yielded by the stream; parts
/// already handled stay on disk.
pub async fn consume_stream<S>(stream: S, output_dir: &Path) -> Result<StreamSummary, RemixError>
where
    S: Stream<Item = Result<Response, RemixError>>,
{
    let mut summary = StreamSummary::default();
    let mut file_index: u32 = 0;
    pin_mut!(stream);

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        let parts = chunk.parts();
        if parts.is_empty() {
            debug!("received chunk without content, skipping");
            continue;
        }

        for part in parts {
            match part {
                Part::InlineData { inline_data } => {
                    let file_name = format!(
                        "remixed_image_{}_{}{}",
                        unix_timestamp(),
                        file_index,
                        extension_for(&inline_data.mime_type)
                    );
                    file_index += 1;

                    let path = output_dir.join(file_name);
                    match inline_data.decode() {
                        Ok(bytes) => match fs::write(&path, &bytes) {
                            Ok(()) => {
                                println!("File saved to: {}", path.display());
                                summary.files_saved.push(path);
                            }
                            Err(e) => error!("error saving file '{}': {}", path.display(), e),
                        },
                        Err(e) => error!("undecodable image payload for '{}': {}", path.display(), e),
                    }
                }
                Part::Text { text } => {
                    println!("Model Text Response: {}", text);
                    summary.text_parts += 1;
                }
                Part::Unknown(value) => {
                    warn!("received unrecognized part in response chunk: {}", value);
                    summary.unknown_parts += 1;
                }
            }
        }
    }

    Ok(summary)
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Maps a response MIME type to an output file extension, `.jpg` when the
/// type is not one of the formats the service returns.
fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => ".png",
        "image/jpeg" => ".jpg",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        _ => ".jpg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Candidate, CandidateContent};
    use futures::stream;
    use tempfile::tempdir;

    fn chunk_of(parts: Vec<Part>) -> Response {
        Response {
            candidates: vec![Candidate {
                content: Some(CandidateContent {
                    parts,
                    role: Some("model".to_string()),
                }),
                finish_reason: None,
            }],
            model_version: None,
        }
    }

    fn empty_chunk() -> Response {
        Response {
            candidates: vec![],
            model_version: None,
        }
    }

    #[tokio::test]
    async fn text_then_image_prints_and_writes_one_png_with_index_zero() {
        let dir = tempdir().unwrap();
        let chunks = vec![
            Ok(chunk_of(vec![Part::text("Hello")])),
            Ok(chunk_of(vec![Part::inline_data("image/png", b"pngbytes")])),
        ];

        let summary = consume_stream(stream::iter(chunks), dir.path()).await.unwrap();

        assert_eq!(summary.text_parts, 1);
        assert_eq!(summary.files_saved.len(), 1);
        let path = &summary.files_saved[0];
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("remixed_image_"));
        assert!(name.ends_with("_0.png"), "unexpected name: {}", name);
        assert_eq!(fs::read(path).unwrap(), b"pngbytes");
    }

    #[tokio::test]
    async fn empty_chunk_is_skipped_without_error() {
        let dir = tempdir().unwrap();
        let chunks = vec![Ok(empty_chunk())];
        let summary = consume_stream(stream::iter(chunks), dir.path()).await.unwrap();
        assert!(summary.files_saved.is_empty());
        assert_eq!(summary.text_parts, 0);
    }

    #[tokio::test]
    async fn file_index_increases_across_chunks() {
        let dir = tempdir().unwrap();
        let chunks = vec![
            Ok(chunk_of(vec![Part::inline_data("image/png", b"a")])),
            Ok(chunk_of(vec![Part::inline_data("image/jpeg", b"b")])),
        ];

        let summary = consume_stream(stream::iter(chunks), dir.path()).await.unwrap();

        let names: Vec<&str> = summary
            .files_saved
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names[0].ends_with("_0.png"));
        assert!(names[1].ends_with("_1.jpg"));
    }

    #[tokio::test]
    async fn unknown_mime_type_falls_back_to_jpg() {
        let dir = tempdir().unwrap();
        let chunks = vec![Ok(chunk_of(vec![Part::inline_data("image/x-exotic", b"a")]))];
        let summary = consume_stream(stream::iter(chunks), dir.path()).await.unwrap();
        let name = summary.files_saved[0].file_name().unwrap().to_str().unwrap();
        assert!(name.ends_with("_0.jpg"));
    }

    #[tokio::test]
    async fn unrecognized_part_is_reported_and_does_not_abort() {
        let dir = tempdir().unwrap();
        let chunks = vec![Ok(chunk_of(vec![
            Part::Unknown(serde_json::json!({"functionCall": {}})),
            Part::text("still here"),
        ]))];

        let summary = consume_stream(stream::iter(chunks), dir.path()).await.unwrap();
        assert_eq!(summary.unknown_parts, 1);
        assert_eq!(summary.text_parts, 1);
    }

    #[tokio::test]
    async fn write_failure_is_non_fatal_and_processing_continues() {
        // Using a plain file as the output directory makes every write fail.
        let dir = tempdir().unwrap();
        let bogus_dir = dir.path().join("not_a_dir");
        fs::write(&bogus_dir, b"file").unwrap();

        let chunks = vec![
            Ok(chunk_of(vec![Part::inline_data("image/png", b"a")])),
            Ok(chunk_of(vec![Part::text("after the failure")])),
        ];

        let summary = consume_stream(stream::iter(chunks), &bogus_dir).await.unwrap();
        assert!(summary.files_saved.is_empty());
        assert_eq!(summary.text_parts, 1);
    }

    #[tokio::test]
    async fn stream_error_aborts_consumption() {
        let dir = tempdir().unwrap();
        let chunks = vec![
            Ok(chunk_of(vec![Part::text("first")])),
            Err(RemixError::new("connection reset")),
        ];

        let err = consume_stream(stream::iter(chunks), dir.path()).await.unwrap_err();
        assert!(matches!(err, RemixError::Base { .. }));
    }
}
