//! Loads input images from disk into request parts.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use log::warn;

use crate::{error::RemixError, models::Part};

/// Side length of the synthesized placeholder image.
const PLACEHOLDER_SIZE: u32 = 100;
/// Fill color of the placeholder, solid red.
const PLACEHOLDER_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Loads the given image files, in order, into inline-data parts.
///
/// A missing file is healed by writing a solid-color placeholder image at
/// that exact path before reading it back; rerunning with the placeholder
/// present does not synthesize again. If the placeholder cannot be written
/// (for example the path has no recognizable image extension), loading fails
/// with [`RemixError::ImageNotFound`].
///
/// # Errors
///
/// Fails on unreadable files, on paths whose MIME type cannot be determined,
/// and on missing files whose placeholder cannot be synthesized.
pub fn load_image_parts(paths: &[PathBuf]) -> Result<Vec<Part>, RemixError> {
    paths.iter().map(|path| load_image_part(path)).collect()
}

fn load_image_part(path: &Path) -> Result<Part, RemixError> {
    if !path.exists() {
        warn!(
            "image file '{}' not found, synthesizing a placeholder there",
            path.display()
        );
        synthesize_placeholder(path).map_err(|e| RemixError::ImageNotFound {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    }

    let bytes = fs::read(path)?;
    let mime_type = mime_type_for(path)?;
    Ok(Part::inline_data(mime_type, &bytes))
}

/// Writes a solid-color stand-in image at `path`, format inferred from the
/// path's extension.
fn synthesize_placeholder(path: &Path) -> image::ImageResult<()> {
    RgbImage::from_pixel(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, PLACEHOLDER_COLOR).save(path)
}

/// Determines the MIME type for an input path from its extension.
fn mime_type_for(path: &Path) -> Result<String, RemixError> {
    if let Some(mime) = mime_guess::from_path(path).first() {
        return Ok(mime.essence_str().to_string());
    }

    let ext = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => Ok("image/jpeg".to_string()),
        Some("png") => Ok("image/png".to_string()),
        Some("gif") => Ok("image/gif".to_string()),
        _ => Err(RemixError::UnsupportedImageFormat {
            path: path.to_path_buf(),
        }),
    }
}
