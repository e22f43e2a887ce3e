use std::fs;
use std::path::PathBuf;

use clap::{error::ErrorKind, CommandFactory, Parser};
use dotenv::dotenv;
use image_remix::{
    client::GenerativeModel,
    consumer, loader,
    models::Request,
    RemixError,
};

/// Default prompt when remixing a single image.
const SINGLE_IMAGE_PROMPT: &str = "Turn this image into a professional quality studio shoot \
     with better lighting and depth of field, with a modern aesthetic.";
/// Default prompt when combining two or more images.
const MULTI_IMAGE_PROMPT: &str = "Combine the subjects of these images in a natural way, \
     producing a new, cohesive image. Maintain the style and lighting of the first image.";

/// Remix images using the Gemini image generation API.
#[derive(Debug, Parser)]
#[command(name = "image-remix", version)]
struct Cli {
    /// Path to an input image; repeat the flag for up to 5 images
    #[arg(short = 'i', long = "image", required = true, value_name = "PATH")]
    image: Vec<PathBuf>,

    /// Prompt for remixing; the default depends on the image count
    #[arg(long)]
    prompt: Option<String>,

    /// Directory to save the remixed images to, created if absent
    #[arg(long, default_value = "output", value_name = "DIR")]
    output_dir: PathBuf,

    /// Model identifier to send the request to
    #[arg(long, default_value = "gemini-2.5-flash-image-preview")]
    model: String,
}

fn default_prompt(image_count: usize) -> &'static str {
    if image_count == 1 {
        SINGLE_IMAGE_PROMPT
    } else {
        MULTI_IMAGE_PROMPT
    }
}

fn check_image_count(count: usize) -> Result<(), String> {
    if (1..=5).contains(&count) {
        Ok(())
    } else {
        Err(format!(
            "provide between 1 and 5 input images with the -i flag (got {})",
            count
        ))
    }
}

async fn run(cli: Cli) -> Result<(), RemixError> {
    // Resolve the credential before touching the filesystem or the network.
    let model = GenerativeModel::from_env(&cli.model)?;

    fs::create_dir_all(&cli.output_dir)?;

    let prompt = cli
        .prompt
        .unwrap_or_else(|| default_prompt(cli.image.len()).to_string());

    let image_parts = loader::load_image_parts(&cli.image)?;
    let request = Request::remix(image_parts, &prompt);

    println!(
        "Remixing {} image(s) with prompt: '{}' using model: {}",
        cli.image.len(),
        prompt,
        model.model()
    );

    let stream = model.stream_generate_response(request).await?;
    let summary = consumer::consume_stream(stream, &cli.output_dir).await?;

    println!(
        "Done: {} file(s) saved to '{}', {} text part(s)",
        summary.files_saved.len(),
        cli.output_dir.display(),
        summary.text_parts
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    pretty_env_logger::init();

    let cli = Cli::parse();
    if let Err(message) = check_image_count(cli.image.len()) {
        // Usage error, reported before any network activity.
        Cli::command()
            .error(ErrorKind::TooManyValues, message)
            .exit();
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
