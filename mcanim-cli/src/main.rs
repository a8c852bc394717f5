//! mcanim CLI Tool
//!
//! Converts a video into a Minecraft texture animation: a vertical strip of
//! square frames (`<name>.png`) and its timing file (`<name>.png.mcmeta`).

use anyhow::{bail, Context, Result};
use clap::Parser;
use dialoguer::Input;
use mcanim_core::{convert, ConversionConfig, FrameSource, OutputName, Resolution, Stride};
use mcanim_video::VideoSource;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mcanim")]
#[command(about = "Convert a video into a Minecraft texture animation (.png + .png.mcmeta)")]
#[command(version)]
struct Cli {
    /// Source video file path (prompted for when omitted)
    source: Option<PathBuf>,

    /// Side length of one animation frame, must be a power of 2
    /// (default: largest power of 2 that fits the video)
    #[arg(short, long)]
    resolution: Option<Resolution>,

    /// Keep only every Nth frame of the video
    #[arg(short, long)]
    stride: Option<Stride>,

    /// Output name; any extension is stripped (default: source file name)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fail instead of prompting when the source path is missing
    #[arg(long)]
    no_prompt: bool,

    /// Print debug logs
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Without a source on the command line, ask for everything like a wizard.
    let (source, interactive) = match cli.source {
        Some(source) => (source, false),
        None if !cli.no_prompt => (prompt_source_path()?, true),
        None => bail!("A source video path is required with --no-prompt"),
    };
    let resolution = match cli.resolution {
        Some(resolution) => Some(resolution),
        None if interactive => prompt_resolution()?,
        None => None,
    };
    let stride = match cli.stride {
        Some(stride) => stride,
        None if interactive => prompt_stride()?,
        None => Stride::default(),
    };

    let output = match cli.output {
        Some(output) => OutputName::new(output),
        None => OutputName::from_source(&source, Path::new(".")),
    }
    .context("Invalid output name")?;

    convert_video(&source, ConversionConfig { resolution, stride }, &output)
}

fn convert_video(source: &Path, config: ConversionConfig, output: &OutputName) -> Result<()> {
    println!("Converting video: {}", source.display());
    println!("Output: {}", output);

    let reader = VideoSource::open(source).context("Failed to open video file")?;

    println!(
        "Video info: {}x{} @ {:.2} fps",
        reader.width(),
        reader.height(),
        reader.frame_rate()
    );

    let animation = convert(reader, &config).context("Failed to convert video")?;

    println!(
        "Created {} frames of {}x{} ({}x{} sheet), frametime {}",
        animation.image.frame_count(),
        animation.image.side(),
        animation.image.side(),
        animation.image.image().width(),
        animation.image.image().height(),
        animation.metadata.frametime()
    );

    let saved = animation.save(output).context("Failed to save animation")?;

    println!("Saved image to {}", saved.image.display());
    println!("Saved properties to {}", saved.metadata.display());

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn prompt_source_path() -> Result<PathBuf> {
    let path: String = Input::new()
        .with_prompt("Enter the path to the source video file")
        .validate_with(|input: &String| -> std::result::Result<(), &'static str> {
            if input.trim().is_empty() {
                Err("The path is empty!")
            } else if !Path::new(input.trim()).exists() {
                Err("The path does not exist!")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .context("Failed to read the source path")?;
    Ok(PathBuf::from(path.trim()))
}

fn prompt_resolution() -> Result<Option<Resolution>> {
    let answer: String = Input::new()
        .with_prompt("Enter the animation frame resolution, a power of 2 (empty = auto)")
        .allow_empty(true)
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            if input.trim().is_empty() {
                return Ok(());
            }
            input
                .parse::<Resolution>()
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()
        .context("Failed to read the resolution")?;

    if answer.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(answer.parse()?))
}

fn prompt_stride() -> Result<Stride> {
    let answer: String = Input::new()
        .with_prompt("Keep every Nth frame of the video (empty = every frame)")
        .allow_empty(true)
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            if input.trim().is_empty() {
                return Ok(());
            }
            input
                .parse::<Stride>()
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()
        .context("Failed to read the stride")?;

    if answer.trim().is_empty() {
        return Ok(Stride::default());
    }
    Ok(answer.parse()?)
}
