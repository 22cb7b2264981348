//! bmpfilter - apply one filter to an uncompressed BMP image
//!
//! # Usage
//!
//! ```bash
//! bmpfilter in.bmp out.bmp invert
//! bmpfilter in.bmp out.bmp grayscale
//! bmpfilter in.bmp out.bmp median --window 5
//! bmpfilter in.bmp out.bmp gamma --gamma 2.2
//! ```
//!
//! Set `RUST_LOG=debug` for header and filter details.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bmpfilter::{DecodeRequest, Filter, Limits, Unstoppable, write_bmp};
use clap::{Parser, Subcommand};

/// Apply a filter to an uncompressed BMP image
#[derive(Parser)]
#[command(name = "bmpfilter")]
#[command(about = "Apply a filter to an uncompressed BMP image")]
#[command(version)]
struct Cli {
    /// Input BMP file
    input: PathBuf,

    /// Output BMP file (replaced if it exists)
    output: PathBuf,

    /// Refuse images with more than this many pixels
    #[arg(long)]
    max_pixels: Option<u64>,

    #[command(subcommand)]
    filter: FilterCommand,
}

#[derive(Subcommand)]
enum FilterCommand {
    /// Invert every channel
    Invert,

    /// Replace each pixel with the average of its channels
    Grayscale,

    /// Median filter over a square window
    Median {
        /// Window size; even sizes are rounded up to the next odd size
        #[arg(short, long, default_value_t = 3)]
        window: u32,
    },

    /// Gamma correction
    Gamma {
        /// Gamma value (> 0); values above 1 brighten
        #[arg(short, long)]
        gamma: f64,
    },
}

impl From<FilterCommand> for Filter {
    fn from(cmd: FilterCommand) -> Self {
        match cmd {
            FilterCommand::Invert => Filter::Invert,
            FilterCommand::Grayscale => Filter::Grayscale,
            FilterCommand::Median { window } => Filter::Median { window },
            FilterCommand::Gamma { gamma } => Filter::Gamma { gamma },
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let limits = Limits {
        max_pixels: cli.max_pixels,
        ..Default::default()
    };

    let data = std::fs::read(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let mut bitmap = DecodeRequest::new(&data)
        .with_limits(&limits)
        .decode(Unstoppable)
        .with_context(|| format!("failed to decode {}", cli.input.display()))?;
    log::info!(
        "loaded {}: {}x{}, {} bpp",
        cli.input.display(),
        bitmap.width(),
        bitmap.height(),
        bitmap.bits_per_pixel()
    );

    let filter = Filter::from(cli.filter);
    filter
        .apply(&mut bitmap, Unstoppable)
        .with_context(|| format!("{filter} failed"))?;

    write_bmp(&cli.output, &bitmap)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    log::info!("applied {filter}, wrote {}", cli.output.display());
    Ok(())
}
