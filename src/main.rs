use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;
use zenbmp::{Decoder, Limits, RGB8};

/// Preview a 24/32-bit BMP as text, draw both diagonals in black, and save a copy.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Input BMP file. Prompted for on stdin when omitted.
    input: Option<PathBuf>,

    /// Output BMP file. Prompted for on stdin when omitted.
    output: Option<PathBuf>,

    /// Skip printing the before/after text previews.
    #[arg(long)]
    no_preview: bool,

    /// Refuse images with more than this many pixels.
    #[arg(long, value_name = "N")]
    max_pixels: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let input = match cli.input {
        Some(path) => path,
        None => prompt("Enter input BMP file name: ")?,
    };

    let mut limits = Limits::none();
    if let Some(max) = cli.max_pixels {
        limits = limits.with_max_pixels(max);
    }
    let mut image = Decoder::new()
        .with_limits(limits)
        .decode_path(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    info!(
        "loaded {} ({}x{}, {}-bit)",
        input.display(),
        image.width(),
        image.height(),
        image.bits_per_pixel()
    );

    if !cli.no_preview {
        println!("Original image:");
        print!("{}", image.preview());
    }

    image.draw_diagonals(RGB8::new(0, 0, 0));

    if !cli.no_preview {
        println!("Modified image:");
        print!("{}", image.preview());
    }

    let output = match cli.output {
        Some(path) => path,
        None => prompt("Enter output BMP file name: ")?,
    };
    image
        .save(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("saved {}", output.display());
    Ok(())
}

/// Ask for a path on stdin, taking the first whitespace-separated word.
fn prompt(message: &str) -> Result<PathBuf> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read file name from stdin")?;
    match line.split_whitespace().next() {
        Some(word) => Ok(PathBuf::from(word)),
        None => bail!("no file name given"),
    }
}
