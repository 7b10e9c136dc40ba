//! tunediff - reconcile two music library exports
//!
//! Reads an Apple Music property-list XML export and a YouTube Music CSV
//! export, normalizes every song into a canonical identity, and writes out
//! the songs the YouTube library has that the Apple library lacks.

mod core;
mod models;
mod sources;
mod utils;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use crate::core::comparator::{SongsComparator, SourceSide};
use crate::core::sink::{self, OutputFormat};
use crate::sources::{AppleMusicSource, YtMusicSource};

/// tunediff - find songs missing from one music library
#[derive(Parser, Debug)]
#[command(name = "tunediff")]
#[command(version)]
#[command(about = "Compare a YouTube Music export against an Apple Music export")]
struct Args {
    /// Path to the Apple Music XML export (reference library)
    #[arg(long, default_value = "apple_music.xml")]
    apple: PathBuf,

    /// Path to the YouTube Music CSV export (candidate library)
    #[arg(long, default_value = "yt_music.csv")]
    yt: PathBuf,

    /// Where to write the difference
    #[arg(long, short, default_value = "difference.txt")]
    output: PathBuf,

    /// Write the difference as a JSON array instead of plain lines
    #[arg(long)]
    json: bool,

    /// Print the distinct artists of one library instead of diffing
    #[arg(long, value_enum)]
    artists: Option<ArtistSource>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ArtistSource {
    Apple,
    Yt,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_level))
        .with_target(false)
        .compact()
        .init();

    let comparator = SongsComparator::new(
        AppleMusicSource::new(&args.apple),
        YtMusicSource::new(&args.yt),
    );

    if let Some(source) = args.artists {
        let side = match source {
            ArtistSource::Apple => SourceSide::Reference,
            ArtistSource::Yt => SourceSide::Candidate,
        };
        let mut artists: Vec<String> = comparator.distinct_artists(side)?.into_iter().collect();
        artists.sort_unstable();
        for artist in artists {
            println!("{}", artist);
        }
        return Ok(());
    }

    info!(
        "Comparing {} (candidate) against {} (reference)",
        args.yt.display(),
        args.apple.display()
    );

    let difference = comparator.compare()?;
    info!("{} songs missing from the reference library", difference.len());

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    sink::save_difference(&difference, &args.output, format)?;
    info!("Difference written to {}", args.output.display());

    Ok(())
}
