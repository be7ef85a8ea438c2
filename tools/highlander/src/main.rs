//! Prominent topology for 16-bit heightmaps.
//!
//! Reads a grayscale image (file or stdin), finds peaks and saddles, and
//! prints those whose prominence clears the threshold, one per line as
//! `x, y, prominence, height, kind` (kind 0 = saddle, 1 = peak).
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use highlander_core::prominence::{prominent_features, sort_by_prominence};
use highlander_core::{Feature, HeightMap, OrderingStrategy, ProminenceParams};
use tracing::info;

// ── CLI ──────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "highlander", version, about = "Find prominent peaks and saddles in a 16-bit heightmap image")]
struct Args {
    /// Heightmap image (PNG, TIFF, …). Reads stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// Keep features whose prominence is strictly greater than this.
    #[arg(short, long)]
    threshold: Option<u16>,

    /// JSON file with run parameters; flags override its values.
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Cell ordering strategy (counting or comparison).
    #[arg(long)]
    ordering: Option<OrderingStrategy>,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "csv")]
    format: Format,

    /// Write results here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Present features by descending prominence instead of discovery order.
    #[arg(long)]
    sort_by_prominence: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Legacy `x, y, prominence, height, kind` lines.
    Csv,
    /// JSON array of feature objects.
    Json,
}

// ── Input ────────────────────────────────────────────────────────────────────

fn load_params(args: &Args) -> Result<ProminenceParams> {
    let mut params = match &args.params {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading params file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing params file {}", path.display()))?
        }
        None => ProminenceParams::default(),
    };
    if let Some(threshold) = args.threshold {
        params.threshold = threshold;
    }
    if let Some(ordering) = args.ordering {
        params.ordering = ordering;
    }
    Ok(params)
}

/// Decode an image into 16-bit samples. 8-bit inputs are widened by the decoder.
fn load_heightmap(input: Option<&Path>) -> Result<HeightMap> {
    let img = match input {
        Some(path) if path != Path::new("-") => {
            image::open(path).with_context(|| format!("decoding image {}", path.display()))?
        }
        _ => {
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes).context("reading image from stdin")?;
            image::load_from_memory(&bytes).context("decoding image from stdin")?
        }
    };
    let luma = img.into_luma16();
    let (width, height) = luma.dimensions();
    HeightMap::from_samples(width as usize, height as usize, luma.into_raw())
        .context("building heightmap from decoded image")
}

// ── Output ───────────────────────────────────────────────────────────────────

fn write_features(out: &mut dyn Write, features: &[Feature], format: Format) -> Result<()> {
    match format {
        Format::Csv => {
            for f in features {
                writeln!(out, "{f}")?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, features)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

// ── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let params = load_params(&args)?;

    let start = Instant::now();
    let hm = load_heightmap(args.input.as_deref())?;
    info!(width = hm.width, height = hm.height, elapsed = ?start.elapsed(), "heightmap loaded");

    let start = Instant::now();
    let mut features = prominent_features(&hm, &params);
    info!(
        features = features.len(),
        threshold = params.threshold,
        ordering = %params.ordering,
        elapsed = ?start.elapsed(),
        "prominence computed"
    );

    if args.sort_by_prominence {
        sort_by_prominence(&mut features);
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            write_features(&mut BufWriter::new(file), &features, args.format)?;
            info!("results written to {}", path.display());
        }
        None => write_features(&mut io::stdout().lock(), &features, args.format)?,
    }

    Ok(())
}
