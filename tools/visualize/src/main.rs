//! Diagnostic visualizer: grayscale heightmap with prominent peaks (red) and
//! saddles (blue) overlaid, written as an RGB PNG.
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use highlander_core::prominence::prominent_features;
use highlander_core::synthetic::fbm_heightmap;
use highlander_core::{Feature, FeatureKind, HeightMap, ProminenceParams, DEFAULT_THRESHOLD};
use tracing::info;

const PEAK_COLOR: [u8; 3] = [220, 30, 30];
const SADDLE_COLOR: [u8; 3] = [0, 80, 220];

#[derive(Parser, Debug)]
#[command(name = "visualize", about = "Render prominent peaks and saddles over a heightmap")]
struct Args {
    /// Heightmap image to render. Mutually exclusive with --synthetic.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Render a square fBm test tile of this many cells per side instead.
    #[arg(long)]
    synthetic: Option<usize>,

    /// Seed for --synthetic.
    #[arg(long, default_value = "42")]
    seed: u32,

    /// Prominence threshold for the markers.
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: u16,

    /// Output PNG path.
    #[arg(short, long, default_value = "data/debug/prominence.png")]
    output: PathBuf,
}

/// Heights stretched to 8-bit gray between the map's own extremes.
fn shade(hm: &HeightMap) -> image::RgbImage {
    let lo = hm.min_height().unwrap_or(0) as f32;
    let hi = hm.max_height().unwrap_or(0) as f32;
    let range = (hi - lo).max(1.0);
    let mut img = image::RgbImage::new(hm.width as u32, hm.height as u32);
    for y in 0..hm.height {
        for x in 0..hm.width {
            let g = ((hm.get(x, y) as f32 - lo) / range * 255.0) as u8;
            img.put_pixel(x as u32, y as u32, image::Rgb([g, g, g]));
        }
    }
    img
}

/// Paint a 3×3 marker centred on each feature, clipped to the image.
fn mark(img: &mut image::RgbImage, features: &[Feature]) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    for f in features {
        let color = match f.kind {
            FeatureKind::Peak => PEAK_COLOR,
            FeatureKind::Saddle => SADDLE_COLOR,
        };
        for dy in -1..=1i64 {
            for dx in -1..=1i64 {
                let (px, py) = (f.x as i64 + dx, f.y as i64 + dy);
                if px >= 0 && px < w && py >= 0 && py < h {
                    img.put_pixel(px as u32, py as u32, image::Rgb(color));
                }
            }
        }
    }
}

fn load(args: &Args) -> Result<HeightMap> {
    match (&args.input, args.synthetic) {
        (Some(_), Some(_)) => bail!("--input and --synthetic are mutually exclusive"),
        (None, None) => bail!("one of --input or --synthetic is required"),
        (None, Some(n)) => Ok(fbm_heightmap(args.seed, n, n, 8)),
        (Some(path), None) => {
            let img = image::open(path).with_context(|| format!("decoding image {}", path.display()))?;
            let luma = img.into_luma16();
            let (w, h) = luma.dimensions();
            HeightMap::from_samples(w as usize, h as usize, luma.into_raw())
                .context("building heightmap from decoded image")
        }
    }
}

fn save(img: &image::RgbImage, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    img.save(path).with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let hm = load(&args)?;
    info!(width = hm.width, height = hm.height, "heightmap ready");

    let params = ProminenceParams { threshold: args.threshold, ..ProminenceParams::default() };
    let features = prominent_features(&hm, &params);
    let peaks = features.iter().filter(|f| f.kind == FeatureKind::Peak).count();
    info!(peaks, saddles = features.len() - peaks, threshold = args.threshold, "features found");

    let mut img = shade(&hm);
    mark(&mut img, &features);
    save(&img, &args.output)?;
    info!("wrote {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_are_clipped_at_edges() {
        let hm = HeightMap::from_rows(&[[5u16, 1, 7]]).unwrap();
        let mut img = shade(&hm);
        mark(&mut img, &[Feature::peak(2, 0, 7), Feature::saddle(0, 0, 5, 1)]);
        assert_eq!(img.get_pixel(2, 0).0, PEAK_COLOR);
        assert_eq!(img.get_pixel(1, 0).0, SADDLE_COLOR, "later markers paint over earlier ones");
        assert_eq!(img.get_pixel(0, 0).0, SADDLE_COLOR);
    }

    #[test]
    fn shade_spans_black_to_white() {
        let hm = HeightMap::from_rows(&[[100u16, 300, 200]]).unwrap();
        let img = shade(&hm);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(1, 0).0, [255, 255, 255]);
    }

    #[test]
    fn requires_exactly_one_source() {
        let both = Args::parse_from(["visualize", "--input", "a.png", "--synthetic", "8"]);
        assert!(load(&both).is_err());
        let neither = Args::parse_from(["visualize"]);
        assert!(load(&neither).is_err());
        let synth = Args::parse_from(["visualize", "--synthetic", "8"]);
        assert_eq!(load(&synth).unwrap().data.len(), 64);
    }
}
