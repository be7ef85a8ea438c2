//! Fractional Brownian Motion test terrain.
//!
//! fBm: sum of Perlin octaves with amplitude = gain^i and frequency =
//! lacunarity^i, gain = lacunarity^(−H). The result is stretched over the
//! full `u16` range so the tallest cell is always `u16::MAX`.
use noise::{NoiseFn, Perlin};

use crate::heightmap::HeightMap;

/// Hurst exponent used by [`fbm_heightmap`]. Rough, mountain-like relief.
pub const DEFAULT_HURST: f64 = 0.75;

const LACUNARITY: f64 = 2.0;

/// `(amplitude, frequency)` of each octave, scaled so the first octave spans
/// about six noise periods across the longer side of the tile.
fn octave_weights(octaves: u32, longest_side: usize) -> Vec<(f64, f64)> {
    let gain = LACUNARITY.powf(-DEFAULT_HURST);
    let base = 6.0 / longest_side.max(1) as f64;
    (0..octaves as i32).map(|i| (gain.powi(i), base * LACUNARITY.powi(i))).collect()
}

/// Stretch `raw` so its minimum lands on 0 and its maximum on `u16::MAX`.
fn quantize(raw: &[f64]) -> Vec<u16> {
    let (lo, hi) = raw
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let span = hi - lo;
    if span <= 0.0 {
        return vec![0; raw.len()];
    }
    raw.iter().map(|&v| ((v - lo) / span * u16::MAX as f64).round() as u16).collect()
}

/// A `width × height` fBm tile normalised to `0..=u16::MAX`.
///
/// A constant field (only possible for degenerate sizes) maps to all zeros.
pub fn fbm_heightmap(seed: u32, width: usize, height: usize, octaves: u32) -> HeightMap {
    let perlin = Perlin::new(seed);
    let weights = octave_weights(octaves, width.max(height));

    let mut raw = Vec::with_capacity(width * height);
    for r in 0..height {
        for c in 0..width {
            let (x, y) = (c as f64, r as f64);
            raw.push(weights.iter().map(|&(amp, freq)| amp * perlin.get([x * freq, y * freq])).sum::<f64>());
        }
    }

    HeightMap { data: quantize(&raw), width, height }
}
