//! Prominent topology of 16-bit heightmaps.
//!
//! Peaks and the saddles joining their basins are found by sweeping cells from
//! highest to lowest while a union-find forest tracks each connected island and
//! its tallest peak. See [`prominence::prominent_features`] for the one-call
//! entry point.

pub mod error;
pub mod heightmap;
pub mod params;
pub mod prominence;
pub mod synthetic;

pub use error::{ProminenceError, Result};
pub use heightmap::{Cell, FnSource, HeightMap, HeightSource, Location};
pub use params::{OrderingStrategy, ProminenceParams, DEFAULT_THRESHOLD};
pub use prominence::{
    compute_features, prominent_features, Feature, FeatureKind, Prominence, ProminenceEngine,
};
