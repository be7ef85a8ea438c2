//! Prominence pipeline: ordering → sweep → threshold filter.
pub mod engine;
pub mod feature;
pub mod islands;
pub mod ordering;
pub mod sink;

use std::ops::ControlFlow;

use tracing::debug;

use crate::error::Result;
use crate::heightmap::HeightSource;
use crate::params::{OrderingStrategy, ProminenceParams};
pub use engine::ProminenceEngine;
pub use feature::{sort_by_prominence, Feature, FeatureKind, Prominence};
pub use ordering::order_cells;
pub use sink::{filter_prominent, ProminentFeatures};

/// Every peak and saddle of `source`, unfiltered, in discovery order.
pub fn compute_features<S: HeightSource>(source: &S, ordering: OrderingStrategy) -> Vec<Feature> {
    let cells = order_cells(source, ordering);
    ProminenceEngine::new(source.width(), source.height()).sweep(&cells)
}

/// Peaks and saddles of `source` whose prominence clears `params.threshold`.
///
/// The global maximum is always included.
pub fn prominent_features<S: HeightSource>(source: &S, params: &ProminenceParams) -> Vec<Feature> {
    let all = compute_features(source, params.ordering);
    let total = all.len();
    let kept = filter_prominent(all, params.threshold);
    debug!(total, kept = kept.len(), threshold = params.threshold, "filtered features");
    kept
}

/// [`prominent_features`] with a caller checkpoint evaluated once per cell.
pub fn prominent_features_until<S, F>(source: &S, params: &ProminenceParams, checkpoint: F) -> Result<Vec<Feature>>
where
    S: HeightSource,
    F: FnMut(usize) -> ControlFlow<()>,
{
    let cells = order_cells(source, params.ordering);
    let all = ProminenceEngine::new(source.width(), source.height()).sweep_until(&cells, checkpoint)?;
    Ok(filter_prominent(all, params.threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightmap::{FnSource, HeightMap};
    use crate::synthetic::fbm_heightmap;

    #[test]
    fn global_maximum_survives_any_threshold() {
        let hm = fbm_heightmap(7, 48, 48, 6);
        let peak = hm.max_height().unwrap();
        for threshold in [0, 100, 8000, u16::MAX] {
            let params = ProminenceParams { threshold, ..ProminenceParams::default() };
            let features = prominent_features(&hm, &params);
            let top: Vec<&Feature> = features.iter().filter(|f| f.prominence.is_unbounded()).collect();
            assert_eq!(top.len(), 1, "threshold {threshold}");
            assert_eq!(top[0].height, peak);
        }
    }

    #[test]
    fn filtered_output_is_subsequence_of_full_output() {
        let hm = fbm_heightmap(21, 64, 32, 6);
        let all = compute_features(&hm, OrderingStrategy::Counting);
        let params = ProminenceParams { threshold: 8000, ..ProminenceParams::default() };
        let kept = prominent_features(&hm, &params);
        let mut rest = all.iter();
        for f in &kept {
            assert!(f.prominence.exceeds(8000));
            assert!(rest.any(|a| a == f), "{f} out of order or missing");
        }
        assert!(kept.len() < all.len(), "a rough fBm tile should have low-prominence features");
    }

    #[test]
    fn strategies_give_identical_features() {
        let hm = fbm_heightmap(3, 40, 40, 5);
        assert_eq!(
            compute_features(&hm, OrderingStrategy::Counting),
            compute_features(&hm, OrderingStrategy::Comparison)
        );
    }

    #[test]
    fn plateau_fragments_follow_tie_break() {
        // Two equal summits: the first in (x, y) order stays unbounded, the
        // other is bounded by the dip between them.
        let hm = HeightMap::from_rows(&[[50u16, 10, 50]]).unwrap();
        let features = compute_features(&hm, OrderingStrategy::Counting);
        assert_eq!(features[0], Feature::peak(0, 0, 50));
        assert_eq!(features[1].prominence, Prominence::Finite(40));
        assert_eq!(features[2], Feature::saddle(1, 0, 10, 40));
    }

    #[test]
    fn closure_sources_are_swept_like_maps() {
        let height_at = |x: usize, y: usize| ((x * 7 + y * 13) % 23) as u16 * 100;
        let src = FnSource::new(16, 16, height_at);
        let mut hm = HeightMap::new(16, 16, 0);
        for y in 0..16 {
            for x in 0..16 {
                hm.set(x, y, height_at(x, y));
            }
        }
        let params = ProminenceParams { threshold: 0, ..ProminenceParams::default() };
        assert_eq!(prominent_features(&src, &params), prominent_features(&hm, &params));
    }

    #[test]
    fn cancellable_run_matches_plain_run() {
        let hm = fbm_heightmap(5, 24, 24, 4);
        let params = ProminenceParams { threshold: 50, ..ProminenceParams::default() };
        let plain = prominent_features(&hm, &params);
        let checked = prominent_features_until(&hm, &params, |_| ControlFlow::Continue(())).unwrap();
        assert_eq!(plain, checked);
    }
}
