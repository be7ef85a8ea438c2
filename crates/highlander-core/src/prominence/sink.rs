//! Threshold filtering of finished features.
use super::feature::Feature;

/// Iterator over the features whose prominence is unbounded or strictly
/// greater than a threshold, in discovery order.
pub struct ProminentFeatures<I> {
    inner: I,
    threshold: u16,
}

impl<I> ProminentFeatures<I> {
    pub fn new(inner: I, threshold: u16) -> Self {
        Self { inner, threshold }
    }
}

impl<I: Iterator<Item = Feature>> Iterator for ProminentFeatures<I> {
    type Item = Feature;

    fn next(&mut self) -> Option<Feature> {
        let threshold = self.threshold;
        self.inner.find(|f| f.prominence.exceeds(threshold))
    }
}

/// Keep only the features that clear `threshold`.
pub fn filter_prominent(features: Vec<Feature>, threshold: u16) -> Vec<Feature> {
    ProminentFeatures::new(features.into_iter(), threshold).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prominence::Prominence;

    #[test]
    fn keeps_discovery_order_and_unbounded_peak() {
        let mut low_peak = Feature::peak(3, 3, 40);
        low_peak.prominence = Prominence::Finite(2);
        let features = vec![
            Feature::peak(0, 0, 100),
            Feature::saddle(1, 0, 10, 50),
            low_peak,
            Feature::saddle(2, 0, 5, 20),
            Feature::saddle(4, 0, 5, 21),
        ];
        let kept: Vec<(usize, usize)> =
            filter_prominent(features, 20).iter().map(|f| (f.x, f.y)).collect();
        assert_eq!(kept, vec![(0, 0), (1, 0), (4, 0)]);
    }

    #[test]
    fn max_threshold_keeps_only_global_maximum() {
        let features = vec![Feature::saddle(1, 0, 0, u16::MAX), Feature::peak(0, 0, u16::MAX)];
        assert_eq!(filter_prominent(features, u16::MAX), vec![Feature::peak(0, 0, u16::MAX)]);
    }
}
