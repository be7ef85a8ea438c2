use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Topological role of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    Saddle,
    Peak,
}

impl FeatureKind {
    /// Legacy numeric code: `0` for saddles, `1` for peaks.
    pub fn code(self) -> u8 {
        match self {
            FeatureKind::Saddle => 0,
            FeatureKind::Peak => 1,
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Height drop to the key saddle. Unbounded sorts above every finite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Prominence {
    Finite(u16),
    Unbounded,
}

impl Prominence {
    /// Value written in place of "unbounded" in the textual output.
    pub const UNBOUNDED_SENTINEL: u16 = u16::MAX;

    pub fn is_unbounded(self) -> bool {
        matches!(self, Prominence::Unbounded)
    }

    /// Numeric form, with [`Self::UNBOUNDED_SENTINEL`] for the global maximum.
    pub fn as_u16(self) -> u16 {
        match self {
            Prominence::Finite(p) => p,
            Prominence::Unbounded => Self::UNBOUNDED_SENTINEL,
        }
    }

    /// `true` when the feature survives a threshold filter.
    pub fn exceeds(self, threshold: u16) -> bool {
        match self {
            Prominence::Finite(p) => p > threshold,
            Prominence::Unbounded => true,
        }
    }
}

impl fmt::Display for Prominence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

/// A peak or saddle found during the sweep.
///
/// Position, height and kind are fixed at creation. `prominence` starts out
/// [`Prominence::Unbounded`] for peaks and is written once, when the peak's
/// island is absorbed by a taller one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feature {
    pub x: usize,
    pub y: usize,
    pub height: u16,
    pub prominence: Prominence,
    pub kind: FeatureKind,
}

impl Feature {
    pub fn peak(x: usize, y: usize, height: u16) -> Self {
        Self { x, y, height, prominence: Prominence::Unbounded, kind: FeatureKind::Peak }
    }

    pub fn saddle(x: usize, y: usize, height: u16, prominence: u16) -> Self {
        Self { x, y, height, prominence: Prominence::Finite(prominence), kind: FeatureKind::Saddle }
    }

    /// `true` if `self` is the higher of two features in sweep order: taller,
    /// or equally tall and first by `(x, y)`.
    pub fn outranks(&self, other: &Feature) -> bool {
        super::ordering::sweep_cmp((self.height, self.x, self.y), (other.height, other.x, other.y))
            == Ordering::Less
    }
}

impl fmt::Display for Feature {
    /// Legacy CSV line: `x, y, prominence, height, kind`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}, {}, {}", self.x, self.y, self.prominence, self.height, self.kind)
    }
}

/// Orders features by descending prominence, keeping discovery order among equals.
pub fn sort_by_prominence(features: &mut [Feature]) {
    features.sort_by(|a, b| b.prominence.cmp(&a.prominence));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_outranks_every_finite_value() {
        assert!(Prominence::Unbounded > Prominence::Finite(u16::MAX));
        assert!(Prominence::Finite(3) > Prominence::Finite(2));
    }

    #[test]
    fn threshold_is_strict_and_ignores_unbounded() {
        assert!(!Prominence::Finite(8000).exceeds(8000));
        assert!(Prominence::Finite(8001).exceeds(8000));
        assert!(Prominence::Unbounded.exceeds(u16::MAX));
    }

    #[test]
    fn display_uses_legacy_csv_layout() {
        assert_eq!(Feature::peak(4, 2, 900).to_string(), "4, 2, 65535, 900, 1");
        assert_eq!(Feature::saddle(1, 0, 1, 4).to_string(), "1, 0, 4, 1, 0");
    }

    #[test]
    fn equal_height_peaks_rank_by_position() {
        let a = Feature::peak(0, 5, 10);
        let b = Feature::peak(1, 0, 10);
        assert!(a.outranks(&b));
        assert!(!b.outranks(&a));
        assert!(Feature::peak(9, 9, 11).outranks(&a));
    }

    #[test]
    fn prominence_sort_is_stable() {
        let mut features = vec![
            Feature::saddle(0, 0, 1, 5),
            Feature::peak(1, 0, 20),
            Feature::saddle(2, 0, 1, 5),
            Feature::saddle(3, 0, 1, 9),
        ];
        sort_by_prominence(&mut features);
        let xs: Vec<usize> = features.iter().map(|f| f.x).collect();
        assert_eq!(xs, vec![1, 3, 0, 2]);
    }
}
