use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Features at or below this prominence are dropped unless configured otherwise.
pub const DEFAULT_THRESHOLD: u16 = 8000;

/// How the cells are put into sweep order.
///
/// Both strategies yield the identical sequence: descending height, then
/// ascending `x`, then ascending `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderingStrategy {
    /// Bucket cells over the 16-bit height domain. Linear time.
    #[default]
    Counting,
    /// Sort an explicit cell list with the total comparator. Runs on the
    /// rayon pool when the `threading` feature is enabled.
    Comparison,
}

impl fmt::Display for OrderingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderingStrategy::Counting => write!(f, "counting"),
            OrderingStrategy::Comparison => write!(f, "comparison"),
        }
    }
}

impl FromStr for OrderingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "counting" => Ok(OrderingStrategy::Counting),
            "comparison" => Ok(OrderingStrategy::Comparison),
            other => Err(format!("unknown ordering strategy `{other}` (expected counting or comparison)")),
        }
    }
}

/// Tunables for one prominence run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProminenceParams {
    /// Features are kept when their prominence is strictly greater than this.
    /// The global maximum is always kept.
    pub threshold: u16,
    pub ordering: OrderingStrategy,
}

impl Default for ProminenceParams {
    fn default() -> Self {
        Self { threshold: DEFAULT_THRESHOLD, ordering: OrderingStrategy::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_tool() {
        let p = ProminenceParams::default();
        assert_eq!(p.threshold, 8000);
        assert_eq!(p.ordering, OrderingStrategy::Counting);
    }

    #[test]
    fn missing_json_fields_fall_back_to_defaults() {
        let p: ProminenceParams = serde_json::from_str(r#"{"ordering": "comparison"}"#).unwrap();
        assert_eq!(p.threshold, DEFAULT_THRESHOLD);
        assert_eq!(p.ordering, OrderingStrategy::Comparison);

        let p: ProminenceParams = serde_json::from_str(r#"{"threshold": 12}"#).unwrap();
        assert_eq!(p.threshold, 12);
        assert_eq!(p.ordering, OrderingStrategy::Counting);
    }

    #[test]
    fn strategy_parses_case_insensitively() {
        assert_eq!("Counting".parse::<OrderingStrategy>(), Ok(OrderingStrategy::Counting));
        assert_eq!("comparison".parse::<OrderingStrategy>(), Ok(OrderingStrategy::Comparison));
        assert!("radix".parse::<OrderingStrategy>().is_err());
    }
}
