//! Threshold bands used for color selection.

use serde::{Deserialize, Serialize};

/// One of the three ranges defined by a monitor's `low`/`high` thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    Low,
    Normal,
    High,
}

impl Band {
    /// Classify `x` against a pair of thresholds.
    ///
    /// The thresholds are sorted first, so a configuration with `low > high`
    /// still splits the real line into three contiguous bands with
    /// boundaries at `min(low, high)` and `max(low, high)`. Both boundaries
    /// belong to the band below them. NaN lands in `Low`.
    pub fn classify(x: f64, low: i64, high: i64) -> Self {
        let (lo, hi) = if low <= high { (low, high) } else { (high, low) };
        if x > hi as f64 {
            Band::High
        } else if x > lo as f64 {
            Band::Normal
        } else {
            Band::Low
        }
    }
}
