//! Goal progress as drawn by a two-segment bar: a base segment up to 100%
//! and an overflow segment for whatever exceeds the target.

use serde::Serialize;

/// Widest the overflow segment gets, in percent of the bar.
pub const MAX_EXCESS_WIDTH: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    /// `0..=100`.
    pub base_width: f64,
    /// `0..=MAX_EXCESS_WIDTH`.
    pub excess_width: f64,
    pub has_excess: bool,
    /// Ratio in percent with one decimal place (`"87.5"`).
    pub percentage: String,
}

impl Progress {
    fn zero() -> Self {
        Self {
            base_width: 0.0,
            excess_width: 0.0,
            has_excess: false,
            percentage: "0.0".to_string(),
        }
    }
}

/// Progress of `current` towards `target`.
///
/// A zero target yields an empty bar. Non-finite input (and negative targets)
/// are treated the same way, as is a ratio too large to represent.
pub fn compute_progress(current: f64, target: f64) -> Progress {
    if target <= 0.0 || !target.is_finite() || !current.is_finite() {
        return Progress::zero();
    }

    let percentage = current / target * 100.0;
    if !percentage.is_finite() {
        return Progress::zero();
    }
    let has_excess = current / target > 1.0;
    let excess_width = if has_excess {
        ((percentage - 100.0) / 2.0).min(MAX_EXCESS_WIDTH)
    } else {
        0.0
    };

    Progress {
        base_width: percentage.clamp(0.0, 100.0),
        excess_width,
        has_excess,
        percentage: format_percentage(percentage),
    }
}

/// One decimal place; a value that rounds to zero never carries a sign.
fn format_percentage(percentage: f64) -> String {
    let rendered = format!("{percentage:.1}");
    if rendered == "-0.0" {
        "0.0".to_string()
    } else {
        rendered
    }
}
