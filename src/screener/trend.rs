//! Numeric helpers shared by the category scorers.

/// Whether a chronological series shows a growing trend.
///
/// Counts adjacent pairs where the later value is higher. Down-years are
/// tolerated as long as at least `min_positive` increases exist. A series with
/// fewer than two values is never growing.
pub fn is_growing_trend(values: &[f64], min_positive: usize) -> bool {
    if values.len() < 2 {
        return false;
    }

    let increases = values.windows(2).filter(|w| w[1] > w[0]).count();
    increases >= min_positive
}

/// Normalize a ratio that may be a fraction (0.25) or a percentage (25.0).
///
/// Values at or below 1 are treated as fractions, so exactly 1.0 reads as 100%.
pub fn to_percentage(value: f64) -> f64 {
    if value <= 1.0 {
        value * 100.0
    } else {
        value
    }
}
