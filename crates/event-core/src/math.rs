//! Shared rounding and ratio helpers for dashboard metrics.
//! Stateless functions, safe to call from any analytics crate.

/// Round half toward positive infinity, matching how the dashboard rounds percentages.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to a fixed number of decimals with the same half-up rule.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    round_half_up(value * factor) / factor
}

/// `numerator / denominator`, or 0 when the denominator is 0.
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Rounded percentage in `[0, 100]` for non-negative counts.
pub fn percent(numerator: usize, denominator: usize) -> u32 {
    round_half_up(ratio(numerator, denominator) * 100.0) as u32
}
