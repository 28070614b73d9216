//! Capacity accounting.
//!
//! Pure functions over [`DailyCapacity`](crate::models::DailyCapacity) records:
//! per-day derived metrics and aggregation across a period. Ratios over an empty
//! quota are reported as 0 rather than NaN or infinity.

mod metrics;
mod weekly;

pub use metrics::*;
pub use weekly::*;

/// `numerator / denominator`, or 0 when the denominator is 0.
pub(crate) fn guarded_ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
