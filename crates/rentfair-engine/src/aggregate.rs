//! Robust summary of pairwise conversion rates.
//!
//! Pairwise rates share leases and are far from independent, so the median is
//! the rate of record. The recency-weighted mean is kept for diagnostics only.

use crate::pairwise::ConversionRatePair;
use crate::stats::{linear_percentile, sorted};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateSummary {
    pub median: f64,
    pub weighted_mean: f64,
    pub p25: f64,
    pub p75: f64,
}

/// Summarise pairwise rates; `None` when there are no pairs.
pub fn aggregate(pairs: &[ConversionRatePair]) -> Option<RateSummary> {
    let rates: Vec<f64> = pairs.iter().map(|p| p.implied_annual_rate).collect();
    let rates = sorted(&rates);

    let median = linear_percentile(&rates, 50.0)?;
    let p25 = linear_percentile(&rates, 25.0)?;
    let p75 = linear_percentile(&rates, 75.0)?;

    let (weighted_sum, weight_total) = pairs.iter().fold((0.0, 0.0), |(s, w), p| {
        (s + p.implied_annual_rate * p.recency_weight, w + p.recency_weight)
    });
    let weighted_mean = if weight_total > 0.0 {
        weighted_sum / weight_total
    } else {
        median
    };

    Some(RateSummary {
        median,
        weighted_mean,
        p25,
        p75,
    })
}
