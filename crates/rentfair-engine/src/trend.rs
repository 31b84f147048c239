//! Time trend of conversion rates via ordinary least squares.
//!
//! Points are re-indexed chronologically (`x = max_age - age`, so the oldest
//! point sits at `x = 0`) and a straight line is fitted. The percentage change
//! between the fitted endpoints is then judged against the fit quality: real
//! rate series are noisy enough that low R² is the norm, so weak fits need a
//! larger swing before the market is called rising or declining.

use chrono::NaiveDate;
use rentfair_core::{Transaction, Trend, TrendDirection};

use crate::pairwise::ConversionRatePair;

/// Fewer points than this always yield a stable trend.
pub const MIN_TREND_POINTS: usize = 3;

/// One observation: how old it is and what was observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub age_days: f64,
    pub value: f64,
}

/// Least-squares line over chronologically indexed points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    /// Largest x, i.e. the position of the newest point.
    pub x_max: f64,
}

impl LinearFit {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Percent change from the fitted oldest value to the fitted newest value.
    /// `None` when the oldest fitted value is effectively zero.
    pub fn percentage_change(&self) -> Option<f64> {
        let first = self.at(0.0);
        let last = self.at(self.x_max);
        (first.abs() > f64::EPSILON).then(|| (last - first) / first * 100.0)
    }
}

/// Fit `value = slope·x + intercept`; `None` when the x values do not vary.
pub fn fit_line(points: &[TrendPoint]) -> Option<LinearFit> {
    if points.len() < 2 {
        return None;
    }
    let max_age = points
        .iter()
        .map(|p| p.age_days)
        .fold(f64::NEG_INFINITY, f64::max);
    let xs: Vec<f64> = points.iter().map(|p| max_age - p.age_days).collect();

    let n = points.len() as f64;
    let x_mean = xs.iter().sum::<f64>() / n;
    let y_mean = points.iter().map(|p| p.value).sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (x, p) in xs.iter().zip(points) {
        let x_diff = x - x_mean;
        numerator += x_diff * (p.value - y_mean);
        denominator += x_diff * x_diff;
    }
    if denominator.abs() < f64::EPSILON {
        return None;
    }

    let slope = numerator / denominator;
    let intercept = y_mean - slope * x_mean;

    let ss_res: f64 = xs
        .iter()
        .zip(points)
        .map(|(x, p)| (p.value - (slope * x + intercept)).powi(2))
        .sum();
    let ss_tot: f64 = points.iter().map(|p| (p.value - y_mean).powi(2)).sum();
    let r_squared = if ss_tot > 0.0 {
        (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
    } else {
        0.0
    };

    Some(LinearFit {
        slope,
        intercept,
        r_squared,
        x_max: xs.iter().copied().fold(0.0, f64::max),
    })
}

/// Tiered significance rule.
///
/// Trending when `|change| > 15`, or `> 10` with `R² > 0.1`, or `> 5` with
/// `R² > 0.3`; stable otherwise.
pub fn classify(percentage_change: f64, r_squared: f64) -> TrendDirection {
    let magnitude = percentage_change.abs();
    let significant = magnitude > 15.0
        || (magnitude > 10.0 && r_squared > 0.1)
        || (magnitude > 5.0 && r_squared > 0.3);

    if !significant {
        TrendDirection::Stable
    } else if percentage_change > 0.0 {
        TrendDirection::Rising
    } else {
        TrendDirection::Declining
    }
}

/// Trend over arbitrary dated observations.
pub fn fit_trend(points: &[TrendPoint]) -> Trend {
    if points.len() < MIN_TREND_POINTS {
        return Trend::stable();
    }
    let Some(fit) = fit_line(points) else {
        return Trend::stable();
    };
    let Some(change) = fit.percentage_change() else {
        return Trend::stable();
    };

    Trend {
        direction: classify(change, fit.r_squared),
        percentage: change.abs(),
        r_squared: fit.r_squared,
    }
}

/// Trend of the pairwise conversion rates.
pub fn estimate_trend(pairs: &[ConversionRatePair]) -> Trend {
    let points: Vec<TrendPoint> = pairs
        .iter()
        .map(|p| TrendPoint {
            age_days: p.average_age_days,
            value: p.implied_annual_rate,
        })
        .collect();
    fit_trend(&points)
}

/// Trend of annual housing cost per lease: `rent·12 + deposit·rate/100`.
///
/// Used when too few rate pairs exist to fit a rate trend.
pub fn estimate_cost_trend(transactions: &[Transaction], as_of: NaiveDate, rate: f64) -> Trend {
    let points: Vec<TrendPoint> = transactions
        .iter()
        .map(|t| TrendPoint {
            age_days: t.age_days(as_of),
            value: t.monthly_rent as f64 * 12.0 + t.deposit as f64 * rate / 100.0,
        })
        .collect();
    fit_trend(&points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{as_of, lease};

    /// Ten monthly points, oldest first, on `start + step·i` plus `noise[i]`.
    fn monthly(start: f64, step: f64, noise: [f64; 10]) -> Vec<ConversionRatePair> {
        (0..10)
            .map(|i| ConversionRatePair {
                implied_annual_rate: start + step * i as f64 + noise[i],
                average_age_days: 270.0 - 30.0 * i as f64,
                recency_weight: 1.0,
            })
            .collect()
    }

    #[test]
    fn too_few_pairs_is_stable() {
        let pairs = &monthly(5.0, 1.0, [0.0; 10])[..2];
        assert_eq!(estimate_trend(pairs), Trend::stable());
    }

    #[test]
    fn clean_rise_is_rising() {
        let trend = estimate_trend(&monthly(5.0, 0.6 / 9.0, [0.0; 10]));
        assert_eq!(trend.direction, TrendDirection::Rising);
        assert!((trend.percentage - 12.0).abs() < 1e-9);
        assert!((trend.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn clean_fall_is_declining_with_positive_magnitude() {
        let trend = estimate_trend(&monthly(6.0, -0.6 / 9.0, [0.0; 10]));
        assert_eq!(trend.direction, TrendDirection::Declining);
        assert!((trend.percentage - 10.0).abs() < 1e-9);
    }

    #[test]
    fn noisy_twelve_percent_is_stable() {
        // Noise is orthogonal to time, so the fitted change stays at 12%
        // while R² drops to about 0.044.
        let noise = [1.0, -1.0, 1.0, -1.0, 0.0, 0.0, -1.0, 1.0, -1.0, 1.0];
        let trend = estimate_trend(&monthly(5.0, 0.6 / 9.0, noise));
        assert!((trend.percentage - 12.0).abs() < 1e-9);
        assert!(trend.r_squared < 0.1);
        assert_eq!(trend.direction, TrendDirection::Stable);
    }

    #[test]
    fn same_age_everywhere_is_stable() {
        let pairs: Vec<ConversionRatePair> = [4.0, 6.0, 8.0]
            .iter()
            .map(|&r| ConversionRatePair {
                implied_annual_rate: r,
                average_age_days: 40.0,
                recency_weight: 1.0,
            })
            .collect();
        assert_eq!(estimate_trend(&pairs), Trend::stable());
    }

    #[test]
    fn tiered_rule_boundaries() {
        assert_eq!(classify(15.1, 0.0), TrendDirection::Rising);
        assert_eq!(classify(15.0, 0.0), TrendDirection::Stable);
        assert_eq!(classify(-12.0, 0.05), TrendDirection::Stable);
        assert_eq!(classify(-12.0, 0.11), TrendDirection::Declining);
        assert_eq!(classify(7.0, 0.3), TrendDirection::Stable);
        assert_eq!(classify(7.0, 0.31), TrendDirection::Rising);
        assert_eq!(classify(5.0, 0.9), TrendDirection::Stable);
    }

    #[test]
    fn cost_trend_tracks_rent_increase() {
        // Same deposit, rent climbing 100k per month from 1.0M.
        let leases: Vec<Transaction> = (0..5)
            .map(|i| lease(20_000_000, 1_000_000 + 100_000 * i, 120 - 30 * i as i64))
            .collect();
        let trend = estimate_cost_trend(&leases, as_of(), 5.0);
        assert_eq!(trend.direction, TrendDirection::Rising);
        assert!(trend.percentage > 15.0);
    }
}
