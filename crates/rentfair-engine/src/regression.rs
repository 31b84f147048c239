//! Theil–Sen regression of monthly rent on deposit.
//!
//! The slope is the median of all pairwise slopes and the intercept the median
//! of `rent - slope·deposit`. Up to roughly 29% of the points can be arbitrary
//! without moving the fit, which matters because related-party or below-market
//! leases routinely slip past the IQR filter.

use rentfair_core::Transaction;
use serde::Serialize;

use crate::stats::{lower_median, mean};

/// Pairs whose deposits differ by this much or less are not used for slopes.
pub const MIN_SLOPE_DEPOSIT_GAP: u64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMethod {
    TheilSen,
    /// Too few points or no eligible pair: every prediction is the mean rent.
    MeanRent,
    /// No lease with a monthly rent to learn from; nothing is predicted.
    NoData,
}

/// Fitted deposit → rent relationship.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepositRentFit {
    pub slope: f64,
    pub intercept: f64,
    pub mean_rent: f64,
    pub method: FitMethod,
    /// Number of pairwise slopes the median was taken over.
    pub slope_count: usize,
}

impl DepositRentFit {
    fn mean_only(mean_rent: f64) -> Self {
        Self {
            slope: 0.0,
            intercept: mean_rent,
            mean_rent,
            method: FitMethod::MeanRent,
            slope_count: 0,
        }
    }

    fn no_data() -> Self {
        Self {
            slope: 0.0,
            intercept: 0.0,
            mean_rent: 0.0,
            method: FitMethod::NoData,
            slope_count: 0,
        }
    }

    /// Rent the market expects at `deposit`, or `None` without usable data.
    ///
    /// Never negative: a negative line value falls back to the mean rent.
    pub fn predict(&self, deposit: u64) -> Option<f64> {
        match self.method {
            FitMethod::NoData => None,
            FitMethod::MeanRent => Some(self.mean_rent),
            FitMethod::TheilSen => {
                let rent = self.slope * deposit as f64 + self.intercept;
                if rent < 0.0 || !rent.is_finite() {
                    Some(self.mean_rent)
                } else {
                    Some(rent)
                }
            }
        }
    }
}

/// Fit the regressor over a clean sample.
///
/// A sample with no monthly-rent lease (empty, or jeonse only) yields
/// [`FitMethod::NoData`].
pub fn fit(clean: &[Transaction]) -> DepositRentFit {
    if clean.iter().all(Transaction::is_jeonse) {
        return DepositRentFit::no_data();
    }
    let mean_rent = mean(clean.iter().map(|t| t.monthly_rent as f64)).unwrap_or(0.0);
    if clean.len() < 2 {
        return DepositRentFit::mean_only(mean_rent);
    }

    let mut slopes = Vec::with_capacity(clean.len() * (clean.len() - 1) / 2);
    for (i, a) in clean.iter().enumerate() {
        for b in &clean[i + 1..] {
            if a.deposit.abs_diff(b.deposit) <= MIN_SLOPE_DEPOSIT_GAP {
                continue;
            }
            let run = b.deposit as f64 - a.deposit as f64;
            let rise = b.monthly_rent as f64 - a.monthly_rent as f64;
            slopes.push(rise / run);
        }
    }
    let slope_count = slopes.len();
    let Some(slope) = lower_median(&mut slopes) else {
        return DepositRentFit::mean_only(mean_rent);
    };

    let mut residuals: Vec<f64> = clean
        .iter()
        .map(|t| t.monthly_rent as f64 - slope * t.deposit as f64)
        .collect();
    let Some(intercept) = lower_median(&mut residuals) else {
        return DepositRentFit::mean_only(mean_rent);
    };

    DepositRentFit {
        slope,
        intercept,
        mean_rent,
        method: FitMethod::TheilSen,
        slope_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::lease;

    /// Rent = 1,200,000 − 0.005·deposit (6% conversion).
    fn on_line(deposit: u64) -> Transaction {
        lease(deposit, 1_200_000 - deposit / 200, 0)
    }

    #[test]
    fn recovers_exact_line() {
        let sample: Vec<Transaction> = (1..=6).map(|i| on_line(i * 20_000_000)).collect();
        let f = fit(&sample);
        assert_eq!(f.method, FitMethod::TheilSen);
        assert_eq!(f.slope_count, 15);
        assert!((f.slope + 0.005).abs() < 1e-12);
        assert!((f.intercept - 1_200_000.0).abs() < 1e-6);
        assert!((f.predict(50_000_000).unwrap() - 950_000.0).abs() < 1e-6);
    }

    #[test]
    fn decreasing_rent_gives_negative_slope() {
        let sample = [
            lease(10_000_000, 900_000, 0),
            lease(30_000_000, 850_000, 0),
            lease(50_000_000, 760_000, 0),
            lease(70_000_000, 700_000, 0),
        ];
        assert!(fit(&sample).slope < 0.0);
    }

    #[test]
    fn resists_minority_outliers() {
        let mut sample: Vec<Transaction> = (1..=8).map(|i| on_line(i * 10_000_000)).collect();
        // Two related-party leases far below market.
        sample.push(lease(15_000_000, 100_000, 0));
        sample.push(lease(65_000_000, 50_000, 0));
        let f = fit(&sample);
        let predicted = f.predict(40_000_000).unwrap();
        assert!(
            (predicted - 1_000_000.0).abs() < 50_000.0,
            "prediction {predicted} drifted from the line"
        );
    }

    #[test]
    fn single_point_uses_mean() {
        let f = fit(&[lease(10_000_000, 700_000, 0)]);
        assert_eq!(f.method, FitMethod::MeanRent);
        assert_eq!(f.predict(999_000_000), Some(700_000.0));
    }

    #[test]
    fn empty_sample_predicts_nothing() {
        let f = fit(&[]);
        assert_eq!(f.method, FitMethod::NoData);
        assert_eq!(f.predict(10_000_000), None);
    }

    #[test]
    fn jeonse_only_sample_predicts_nothing() {
        let sample = [
            lease(200_000_000, 0, 0),
            lease(250_000_000, 0, 10),
            lease(300_000_000, 0, 20),
        ];
        let f = fit(&sample);
        assert_eq!(f.method, FitMethod::NoData);
        assert_eq!(f.predict(30_000_000), None);
    }

    #[test]
    fn no_eligible_pair_uses_mean() {
        let sample = [
            lease(10_000_000, 700_000, 0),
            lease(10_500_000, 800_000, 0),
            lease(11_000_000, 900_000, 0),
        ];
        let f = fit(&sample);
        assert_eq!(f.method, FitMethod::MeanRent);
        assert_eq!(f.predict(10_000_000), Some(800_000.0));
    }

    #[test]
    fn negative_prediction_falls_back_to_mean() {
        let sample: Vec<Transaction> = (1..=4).map(|i| on_line(i * 20_000_000)).collect();
        let f = fit(&sample);
        // Line crosses zero at 240M.
        assert_eq!(f.predict(300_000_000), Some(f.mean_rent));
        assert!(f.predict(200_000_000).unwrap() > 0.0);
    }
}
