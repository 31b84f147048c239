//! Implied conversion rates from pairs of leases.
//!
//! Two leases in the same sample whose deposits differ materially reveal how
//! much monthly rent the market trades for each unit of deposit. Annualised,
//! that trade-off is the conversion rate. Every unordered pair is a candidate,
//! so this is quadratic in the clean-sample size.

use chrono::NaiveDate;
use rentfair_core::Transaction;
use serde::Serialize;

/// Smallest deposit gap, in currency units, for a pair to be informative.
pub const MIN_DEPOSIT_GAP: u64 = 5_000_000;

/// Upper bound of a physically plausible annual conversion rate, in percent.
pub const MAX_PLAUSIBLE_RATE: f64 = 15.0;

/// Days per month used when converting lease age to months.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Weight decay per month of age.
const RECENCY_DECAY: f64 = 0.2;

/// Annual conversion rate implied by one pair of leases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConversionRatePair {
    /// Percent per year, always within `[0, MAX_PLAUSIBLE_RATE]`.
    pub implied_annual_rate: f64,
    /// Mean age of the two leases in days.
    pub average_age_days: f64,
    /// `1 / (1 + 0.2·months_ago)`, in `(0, 1]`.
    pub recency_weight: f64,
}

/// Recency weight for a pair whose mean age is `age_days`.
pub fn recency_weight(age_days: f64) -> f64 {
    let months_ago = age_days.max(0.0) / DAYS_PER_MONTH;
    1.0 / (1.0 + months_ago * RECENCY_DECAY)
}

/// Conversion rate implied by moving from `low` (smaller deposit) to `high`.
///
/// `(rent_low - rent_high) · 12 / (deposit_high - deposit_low) · 100`.
/// `None` when the deposit gap is not positive.
pub fn implied_rate(low: &Transaction, high: &Transaction) -> Option<f64> {
    let deposit_gap = high.deposit as f64 - low.deposit as f64;
    if deposit_gap <= 0.0 {
        return None;
    }
    let rent_gap = low.monthly_rent as f64 - high.monthly_rent as f64;
    Some(rent_gap * 12.0 / deposit_gap * 100.0)
}

/// Derive every admissible pairwise rate from a clean sample.
///
/// A pair qualifies when both rents are non-zero and the deposits differ by at
/// least [`MIN_DEPOSIT_GAP`]. Rates outside `[0, 15]` are discarded: more
/// deposit must never command more rent, and rates beyond 15%/yr do not occur.
pub fn infer(clean: &[Transaction], as_of: NaiveDate) -> Vec<ConversionRatePair> {
    let mut pairs = Vec::new();

    for (i, first) in clean.iter().enumerate() {
        if first.is_jeonse() {
            continue;
        }
        for second in &clean[i + 1..] {
            if second.is_jeonse() || first.deposit.abs_diff(second.deposit) < MIN_DEPOSIT_GAP {
                continue;
            }

            let (low, high) = if first.deposit < second.deposit {
                (first, second)
            } else {
                (second, first)
            };
            let Some(rate) = implied_rate(low, high) else {
                continue;
            };
            if !(0.0..=MAX_PLAUSIBLE_RATE).contains(&rate) {
                continue;
            }

            let average_age_days = (first.age_days(as_of) + second.age_days(as_of)) / 2.0;
            pairs.push(ConversionRatePair {
                implied_annual_rate: rate,
                average_age_days,
                recency_weight: recency_weight(average_age_days),
            });
        }
    }

    pairs
}

/// Two-point rate from the lowest- and highest-deposit leases.
///
/// Used when no pair survives [`infer`]. `None` if either the deposit gap or
/// the rent gap is not positive.
pub fn baseline_rate(clean: &[Transaction]) -> Option<f64> {
    let low = clean.iter().min_by_key(|t| t.deposit)?;
    let high = clean.iter().max_by_key(|t| t.deposit)?;
    if high.deposit <= low.deposit || low.monthly_rent <= high.monthly_rent {
        return None;
    }
    implied_rate(low, high)
}
