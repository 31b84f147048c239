//! Tenant rent versus the market's expected rent.
//!
//! Classification combines a percentage threshold with an absolute-amount
//! threshold. Overpayment must clear both; a good deal needs only one, so a
//! fairly priced tenant is not alarmed over a small overage on a cheap unit.

use rentfair_core::{FairnessTier, Transaction, UserQuote, UserRentComparison};

use crate::stats::mean;

/// At or below this percent difference the quote is a good deal.
pub const GOOD_DEAL_PERCENT: f64 = -10.0;
/// At or below this absolute difference the quote is a good deal.
pub const GOOD_DEAL_AMOUNT: i64 = -150_000;
pub const SEVERE_PERCENT: f64 = 15.0;
pub const SEVERE_AMOUNT: i64 = 200_000;
pub const OVERPRICED_PERCENT: f64 = 5.0;
pub const OVERPRICED_AMOUNT: i64 = 100_000;

/// Descriptive statistics of the sample a comparison was made against.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SampleSummary {
    pub mean_deposit: f64,
    pub mean_rent: f64,
    pub clean_count: usize,
    pub outliers_removed: usize,
}

impl SampleSummary {
    pub fn from_transactions(clean: &[Transaction], outliers_removed: usize) -> Self {
        Self {
            mean_deposit: mean(clean.iter().map(|t| t.deposit as f64)).unwrap_or(0.0),
            mean_rent: mean(clean.iter().map(|t| t.monthly_rent as f64)).unwrap_or(0.0),
            clean_count: clean.len(),
            outliers_removed,
        }
    }
}

/// Compare the quote's rent against `expected_rent` (rounded to whole units).
pub fn compare(
    quote: &UserQuote,
    expected_rent: f64,
    sample: &SampleSummary,
) -> UserRentComparison {
    let expected_rent = expected_rent.round() as i64;
    let actual_rent = quote.monthly_rent as i64;
    let rent_difference = actual_rent - expected_rent;
    let rent_difference_percent = if expected_rent > 0 {
        rent_difference as f64 / expected_rent as f64 * 100.0
    } else {
        0.0
    };

    UserRentComparison {
        has_market_data: true,
        expected_rent,
        actual_rent,
        rent_difference,
        rent_difference_percent,
        mean_deposit: sample.mean_deposit,
        mean_rent: sample.mean_rent,
        clean_transaction_count: sample.clean_count,
        outliers_removed: sample.outliers_removed,
    }
}

/// Comparison for a quote with nothing to price it against.
///
/// Difference and percent are 0, so [`classify`] yields `FAIR`.
pub fn unpriced(quote: &UserQuote, sample: &SampleSummary) -> UserRentComparison {
    UserRentComparison {
        has_market_data: false,
        expected_rent: 0,
        actual_rent: quote.monthly_rent as i64,
        rent_difference: 0,
        rent_difference_percent: 0.0,
        mean_deposit: sample.mean_deposit,
        mean_rent: sample.mean_rent,
        clean_transaction_count: sample.clean_count,
        outliers_removed: sample.outliers_removed,
    }
}

/// Fairness tier; first matching rule wins.
pub fn classify(comparison: &UserRentComparison) -> FairnessTier {
    let percent = comparison.rent_difference_percent;
    let amount = comparison.rent_difference;

    if percent <= GOOD_DEAL_PERCENT || amount <= GOOD_DEAL_AMOUNT {
        FairnessTier::GoodDeal
    } else if percent > SEVERE_PERCENT && amount > SEVERE_AMOUNT {
        FairnessTier::SeverelyOverpriced
    } else if percent > OVERPRICED_PERCENT && amount > OVERPRICED_AMOUNT {
        FairnessTier::Overpriced
    } else {
        FairnessTier::Fair
    }
}

/// One-sentence explanation of a tier for display.
pub fn describe(comparison: &UserRentComparison, tier: FairnessTier) -> String {
    if !comparison.has_market_data {
        return "No comparable leases with a monthly rent were found, so this quote could \
                not be priced against the market."
            .to_string();
    }
    let amount = crate::format_amount(comparison.rent_difference.abs());
    let percent = comparison.rent_difference_percent.abs();
    let expected = crate::format_amount(comparison.expected_rent);
    match tier {
        FairnessTier::GoodDeal => format!(
            "Rent is {amount} ({percent:.1}%) below the expected {expected} for this deposit."
        ),
        FairnessTier::Fair if comparison.rent_difference > 0 => format!(
            "Rent is {amount} ({percent:.1}%) above the expected {expected}, within the normal range."
        ),
        FairnessTier::Fair => {
            format!("Rent is in line with the expected {expected} for this deposit.")
        }
        FairnessTier::Overpriced => format!(
            "Rent is {amount} ({percent:.1}%) above the expected {expected}; there is room to negotiate."
        ),
        FairnessTier::SeverelyOverpriced => format!(
            "Rent is {amount} ({percent:.1}%) above the expected {expected}; this quote is well above market."
        ),
    }
}
