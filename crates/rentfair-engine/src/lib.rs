//! Rate-inference and comparison engine.
//!
//! Pure, synchronous functions over immutable lease snapshots. Data flows one
//! way: outlier filter → pairwise rates → aggregation and trend → deposit-rent
//! regression → comparison → negotiation advice.

pub mod aggregate;
pub mod analysis;
pub mod comparison;
pub mod market;
pub mod negotiation;
pub mod outlier;
pub mod pairwise;
pub mod regression;
pub mod stats;
pub mod trend;

#[cfg(test)]
mod testing;

pub use aggregate::{RateSummary, aggregate};
pub use analysis::analyze_quote;
pub use comparison::{SampleSummary, classify, compare};
pub use market::{SampleScope, TierSample, build_tiers, calculate_market_rate};
pub use negotiation::advise;
pub use outlier::{Filtered, Strictness, filter};
pub use pairwise::{ConversionRatePair, infer};
pub use regression::{DepositRentFit, FitMethod, fit};
pub use trend::estimate_trend;

/// Format a currency amount with thousands separators: `1234567` → `"1,234,567"`.
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
