//! Tenant quote and the records produced when evaluating it.

use serde::{Deserialize, Serialize};

use crate::MarketRateResult;

/// The deposit/rent combination a tenant has been offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserQuote {
    pub deposit: u64,
    pub monthly_rent: u64,
}

/// Tenant's rent set against the rent the market predicts for their deposit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRentComparison {
    /// False when the sample had no lease to price against; the expected rent
    /// and difference are then 0 and carry no meaning.
    pub has_market_data: bool,
    pub expected_rent: i64,
    pub actual_rent: i64,
    /// `actual_rent - expected_rent`.
    pub rent_difference: i64,
    /// Difference relative to the expected rent; 0 when the expected rent is not positive.
    pub rent_difference_percent: f64,
    pub mean_deposit: f64,
    pub mean_rent: f64,
    pub clean_transaction_count: usize,
    pub outliers_removed: usize,
}

/// Qualitative fairness verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FairnessTier {
    GoodDeal,
    Fair,
    Overpriced,
    SeverelyOverpriced,
}

impl FairnessTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoodDeal => "GOOD_DEAL",
            Self::Fair => "FAIR",
            Self::Overpriced => "OVERPRICED",
            Self::SeverelyOverpriced => "SEVERELY_OVERPRICED",
        }
    }

    pub fn is_overpriced(&self) -> bool {
        matches!(self, Self::Overpriced | Self::SeverelyOverpriced)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub tier: FairnessTier,
    pub details: String,
}

/// Money a tenant could recover, monthly and per year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsPotential {
    pub vs_market_monthly: i64,
    pub vs_market_yearly: i64,
    pub vs_legal_monthly: i64,
    pub vs_legal_yearly: i64,
}

/// One negotiation strategy offered to the tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationOption {
    pub name: String,
    pub target_deposit: i64,
    pub target_rent: i64,
    pub monthly_savings: i64,
    pub yearly_savings: i64,
    pub script: String,
    pub recommended: bool,
}

/// Full answer to "is this quote fair?".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteAnalysis {
    pub market: MarketRateResult,
    pub comparison: UserRentComparison,
    pub assessment: Assessment,
    pub savings_potential: SavingsPotential,
    pub trend_advice: String,
    pub negotiation_options: Vec<NegotiationOption>,
}
