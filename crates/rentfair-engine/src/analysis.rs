//! Quote analysis: regress, compare, classify, and advise.

use rentfair_core::{
    Assessment, MarketRateResult, QuoteAnalysis, SavingsPotential, TrendDirection, UserQuote,
    UserRentComparison,
};
use tracing::debug;

use crate::comparison::{self, SampleSummary};
use crate::negotiation;
use crate::regression;

/// Evaluate `quote` against a market result.
///
/// The deposit-rent line is fitted over the market's clean transactions; the
/// rent it predicts at the quoted deposit is the expected rent. With no lease
/// to fit, the quote is left unpriced: `FAIR`, no savings, non-price advice.
pub fn analyze_quote(market: MarketRateResult, quote: UserQuote) -> QuoteAnalysis {
    let fit = regression::fit(&market.transactions);
    let expected_rent = fit.predict(quote.deposit);
    debug!(
        method = ?fit.method,
        slope = fit.slope,
        ?expected_rent,
        "deposit-rent fit"
    );

    let summary = SampleSummary::from_transactions(&market.transactions, market.outliers_removed);
    let comparison = match expected_rent {
        Some(rent) => comparison::compare(&quote, rent, &summary),
        None => comparison::unpriced(&quote, &summary),
    };
    let tier = comparison::classify(&comparison);
    let assessment = Assessment {
        tier,
        details: comparison::describe(&comparison, tier),
    };

    let savings_potential = savings_potential(&quote, &comparison, market.legal_rate_cap);
    let trend_advice = trend_advice(&market);
    let negotiation_options = negotiation::advise(&quote, &comparison, &market);

    QuoteAnalysis {
        market,
        comparison,
        assessment,
        savings_potential,
        trend_advice,
        negotiation_options,
    }
}

/// Highest rent the legal cap allows at the quoted deposit, converting from
/// the sample's mean deposit and rent.
pub fn legal_rent(quote: &UserQuote, comparison: &UserRentComparison, legal_rate_cap: f64) -> f64 {
    let deposit_gap = comparison.mean_deposit - quote.deposit as f64;
    (comparison.mean_rent + deposit_gap * legal_rate_cap / 100.0 / 12.0).max(0.0)
}

pub fn savings_potential(
    quote: &UserQuote,
    comparison: &UserRentComparison,
    legal_rate_cap: f64,
) -> SavingsPotential {
    if !comparison.has_market_data {
        return SavingsPotential::default();
    }
    let vs_market = comparison.rent_difference.max(0);
    let legal = legal_rent(quote, comparison, legal_rate_cap).round() as i64;
    let vs_legal = (comparison.actual_rent - legal).max(0);
    SavingsPotential {
        vs_market_monthly: vs_market,
        vs_market_yearly: vs_market * 12,
        vs_legal_monthly: vs_legal,
        vs_legal_yearly: vs_legal * 12,
    }
}

pub fn trend_advice(market: &MarketRateResult) -> String {
    let trend = &market.trend;
    let subject = market.trend_subject();
    match trend.direction {
        TrendDirection::Rising => format!(
            "{subject} have risen about {:.1}% recently. Prices are moving up, so locking \
             in a lease soon is likely better than waiting.",
            trend.percentage
        ),
        TrendDirection::Declining => format!(
            "{subject} have fallen about {:.1}% recently. Waiting or pushing harder on \
             price is reasonable in a softening market.",
            trend.percentage
        ),
        TrendDirection::Stable => "The market has been stable. Standard negotiation around \
                                   the expected rent applies."
            .to_string(),
    }
}
