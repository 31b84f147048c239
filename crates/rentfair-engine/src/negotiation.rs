//! Negotiation strategies derived from a comparison and the market trend.

use rentfair_core::{MarketRateResult, NegotiationOption, UserQuote, UserRentComparison};

use crate::format_amount;

/// Discount below the expected rent for the modest-ask option.
const DISCOUNT_RATIO: f64 = 0.95;
/// Discount below the expected rent when the market is softening.
const TREND_RATIO: f64 = 0.90;

fn option(
    name: &str,
    quote: &UserQuote,
    target_rent: i64,
    actual_rent: i64,
    script: String,
    recommended: bool,
) -> NegotiationOption {
    let monthly_savings = actual_rent - target_rent;
    NegotiationOption {
        name: name.to_string(),
        target_deposit: quote.deposit as i64,
        target_rent,
        monthly_savings,
        yearly_savings: monthly_savings * 12,
        script,
        recommended,
    }
}

/// Rank negotiation options by yearly savings, largest first.
///
/// A tenant already at or below the expected rent, or one whose quote could
/// not be priced, gets non-price strategies only. Otherwise a market-rate
/// option is always present, a 5%-below-market ask is added when it saves
/// more, and a 10%-below ask is added when the market shows a meaningful
/// decline.
pub fn advise(
    quote: &UserQuote,
    comparison: &UserRentComparison,
    market: &MarketRateResult,
) -> Vec<NegotiationOption> {
    let actual = comparison.actual_rent;
    let expected = comparison.expected_rent;

    if !comparison.has_market_data || actual <= expected {
        return non_price_options(quote, actual, comparison.has_market_data);
    }

    let mut options = Vec::with_capacity(3);

    let market_option = option(
        "Market Rate",
        quote,
        expected,
        actual,
        format!(
            "Comparable leases in this area with a {} deposit rent for about {} a month. \
             I'd like to sign at {}, in line with the market.",
            format_amount(quote.deposit as i64),
            format_amount(expected),
            format_amount(expected),
        ),
        actual > expected,
    );
    let market_savings = market_option.yearly_savings;
    options.push(market_option);

    let discount_target = (expected as f64 * DISCOUNT_RATIO).round() as i64;
    let discount = option(
        "Below-Market Ask",
        quote,
        discount_target,
        actual,
        format!(
            "Based on {} recent comparable leases the expected rent is {}. \
             If we can agree on {} a month I'm ready to sign quickly.",
            comparison.clean_transaction_count,
            format_amount(expected),
            format_amount(discount_target),
        ),
        false,
    );
    if discount.yearly_savings > market_savings {
        options.push(discount);
    }

    if market.trend.is_meaningful_decline() {
        let trend_target = (expected as f64 * TREND_RATIO).round() as i64;
        options.push(option(
            "Declining Market",
            quote,
            trend_target,
            actual,
            format!(
                "{} here have declined about {:.1}% over recent months, so rents are \
                 softening. I'd propose {} a month to reflect the declining trend.",
                market.trend_subject(),
                market.trend.percentage,
                format_amount(trend_target),
            ),
            false,
        ));
    }

    options.sort_by(|a, b| b.yearly_savings.cmp(&a.yearly_savings));
    options
}

/// Informational strategies that leave the price alone.
///
/// `priced` is false when no market comparison was possible.
fn non_price_options(quote: &UserQuote, actual: i64, priced: bool) -> Vec<NegotiationOption> {
    let lead = if priced {
        "The rent is already at or below market."
    } else {
        "There is no local data to argue the price with."
    };
    vec![
        option(
            "Lock In Lease Length",
            quote,
            actual,
            actual,
            format!(
                "{lead} Ask for a longer term or a renewal cap at the current rent to keep \
                 it there."
            ),
            true,
        ),
        option(
            "Repairs and Appliances",
            quote,
            actual,
            actual,
            "Since the price is fair, ask for repairs, repainting or appliance upgrades \
             to be completed before move-in."
                .to_string(),
            false,
        ),
        option(
            "Move-in Concessions",
            quote,
            actual,
            actual,
            "Request a flexible move-in date, help with moving costs, or a rent-free \
             first week instead of a lower price."
                .to_string(),
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::{SampleSummary, compare, unpriced};
    use rentfair_core::{ConfidenceLevel, DataSource, RateDiagnostics, Trend, TrendDirection};

    fn market(trend: Trend) -> MarketRateResult {
        MarketRateResult {
            market_rate: Some(5.0),
            rate_p25: Some(4.5),
            rate_p75: Some(5.5),
            confidence_level: ConfidenceLevel::Medium,
            data_source: DataSource::Building,
            trend,
            legal_rate_cap: 4.5,
            transactions: vec![],
            outliers_removed: 0,
            diagnostics: RateDiagnostics::default(),
        }
    }

    fn declining(percentage: f64) -> Trend {
        Trend {
            direction: TrendDirection::Declining,
            percentage,
            r_squared: 0.5,
        }
    }

    fn run(expected: f64, actual: u64, trend: Trend) -> Vec<NegotiationOption> {
        let quote = UserQuote {
            deposit: 20_000_000,
            monthly_rent: actual,
        };
        let c = compare(&quote, expected, &SampleSummary::default());
        advise(&quote, &c, &market(trend))
    }

    #[test]
    fn fair_tenant_gets_non_price_options() {
        let options = run(1_000_000.0, 1_000_000, Trend::stable());
        assert_eq!(options.len(), 3);
        assert!(options.iter().all(|o| o.monthly_savings == 0));
        assert_eq!(options.iter().filter(|o| o.recommended).count(), 1);
        assert_eq!(options[0].name, "Lock In Lease Length");
    }

    #[test]
    fn overpaying_tenant_gets_market_and_discount() {
        let options = run(1_000_000.0, 1_200_000, Trend::stable());
        let names: Vec<&str> = options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Below-Market Ask", "Market Rate"]);

        let market_opt = &options[1];
        assert_eq!(market_opt.target_rent, 1_000_000);
        assert_eq!(market_opt.monthly_savings, 200_000);
        assert_eq!(market_opt.yearly_savings, 2_400_000);
        assert!(market_opt.recommended);

        assert_eq!(options[0].target_rent, 950_000);
        assert_eq!(options[0].yearly_savings, 3_000_000);
        assert!(!options[0].recommended);
    }

    #[test]
    fn meaningful_decline_adds_aggressive_option() {
        let options = run(1_000_000.0, 1_200_000, declining(8.0));
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].name, "Declining Market");
        assert_eq!(options[0].target_rent, 900_000);
        assert!(options[0].script.contains("declined about 8.0%"));
    }

    #[test]
    fn declining_cost_trend_is_named_as_cost() {
        let quote = UserQuote {
            deposit: 20_000_000,
            monthly_rent: 1_200_000,
        };
        let c = compare(&quote, 1_000_000.0, &SampleSummary::default());
        let mut m = market(declining(8.0));
        m.diagnostics.cost_trend_used = true;
        let options = advise(&quote, &c, &m);
        let script = &options[0].script;
        assert!(script.starts_with("Annual lease costs here have declined"), "{script}");
    }

    #[test]
    fn unpriced_quote_gets_non_price_options() {
        let quote = UserQuote {
            deposit: 20_000_000,
            monthly_rent: 1_000_000,
        };
        let c = unpriced(&quote, &SampleSummary::default());
        let options = advise(&quote, &c, &market(declining(12.0)));
        assert_eq!(options.len(), 3);
        assert!(options.iter().all(|o| o.monthly_savings == 0));
        assert!(options.iter().all(|o| o.target_rent == 1_000_000));
        assert!(options[0].recommended);
        assert!(options[0].script.starts_with("There is no local data"));
    }

    #[test]
    fn weak_decline_adds_nothing() {
        let options = run(1_000_000.0, 1_200_000, declining(5.0));
        assert!(options.iter().all(|o| o.name != "Declining Market"));
    }

    #[test]
    fn sorted_by_yearly_savings() {
        let options = run(1_500_000.0, 1_800_000, declining(12.0));
        for w in options.windows(2) {
            assert!(w[0].yearly_savings >= w[1].yearly_savings);
        }
    }

    #[test]
    fn target_deposit_is_unchanged() {
        let options = run(1_000_000.0, 1_200_000, Trend::stable());
        assert!(options.iter().all(|o| o.target_deposit == 20_000_000));
    }
}
