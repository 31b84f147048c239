//! Service entry points: fetch a district's recent leases, then run the engine.
//!
//! [`RentAnalyzer`] owns a [`TransactionSource`] and an [`EngineConfig`]. Both
//! entry points are infallible; a source that yields nothing becomes an
//! `INSUFFICIENT` market result.

use chrono::NaiveDate;
use rentfair_core::{EngineConfig, MarketRateResult, QuoteAnalysis, UserQuote};
use rentfair_engine::{SampleScope, build_tiers};
use rentfair_source::{Region, TransactionSource, collect_months};
use tracing::{info, warn};

/// What to price: one unit type in one building, with its district context.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaseQuery {
    pub region: Region,
    pub scope: SampleScope,
    /// Overrides the configured look-back window when set.
    pub months_back: Option<u32>,
    pub as_of: NaiveDate,
}

impl LeaseQuery {
    pub fn new(
        city: impl Into<String>,
        district: impl Into<String>,
        neighborhood: impl Into<String>,
        building_name: impl Into<String>,
        exclusive_area: f64,
        as_of: NaiveDate,
    ) -> Self {
        Self {
            region: Region {
                city: city.into(),
                district: district.into(),
            },
            scope: SampleScope {
                building_name: building_name.into(),
                neighborhood: neighborhood.into(),
                exclusive_area,
            },
            months_back: None,
            as_of,
        }
    }

    pub fn with_months_back(mut self, months_back: u32) -> Self {
        self.months_back = Some(months_back);
        self
    }
}

pub struct RentAnalyzer<S> {
    source: S,
    config: EngineConfig,
}

impl<S: TransactionSource> RentAnalyzer<S> {
    pub fn new(source: S, config: EngineConfig) -> Self {
        Self { source, config }
    }

    /// Infer the market conversion rate for `query`.
    pub async fn calculate_market_rate(&self, query: &LeaseQuery) -> MarketRateResult {
        let months_back = query.months_back.unwrap_or(self.config.months_back) as usize;

        let collection =
            match collect_months(&self.source, &query.region, query.as_of, months_back).await {
                Ok(collection) => collection,
                Err(e) => {
                    warn!(region = %query.region, error = %e, "no months fetched");
                    let mut result =
                        rentfair_engine::calculate_market_rate(&[], &self.config, query.as_of);
                    result.diagnostics.months_requested = months_back;
                    return result;
                }
            };

        let tiers = build_tiers(
            &collection.transactions,
            &query.scope,
            self.config.area_tolerance,
        );
        let mut result = rentfair_engine::calculate_market_rate(&tiers, &self.config, query.as_of);
        result.diagnostics.months_requested = collection.months_requested;
        result.diagnostics.months_fetched = collection.months_fetched;

        info!(
            region = %query.region,
            building = %query.scope.building_name,
            source = result.data_source.as_str(),
            confidence = result.confidence_level.as_str(),
            rate = result.effective_rate(),
            "market rate calculated"
        );
        result
    }

    /// Evaluate a tenant's quote against the market for `query`.
    pub async fn analyze_quote(&self, query: &LeaseQuery, quote: UserQuote) -> QuoteAnalysis {
        let market = self.calculate_market_rate(query).await;
        let analysis = rentfair_engine::analyze_quote(market, quote);
        info!(
            tier = analysis.assessment.tier.as_str(),
            expected_rent = analysis.comparison.expected_rent,
            actual_rent = analysis.comparison.actual_rent,
            "quote analysed"
        );
        analysis
    }
}
