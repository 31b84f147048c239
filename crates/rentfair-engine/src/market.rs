//! Market-rate pipeline over an already-fetched district sample.
//!
//! 1. Narrow the district records to the area band, then derive building and
//!    neighborhood subsets.
//! 2. Take the first tier (building → dong → district) with enough records.
//! 3. Filter outliers, infer pairwise rates, aggregate, and fit a trend.
//!
//! No tier sufficient → `INSUFFICIENT` with the legal cap as the rate.

use chrono::NaiveDate;
use rentfair_core::{
    AreaBand, ConfidenceLevel, DataSource, EngineConfig, MarketRateResult, RateDiagnostics,
    TierCount, Transaction, Trend, names_match,
};
use tracing::{debug, info};

use crate::aggregate::aggregate;
use crate::outlier::{self, Strictness};
use crate::pairwise::{self, ConversionRatePair};
use crate::trend::{self, MIN_TREND_POINTS};

/// Pairs needed, from a building sample, for `HIGH` confidence.
pub const HIGH_CONFIDENCE_PAIRS: usize = 20;
/// Pairs needed for `MEDIUM` confidence.
pub const MEDIUM_CONFIDENCE_PAIRS: usize = 5;

/// Which unit the tenant is asking about.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleScope {
    pub building_name: String,
    pub neighborhood: String,
    pub exclusive_area: f64,
}

/// Records available at one geographic tier.
#[derive(Debug, Clone, PartialEq)]
pub struct TierSample {
    pub source: DataSource,
    pub transactions: Vec<Transaction>,
}

/// Split district records into building, dong and district tiers (in that order).
pub fn build_tiers(
    records: &[Transaction],
    scope: &SampleScope,
    area_tolerance: f64,
) -> Vec<TierSample> {
    let band = AreaBand::around(scope.exclusive_area, area_tolerance);
    let district: Vec<Transaction> = records
        .iter()
        .filter(|t| band.contains(t.exclusive_area))
        .cloned()
        .collect();

    let building = district
        .iter()
        .filter(|t| names_match(&t.building_name, &scope.building_name))
        .cloned()
        .collect();
    let dong = district
        .iter()
        .filter(|t| names_match(&t.neighborhood, &scope.neighborhood))
        .cloned()
        .collect();

    vec![
        TierSample {
            source: DataSource::Building,
            transactions: building,
        },
        TierSample {
            source: DataSource::Dong,
            transactions: dong,
        },
        TierSample {
            source: DataSource::District,
            transactions: district,
        },
    ]
}

fn confidence_for(pair_count: usize, source: DataSource) -> ConfidenceLevel {
    if pair_count >= HIGH_CONFIDENCE_PAIRS && source.is_building() {
        ConfidenceLevel::High
    } else if pair_count >= MEDIUM_CONFIDENCE_PAIRS {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

/// Infer the market conversion rate from tiered samples.
pub fn calculate_market_rate(
    tiers: &[TierSample],
    config: &EngineConfig,
    as_of: NaiveDate,
) -> MarketRateResult {
    let legal_rate_cap = config.legal_rate_cap();
    let tier_counts: Vec<TierCount> = tiers
        .iter()
        .map(|t| TierCount {
            source: t.source,
            count: t.transactions.len(),
        })
        .collect();

    let chosen = DataSource::FALLBACK_ORDER.iter().find_map(|source| {
        tiers
            .iter()
            .find(|t| t.source == *source && t.transactions.len() >= config.min_transactions)
    });

    let Some(tier) = chosen else {
        return insufficient(tiers, legal_rate_cap, tier_counts);
    };
    info!(
        source = tier.source.as_str(),
        count = tier.transactions.len(),
        "selected sample tier"
    );

    let filtered = outlier::filter(&tier.transactions, Strictness::for_source(tier.source));
    let pairs = pairwise::infer(&filtered.clean, as_of);

    let mut diagnostics = RateDiagnostics {
        pair_count: pairs.len(),
        tier_counts,
        ..Default::default()
    };

    let (market_rate, rate_p25, rate_p75, confidence_level) = match aggregate(&pairs) {
        Some(summary) => {
            diagnostics.weighted_mean = Some(summary.weighted_mean);
            (
                Some(summary.median),
                Some(summary.p25),
                Some(summary.p75),
                confidence_for(pairs.len(), tier.source),
            )
        }
        None => match pairwise::baseline_rate(&filtered.clean) {
            Some(rate) => {
                debug!(rate, "no valid pairs, using baseline rate");
                diagnostics.baseline_used = true;
                (Some(rate), Some(rate), Some(rate), ConfidenceLevel::Low)
            }
            None => {
                debug!("no valid pairs and no baseline rate");
                (None, None, None, ConfidenceLevel::Low)
            }
        },
    };

    let trend = market_trend(
        &pairs,
        &filtered.clean,
        as_of,
        market_rate.unwrap_or(legal_rate_cap),
        &mut diagnostics,
    );

    MarketRateResult {
        market_rate,
        rate_p25,
        rate_p75,
        confidence_level,
        data_source: tier.source,
        trend,
        legal_rate_cap,
        outliers_removed: filtered.removed.len(),
        transactions: filtered.clean,
        diagnostics,
    }
}

fn market_trend(
    pairs: &[ConversionRatePair],
    clean: &[Transaction],
    as_of: NaiveDate,
    rate: f64,
    diagnostics: &mut RateDiagnostics,
) -> Trend {
    if pairs.len() >= MIN_TREND_POINTS {
        trend::estimate_trend(pairs)
    } else if clean.len() >= MIN_TREND_POINTS {
        diagnostics.cost_trend_used = true;
        trend::estimate_cost_trend(clean, as_of, rate)
    } else {
        Trend::stable()
    }
}

/// Result when no tier has enough records.
///
/// The broadest tier is still cleaned and returned so a quote can be
/// regressed against whatever data exists.
fn insufficient(
    tiers: &[TierSample],
    legal_rate_cap: f64,
    tier_counts: Vec<TierCount>,
) -> MarketRateResult {
    info!(cap = legal_rate_cap, "insufficient data at every tier, using legal cap");
    let broadest = tiers.iter().rev().find(|t| !t.transactions.is_empty());
    let (data_source, filtered) = match broadest {
        Some(t) => (t.source, outlier::filter(&t.transactions, Strictness::Fallback)),
        None => (DataSource::District, outlier::Filtered::default()),
    };

    MarketRateResult {
        market_rate: Some(legal_rate_cap),
        rate_p25: Some(legal_rate_cap),
        rate_p75: Some(legal_rate_cap),
        confidence_level: ConfidenceLevel::Insufficient,
        data_source,
        trend: Trend::stable(),
        legal_rate_cap,
        outliers_removed: filtered.removed.len(),
        transactions: filtered.clean,
        diagnostics: RateDiagnostics {
            tier_counts,
            ..Default::default()
        },
    }
}
