//! Market-rate result records shared between the engine, service and CLI.

use serde::{Deserialize, Serialize};

use crate::Transaction;

/// How much trust the inferred market rate deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
    /// Fewer than the minimum transactions at every tier; the legal cap stands in.
    Insufficient,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Insufficient => "INSUFFICIENT",
        }
    }
}

/// Geographic tier the sample was drawn from, narrowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Building,
    Dong,
    District,
}

impl DataSource {
    /// Fallback order used when choosing a sample.
    pub const FALLBACK_ORDER: [DataSource; 3] = [Self::Building, Self::Dong, Self::District];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Building => "building",
            Self::Dong => "dong",
            Self::District => "district",
        }
    }

    /// Building-level samples are assumed homogeneous.
    pub fn is_building(&self) -> bool {
        matches!(self, Self::Building)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendDirection {
    Rising,
    Stable,
    Declining,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rising => "RISING",
            Self::Stable => "STABLE",
            Self::Declining => "DECLINING",
        }
    }
}

/// Time trend of the conversion rate (or of per-lease cost).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Magnitude of the fitted change between the oldest and newest point, in percent.
    pub percentage: f64,
    pub r_squared: f64,
}

impl Trend {
    pub const fn stable() -> Self {
        Self {
            direction: TrendDirection::Stable,
            percentage: 0.0,
            r_squared: 0.0,
        }
    }

    /// A declining trend large enough to argue for a lower rent.
    pub fn is_meaningful_decline(&self) -> bool {
        self.direction == TrendDirection::Declining && self.percentage > 5.0
    }
}

impl Default for Trend {
    fn default() -> Self {
        Self::stable()
    }
}

/// Raw record count observed at one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCount {
    pub source: DataSource,
    pub count: usize,
}

/// Trace data describing how a market rate was reached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateDiagnostics {
    pub pair_count: usize,
    /// Recency-weighted mean of the pairwise rates; informational only.
    pub weighted_mean: Option<f64>,
    /// Two-point rate from the extreme deposits was used instead of pairs.
    pub baseline_used: bool,
    /// Trend was fitted over per-lease cost because too few pairs existed.
    pub cost_trend_used: bool,
    pub months_requested: usize,
    pub months_fetched: usize,
    pub tier_counts: Vec<TierCount>,
}

/// Output of the market-rate pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRateResult {
    /// Annual conversion rate of record (the median), in percent.
    /// `None` when no pair and no baseline could be formed.
    pub market_rate: Option<f64>,
    pub rate_p25: Option<f64>,
    pub rate_p75: Option<f64>,
    pub confidence_level: ConfidenceLevel,
    pub data_source: DataSource,
    pub trend: Trend,
    pub legal_rate_cap: f64,
    pub transactions: Vec<Transaction>,
    pub outliers_removed: usize,
    pub diagnostics: RateDiagnostics,
}

impl MarketRateResult {
    /// Market rate, or the legal cap when none could be inferred.
    pub fn effective_rate(&self) -> f64 {
        self.market_rate.unwrap_or(self.legal_rate_cap)
    }

    pub fn is_insufficient(&self) -> bool {
        self.confidence_level == ConfidenceLevel::Insufficient
    }

    /// What [`Self::trend`] measures, for use in sentences.
    pub fn trend_subject(&self) -> &'static str {
        if self.diagnostics.cost_trend_used {
            "Annual lease costs"
        } else {
            "Conversion rates"
        }
    }
}
