//! IQR outlier rejection with Tukey-style fences.
//!
//! Quartiles are taken by rank index (no interpolation), independently for
//! deposit and for monthly rent. A lease is dropped when either amount falls
//! outside `[Q1 - k·IQR, Q3 + k·IQR]`.

use rentfair_core::{DataSource, Transaction};
use tracing::debug;

use crate::stats::{rank_percentile, sorted};

/// Below this many leases the sample is returned untouched.
pub const MIN_FILTER_SAMPLE: usize = 4;

/// Fence width for the sample's geographic tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Single-building sample: `k = 1.5`.
    Building,
    /// Neighborhood or district fallback sample: `k = 1.0`.
    Fallback,
}

impl Strictness {
    pub fn for_source(source: DataSource) -> Self {
        if source.is_building() {
            Self::Building
        } else {
            Self::Fallback
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Building => 1.5,
            Self::Fallback => 1.0,
        }
    }
}

/// Result of a filter pass. Both halves keep input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filtered {
    pub clean: Vec<Transaction>,
    pub removed: Vec<Transaction>,
}

/// Inclusive acceptance range for one amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fences {
    pub lower: f64,
    pub upper: f64,
}

impl Fences {
    /// Fences from unsorted values; `None` when the slice is empty.
    pub fn from_values(values: &[f64], multiplier: f64) -> Option<Self> {
        let sorted = sorted(values);
        let q1 = rank_percentile(&sorted, 25.0)?;
        let q3 = rank_percentile(&sorted, 75.0)?;
        let iqr = q3 - q1;
        Some(Self {
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        })
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Split `transactions` into the clean sample and the rejected outliers.
pub fn filter(transactions: &[Transaction], strictness: Strictness) -> Filtered {
    if transactions.len() < MIN_FILTER_SAMPLE {
        return Filtered {
            clean: transactions.to_vec(),
            removed: Vec::new(),
        };
    }

    let k = strictness.multiplier();
    let deposits: Vec<f64> = transactions.iter().map(|t| t.deposit as f64).collect();
    let rents: Vec<f64> = transactions.iter().map(|t| t.monthly_rent as f64).collect();

    let (Some(deposit_fences), Some(rent_fences)) = (
        Fences::from_values(&deposits, k),
        Fences::from_values(&rents, k),
    ) else {
        return Filtered::default();
    };

    let (clean, removed): (Vec<Transaction>, Vec<Transaction>) =
        transactions.iter().cloned().partition(|t| {
            deposit_fences.contains(t.deposit as f64) && rent_fences.contains(t.monthly_rent as f64)
        });

    debug!(
        kept = clean.len(),
        removed = removed.len(),
        k,
        "outlier filter applied"
    );
    Filtered { clean, removed }
}
