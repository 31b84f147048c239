//! Lease transaction records as delivered by the transaction source.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether a lease was freshly signed or renewed in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    New,
    Renewal,
    #[default]
    #[serde(other)]
    Unknown,
}

/// One recorded lease.
///
/// Amounts are in the smallest currency unit. `monthly_rent == 0` is a
/// deposit-only (jeonse) lease. Records are never mutated after fetch; the
/// engine only filters and aggregates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub deposit: u64,
    pub monthly_rent: u64,
    pub date: NaiveDate,
    /// Exclusive-use area in square metres.
    pub exclusive_area: f64,
    pub building_name: String,
    /// Neighborhood (dong) the building belongs to.
    #[serde(default)]
    pub neighborhood: String,
    #[serde(default)]
    pub contract_type: ContractType,
}

impl Transaction {
    /// True for a pure deposit-only lease.
    pub fn is_jeonse(&self) -> bool {
        self.monthly_rent == 0
    }

    /// Age of the lease in days relative to `as_of`.
    pub fn age_days(&self, as_of: NaiveDate) -> f64 {
        age_days(self.date, as_of)
    }
}

/// Days between `date` and `as_of`, floored at zero for future-dated records.
pub fn age_days(date: NaiveDate, as_of: NaiveDate) -> f64 {
    (as_of - date).num_days().max(0) as f64
}
