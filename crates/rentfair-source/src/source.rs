//! The transaction source contract.

use std::fmt;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use rentfair_core::Transaction;
use serde::{Deserialize, Serialize};

use crate::SourceError;

/// District a fetch is scoped to. Sources report leases per district and month.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub city: String,
    pub district: String,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.city, self.district)
    }
}

/// A calendar month, displayed as `YYYYMM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The `count` months ending with the month of `as_of`, newest first.
    pub fn window(as_of: NaiveDate, count: usize) -> Vec<Self> {
        let mut months = Vec::with_capacity(count);
        let mut current = Self::of(as_of);
        for _ in 0..count {
            months.push(current);
            current = current.previous();
        }
        months
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

/// Supplies raw lease records for one district and month.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn fetch_month(
        &self,
        region: &Region,
        month: YearMonth,
    ) -> Result<Vec<Transaction>, SourceError>;
}
