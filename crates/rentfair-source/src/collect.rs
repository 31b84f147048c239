//! Sequential month-by-month collection with skip-on-failure.

use chrono::NaiveDate;
use rentfair_core::Transaction;
use tracing::{info, warn};

use crate::{Region, SourceError, TransactionSource, YearMonth};

/// Records gathered over a window of months.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyCollection {
    pub transactions: Vec<Transaction>,
    pub months_requested: usize,
    pub months_fetched: usize,
    /// Months whose fetch failed, with the error message.
    pub failures: Vec<(YearMonth, String)>,
}

/// Fetch the `months_back` months ending at `as_of`, one month at a time.
///
/// A failed month is logged and skipped. Fails with [`SourceError::NoData`]
/// only when no month succeeded.
pub async fn collect_months(
    source: &dyn TransactionSource,
    region: &Region,
    as_of: NaiveDate,
    months_back: usize,
) -> Result<MonthlyCollection, SourceError> {
    let months = YearMonth::window(as_of, months_back);
    let mut collection = MonthlyCollection {
        months_requested: months.len(),
        ..Default::default()
    };

    for month in months {
        match source.fetch_month(region, month).await {
            Ok(records) => {
                info!(%region, %month, count = records.len(), "fetched month");
                collection.months_fetched += 1;
                collection.transactions.extend(records);
            }
            Err(e) => {
                warn!(%region, %month, error = %e, "month fetch failed, skipping");
                collection.failures.push((month, e.to_string()));
            }
        }
    }

    if collection.months_fetched == 0 {
        return Err(SourceError::NoData {
            region: region.to_string(),
            requested: collection.months_requested,
        });
    }
    Ok(collection)
}
