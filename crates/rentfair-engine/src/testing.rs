//! Fixtures for unit tests.

use chrono::{Duration, NaiveDate};
use rentfair_core::{ContractType, Transaction};

pub fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
}

/// A lease in "Hangang Tower" signed `age_days` before [`as_of`].
pub fn lease(deposit: u64, monthly_rent: u64, age_days: i64) -> Transaction {
    Transaction {
        deposit,
        monthly_rent,
        date: as_of() - Duration::days(age_days),
        exclusive_area: 59.9,
        building_name: "Hangang Tower".into(),
        neighborhood: "Mangwon-dong".into(),
        contract_type: ContractType::New,
    }
}
