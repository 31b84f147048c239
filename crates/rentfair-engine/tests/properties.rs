//! Property tests for the rate-inference and comparison engine.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use rentfair_core::{
    ConfidenceLevel, ContractType, DataSource, EngineConfig, FairnessTier, Transaction, UserQuote,
};
use rentfair_engine::{
    SampleSummary, Strictness, TierSample, calculate_market_rate, classify, compare, filter, fit,
    infer,
};

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
}

fn lease(deposit: u64, monthly_rent: u64, age_days: i64) -> Transaction {
    Transaction {
        deposit,
        monthly_rent,
        date: as_of() - Duration::days(age_days),
        exclusive_area: 84.0,
        building_name: "Prop Heights".into(),
        neighborhood: "Test-dong".into(),
        contract_type: ContractType::Unknown,
    }
}

fn arb_lease() -> impl Strategy<Value = Transaction> {
    (
        (0u64..500).prop_map(|d| d * 1_000_000),
        (0u64..300).prop_map(|r| r * 10_000),
        0i64..365,
    )
        .prop_map(|(d, r, age)| lease(d, r, age))
}

fn arb_sample(max: usize) -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec(arb_lease(), 0..max)
}

fn district(transactions: Vec<Transaction>) -> Vec<TierSample> {
    vec![TierSample {
        source: DataSource::District,
        transactions,
    }]
}

proptest! {
    #[test]
    fn prop_pair_rates_stay_in_band(sample in arb_sample(40)) {
        for pair in infer(&sample, as_of()) {
            prop_assert!((0.0..=15.0).contains(&pair.implied_annual_rate));
            prop_assert!(pair.recency_weight > 0.0 && pair.recency_weight <= 1.0);
        }
    }

    #[test]
    fn prop_percentiles_bracket_median(sample in arb_sample(40)) {
        let result = calculate_market_rate(&district(sample), &EngineConfig::default(), as_of());
        if let (Some(p25), Some(rate), Some(p75)) =
            (result.rate_p25, result.market_rate, result.rate_p75)
        {
            prop_assert!(p25 <= rate);
            prop_assert!(rate <= p75);
        }
    }

    #[test]
    fn prop_filter_partitions_input(sample in arb_sample(40), building in any::<bool>()) {
        let strictness = if building { Strictness::Building } else { Strictness::Fallback };
        let out = filter(&sample, strictness);
        prop_assert_eq!(out.clean.len() + out.removed.len(), sample.len());
        if sample.len() < 4 {
            prop_assert!(out.removed.is_empty());
        }
    }

    #[test]
    fn prop_intact_sample_stays_intact(sample in arb_sample(40), building in any::<bool>()) {
        let strictness = if building { Strictness::Building } else { Strictness::Fallback };
        let first = filter(&sample, strictness);
        prop_assume!(first.removed.is_empty());
        let second = filter(&first.clean, strictness);
        prop_assert!(second.removed.is_empty());
        prop_assert_eq!(second.clean, sample);
    }

    #[test]
    fn prop_decreasing_rent_gives_negative_slope(
        steps in prop::collection::vec((1_000_001u64..20_000_000, 1u64..50_000), 2..15),
    ) {
        let mut deposit = 5_000_000u64;
        let mut rent = 2_000_000u64;
        let mut sample = vec![lease(deposit, rent, 0)];
        for (dd, dr) in steps {
            deposit += dd;
            rent -= dr;
            sample.push(lease(deposit, rent, 0));
        }
        prop_assert!(fit(&sample).slope < 0.0);
    }

    #[test]
    fn prop_prediction_never_negative(sample in arb_sample(30), deposit in 0u64..2_000_000_000) {
        let predicted = fit(&sample).predict(deposit);
        if sample.iter().any(|t| !t.is_jeonse()) {
            prop_assert!(predicted.is_some_and(|rent| rent >= 0.0));
        } else {
            prop_assert_eq!(predicted, None);
        }
    }

    #[test]
    fn prop_insufficient_is_deterministic(sample in arb_sample(5)) {
        let config = EngineConfig::default();
        let first = calculate_market_rate(&district(sample.clone()), &config, as_of());
        let second = calculate_market_rate(&district(sample), &config, as_of());
        prop_assert_eq!(first.confidence_level, ConfidenceLevel::Insufficient);
        prop_assert_eq!(first.market_rate, Some(first.legal_rate_cap));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_overpriced_tiers_clear_both_axes(
        expected in 100_000u64..5_000_000,
        actual in 0u64..10_000_000,
    ) {
        let quote = UserQuote { deposit: 10_000_000, monthly_rent: actual };
        let c = compare(&quote, expected as f64, &SampleSummary::default());
        match classify(&c) {
            FairnessTier::SeverelyOverpriced => {
                prop_assert!(c.rent_difference_percent > 15.0 && c.rent_difference > 200_000);
            }
            FairnessTier::Overpriced => {
                prop_assert!(c.rent_difference_percent > 5.0 && c.rent_difference > 100_000);
            }
            FairnessTier::GoodDeal => {
                prop_assert!(c.rent_difference_percent <= -10.0 || c.rent_difference <= -150_000);
            }
            FairnessTier::Fair => {}
        }
    }
}

#[test]
fn identical_insufficient_calls_agree() {
    let sample = vec![lease(10_000_000, 900_000, 10), lease(50_000_000, 700_000, 40)];
    let config = EngineConfig {
        bok_base_rate: 3.5,
        ..Default::default()
    };
    let a = calculate_market_rate(&district(sample.clone()), &config, as_of());
    let b = calculate_market_rate(&district(sample), &config, as_of());
    assert_eq!(a.confidence_level, ConfidenceLevel::Insufficient);
    assert_eq!(a.market_rate, Some(5.5));
    assert_eq!(a, b);
}
