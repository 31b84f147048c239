pub mod config;
pub mod market;
pub mod matching;
pub mod quote;
pub mod transaction;

pub use config::{ConfigError, EngineConfig};
pub use market::{
    ConfidenceLevel, DataSource, MarketRateResult, RateDiagnostics, TierCount, Trend,
    TrendDirection,
};
pub use matching::{AreaBand, names_match, normalize_name};
pub use quote::{
    Assessment, FairnessTier, NegotiationOption, QuoteAnalysis, SavingsPotential, UserQuote,
    UserRentComparison,
};
pub use transaction::{ContractType, Transaction, age_days};
