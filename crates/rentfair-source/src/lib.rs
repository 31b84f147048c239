//! Transaction sources: where monthly lease records come from.

mod collect;
mod error;
mod memory;
mod source;

#[cfg(feature = "http")]
pub mod http;

pub use collect::{MonthlyCollection, collect_months};
pub use error::SourceError;
pub use memory::MemorySource;
pub use source::{Region, TransactionSource, YearMonth};

#[cfg(feature = "http")]
pub use http::HttpSource;
