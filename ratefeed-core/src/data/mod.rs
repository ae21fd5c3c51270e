//! Fetching, transforming and writing exchange-rate history

pub mod pipeline;
pub mod provider;
pub mod transform;
pub mod writer;
pub mod yahoo;

pub use pipeline::{
    fetch_records, resolve_currency, run_feed, CurrencyOutcome, Resolution, RunSummary,
};
pub use provider::{FetchError, RateSource};
pub use transform::{parse_csv, select_price};
pub use writer::{JsonWriter, WriteError};
pub use yahoo::YahooCsvSource;
