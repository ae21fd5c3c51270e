//! Domain types for the rate feed

pub mod currency;
pub mod record;
pub mod window;

pub use currency::CurrencyEntry;
pub use record::PriceRecord;
pub use window::TimeWindow;
