//! Ratefeed Core — exchange-rate history feed.
//!
//! Downloads daily currency history as CSV, reduces each row to a
//! `{date, price}` record, and writes one JSON series per currency:
//! - Configuration (currency table, fallback rule, window, output)
//! - Rate sources behind a trait (Yahoo CSV download in production)
//! - Best-effort CSV transform preferring adjusted close
//! - Per-currency orchestration with a single alternate-symbol fallback
//! - Pretty-printed JSON writer

pub mod config;
pub mod data;
pub mod domain;

pub use config::{ConfigError, FeedConfig};
