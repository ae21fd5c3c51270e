//! Yahoo Finance CSV download source.
//!
//! Fetches daily history from the v7 `finance/download` endpoint, which
//! returns `Date,Open,High,Low,Close,Adj Close,Volume` CSV. Yahoo rejects
//! requests without a browser-like User-Agent, so the client always sends one.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes. A non-2xx status is reported as-is; there is no retry here.

use super::provider::{FetchError, RateSource};
use crate::config::FeedConfig;
use crate::domain::TimeWindow;
use log::info;
use std::time::Duration;

/// Default download URL. `{symbol}`, `{start}` and `{end}` are substituted,
/// the latter two as epoch seconds.
pub const DEFAULT_URL_TEMPLATE: &str = "https://query1.finance.yahoo.com/v7/finance/download/{symbol}\
     ?period1={start}&period2={end}&interval=1d&events=history&includeAdjustedClose=true";

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Yahoo Finance CSV source.
pub struct YahooCsvSource {
    client: reqwest::blocking::Client,
    url_template: String,
}

impl YahooCsvSource {
    /// Build a source. `timeout` of `None` keeps the HTTP client's default.
    pub fn new(
        url_template: impl Into<String>,
        user_agent: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let mut builder = reqwest::blocking::Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            url_template: url_template.into(),
        })
    }

    pub fn from_config(config: &FeedConfig) -> Result<Self, FetchError> {
        Self::new(
            config.url_template.clone(),
            &config.user_agent,
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    /// Map a response status to success or `FetchError::Status`.
    fn check_status(symbol: &str, status: reqwest::StatusCode) -> Result<(), FetchError> {
        if status.is_success() {
            Ok(())
        } else {
            Err(FetchError::Status {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            })
        }
    }

    /// Build the download URL for a symbol and window.
    pub fn download_url(template: &str, symbol: &str, window: &TimeWindow) -> String {
        template
            .replace("{symbol}", symbol)
            .replace("{start}", &window.start_epoch().to_string())
            .replace("{end}", &window.end_epoch().to_string())
    }
}

impl RateSource for YahooCsvSource {
    fn name(&self) -> &str {
        "yahoo_finance_csv"
    }

    fn fetch(&self, symbol: &str, window: &TimeWindow) -> Result<String, FetchError> {
        let url = Self::download_url(&self.url_template, symbol, window);
        info!("Downloading {symbol} from {url}");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| FetchError::Transport {
                symbol: symbol.to_string(),
                message: e.to_string(),
            })?;

        Self::check_status(symbol, resp.status())?;

        resp.text().map_err(|e| FetchError::Body {
            symbol: symbol.to_string(),
            message: e.to_string(),
        })
    }
}
