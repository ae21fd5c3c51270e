//! Feed configuration — the currency table, fallback rule, window and output.
//!
//! Defaults reproduce the built-in feed (NGN, KES, ETB over five years into
//! `../public/data`). A TOML file may override any subset of keys.

use crate::data::yahoo::{DEFAULT_URL_TEMPLATE, DEFAULT_USER_AGENT};
use crate::domain::currency::CODE_PLACEHOLDER;
use crate::domain::{CurrencyEntry, TimeWindow};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_FALLBACK_TEMPLATE: &str = "USD{code}=X";
pub const DEFAULT_WINDOW_YEARS: u32 = 5;
pub const MAX_WINDOW_YEARS: u32 = 100;
pub const DEFAULT_OUTPUT_DIR: &str = "../public/data";

/// Placeholders every `url_template` must carry.
const URL_PLACEHOLDERS: [&str; 3] = ["{symbol}", "{start}", "{end}"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Complete configuration for one feed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Template for the alternate symbol; `{code}` is replaced by the currency code.
    pub fallback_template: String,
    pub window_years: u32,
    pub output_dir: PathBuf,
    pub url_template: String,
    pub user_agent: String,
    /// Request timeout. Absent means the HTTP client's default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Currencies in processing order.
    pub currencies: Vec<CurrencyEntry>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            fallback_template: DEFAULT_FALLBACK_TEMPLATE.into(),
            window_years: DEFAULT_WINDOW_YEARS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            url_template: DEFAULT_URL_TEMPLATE.into(),
            user_agent: DEFAULT_USER_AGENT.into(),
            timeout_secs: None,
            currencies: default_currencies(),
        }
    }
}

/// The built-in currency table.
pub fn default_currencies() -> Vec<CurrencyEntry> {
    vec![
        CurrencyEntry::new("NGN", "NGN=X"),
        CurrencyEntry::new("KES", "KES=X"),
        CurrencyEntry::new("ETB", "ETB=X"),
    ]
}

impl FeedConfig {
    /// Load a config from a TOML file. Missing keys take defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string and validate it.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject configurations the pipeline cannot run meaningfully.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.currencies.is_empty() {
            return Err(ConfigError::Invalid("currency table is empty".into()));
        }

        let mut seen = HashSet::new();
        for entry in &self.currencies {
            if entry.code.trim().is_empty() || entry.symbol.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "blank code or symbol in entry {entry:?}"
                )));
            }
            if !seen.insert(entry.code.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate currency code '{}'",
                    entry.code
                )));
            }
        }

        if !self.fallback_template.contains(CODE_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "fallback_template '{}' must contain {CODE_PLACEHOLDER}",
                self.fallback_template
            )));
        }

        for placeholder in URL_PLACEHOLDERS {
            if !self.url_template.contains(placeholder) {
                return Err(ConfigError::Invalid(format!(
                    "url_template must contain {placeholder}"
                )));
            }
        }

        if self.window_years == 0 || self.window_years > MAX_WINDOW_YEARS {
            return Err(ConfigError::Invalid(format!(
                "window_years must be between 1 and {MAX_WINDOW_YEARS}, got {}",
                self.window_years
            )));
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid("user_agent must not be empty".into()));
        }

        Ok(())
    }

    /// The request window for this run, ending now.
    pub fn window(&self) -> Result<TimeWindow, ConfigError> {
        TimeWindow::last_years(self.window_years).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "window of {} years is out of range",
                self.window_years
            ))
        })
    }
}
