//! Feed orchestrator — per-currency fetch → transform → (fallback) → write.

use super::provider::RateSource;
use super::transform::parse_csv;
use super::writer::{JsonWriter, WriteError};
use crate::domain::{CurrencyEntry, PriceRecord, TimeWindow};
use log::{error, info, warn};
use std::path::PathBuf;

/// Records obtained for one currency, and which symbol produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub symbol: String,
    pub records: Vec<PriceRecord>,
    pub used_fallback: bool,
}

/// Fetch and transform a single symbol. A failed fetch counts as no records.
pub fn fetch_records(
    source: &dyn RateSource,
    symbol: &str,
    window: &TimeWindow,
) -> Vec<PriceRecord> {
    match source.fetch(symbol, window) {
        Ok(body) => parse_csv(&body),
        Err(e) => {
            warn!("Error fetching {symbol}: {e}");
            Vec::new()
        }
    }
}

/// Resolve a currency's series: primary symbol first, then the alternate
/// symbol from `fallback_template` only if the primary yielded nothing.
pub fn resolve_currency(
    source: &dyn RateSource,
    entry: &CurrencyEntry,
    fallback_template: &str,
    window: &TimeWindow,
) -> Resolution {
    let records = fetch_records(source, &entry.symbol, window);
    if !records.is_empty() {
        return Resolution {
            symbol: entry.symbol.clone(),
            records,
            used_fallback: false,
        };
    }

    let alternate = entry.fallback_symbol(fallback_template);
    warn!(
        "No data found for {}. Trying alternative symbol {alternate}",
        entry.code
    );
    let records = fetch_records(source, &alternate, window);
    Resolution {
        symbol: alternate,
        records,
        used_fallback: true,
    }
}

/// What happened to one currency during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum CurrencyOutcome {
    Written {
        code: String,
        symbol: String,
        records: usize,
        path: PathBuf,
        used_fallback: bool,
    },
    Failed {
        code: String,
        attempted: Vec<String>,
    },
}

impl CurrencyOutcome {
    pub fn code(&self) -> &str {
        match self {
            CurrencyOutcome::Written { code, .. } | CurrencyOutcome::Failed { code, .. } => code,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, CurrencyOutcome::Written { .. })
    }
}

/// Summary of a full feed run, in table order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<CurrencyOutcome>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_written()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    pub fn failed_codes(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_written())
            .map(|o| o.code())
            .collect()
    }
}

/// Run every currency in order. A currency with no data is recorded as
/// failed and skipped; a write error aborts the run.
pub fn run_feed(
    source: &dyn RateSource,
    writer: &JsonWriter,
    currencies: &[CurrencyEntry],
    fallback_template: &str,
    window: &TimeWindow,
) -> Result<RunSummary, WriteError> {
    let mut summary = RunSummary::default();
    let source_name = source.name();

    for entry in currencies {
        info!(
            "Processing {} ({}) via {source_name}",
            entry.code, entry.symbol
        );

        let resolution = resolve_currency(source, entry, fallback_template, window);

        if resolution.records.is_empty() {
            error!("Failed to get data for {}", entry.code);
            let mut attempted = vec![entry.symbol.clone()];
            if resolution.used_fallback {
                attempted.push(resolution.symbol);
            }
            summary.outcomes.push(CurrencyOutcome::Failed {
                code: entry.code.clone(),
                attempted,
            });
            continue;
        }

        let path = writer.write(&entry.code, &resolution.records)?;
        summary.outcomes.push(CurrencyOutcome::Written {
            code: entry.code.clone(),
            symbol: resolution.symbol,
            records: resolution.records.len(),
            path,
            used_fallback: resolution.used_fallback,
        });
    }

    info!(
        "Feed complete: {}/{} currencies written, {} failed",
        summary.succeeded(),
        summary.total(),
        summary.failed()
    );

    Ok(summary)
}
