//! CSV → PriceRecord transform.
//!
//! Best-effort: rows that cannot yield a date and a finite price are dropped,
//! never emitted with a placeholder. The transform itself cannot fail.

use crate::domain::PriceRecord;
use log::debug;
use std::collections::HashMap;

pub const DATE_COLUMN: &str = "Date";
pub const ADJ_CLOSE_COLUMN: &str = "Adj Close";
pub const CLOSE_COLUMN: &str = "Close";

/// Placeholder the source writes for a missing price.
pub const NULL_SENTINEL: &str = "null";

/// Price columns in order of preference.
const PRICE_COLUMNS: [&str; 2] = [ADJ_CLOSE_COLUMN, CLOSE_COLUMN];

/// A data row keyed by header name.
pub type Row = HashMap<String, String>;

/// Pick the price for a row: adjusted close if usable, else close.
///
/// A column is usable when it is present, non-blank and not the sentinel.
/// The first usable column is parsed; a parse failure or non-finite value
/// yields `None` rather than falling through to the next column.
pub fn select_price(row: &Row) -> Option<f64> {
    let raw = PRICE_COLUMNS
        .iter()
        .filter_map(|col| row.get(*col))
        .map(|v| v.trim())
        .find(|v| !v.is_empty() && *v != NULL_SENTINEL)?;

    raw.parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Convert one row into a record, or `None` if it has no date or price.
pub fn row_to_record(row: &Row) -> Option<PriceRecord> {
    let date = row.get(DATE_COLUMN).map(|d| d.trim()).filter(|d| !d.is_empty())?;
    let price = select_price(row)?;
    Some(PriceRecord::new(date, price))
}

/// Parse raw CSV (with header row) into records, preserving row order.
pub fn parse_csv(raw: &str) -> Vec<PriceRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in reader.deserialize::<Row>() {
        match row.ok().as_ref().and_then(row_to_record) {
            Some(rec) => records.push(rec),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("skipped {skipped} row(s) without a usable date or price");
    }

    records
}
