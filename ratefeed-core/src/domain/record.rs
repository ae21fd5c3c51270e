//! PriceRecord — the normalized output unit.

use serde::{Deserialize, Serialize};

/// One daily observation in a currency's output series.
///
/// `price` is always finite. Rows whose price is missing, a sentinel, or
/// unparsable never become a `PriceRecord`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: String,
    pub price: f64,
}

impl PriceRecord {
    pub fn new(date: impl Into<String>, price: f64) -> Self {
        Self {
            date: date.into(),
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_date_and_price_keys() {
        let rec = PriceRecord::new("2020-01-01", 1.5);
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(json, r#"{"date":"2020-01-01","price":1.5}"#);
    }

    #[test]
    fn whole_prices_keep_a_decimal_point() {
        let rec = PriceRecord::new("2020-01-02", 1.0);
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains(r#""price":1.0"#), "got {json}");
    }
}
