//! Integration tests for the full feed: scripted source → transform → JSON files.

use chrono::{TimeZone, Utc};
use ratefeed_core::data::{run_feed, CurrencyOutcome, FetchError, JsonWriter, RateSource};
use ratefeed_core::domain::{CurrencyEntry, PriceRecord, TimeWindow};
use ratefeed_core::FeedConfig;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

const HEADER_ONLY: &str = "Date,Open,High,Low,Close,Adj Close,Volume\n";

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

fn window() -> TimeWindow {
    TimeWindow::ending_at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(), 5).unwrap()
}

/// Scripted source: fixed bodies per symbol, 404 for anything else.
struct ScriptedSource {
    bodies: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedSource {
    fn new(bodies: Vec<(&str, String)>) -> Self {
        Self {
            bodies: bodies
                .into_iter()
                .map(|(s, b)| (s.to_string(), b))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl RateSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    fn fetch(&self, symbol: &str, _window: &TimeWindow) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(symbol.to_string());
        self.bodies
            .get(symbol)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                symbol: symbol.to_string(),
                status: 404,
            })
    }
}

fn read_series(path: &std::path::Path) -> Vec<PriceRecord> {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn fixture_series_is_written_with_nulls_dropped() {
    let tmp = tempfile::tempdir().unwrap();
    let writer = JsonWriter::create(tmp.path().join("data")).unwrap();
    let source = ScriptedSource::new(vec![("NGN=X", fixture("ngn_2023_q1.csv"))]);
    let table = vec![CurrencyEntry::new("NGN", "NGN=X")];

    let summary = run_feed(&source, &writer, &table, "USD{code}=X", &window()).unwrap();
    assert!(summary.all_succeeded());

    let series = read_series(&tmp.path().join("data/NGN.json"));
    let dates: Vec<_> = series.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(
        dates,
        vec!["2023-01-02", "2023-01-03", "2023-01-05", "2023-01-06", "2023-01-09"]
    );
    // Adj Close is null on 2023-01-06, so Close is used.
    assert_eq!(series[3].price, 455.25);
    assert!(series.iter().all(|r| r.price.is_finite()));
}

#[test]
fn default_table_with_mixed_outcomes() {
    let tmp = tempfile::tempdir().unwrap();
    let writer = JsonWriter::create(tmp.path()).unwrap();
    let good = fixture("ngn_2023_q1.csv");
    let source = ScriptedSource::new(vec![
        ("NGN=X", good.clone()),
        ("KES=X", HEADER_ONLY.to_string()),
        ("USDKES=X", good),
        ("ETB=X", HEADER_ONLY.to_string()),
    ]);
    let config = FeedConfig::default();

    let summary = run_feed(
        &source,
        &writer,
        &config.currencies,
        &config.fallback_template,
        &window(),
    )
    .unwrap();

    assert_eq!(summary.total(), 3);
    assert_eq!(summary.succeeded(), 2);
    assert_eq!(summary.failed_codes(), vec!["ETB"]);

    assert_eq!(
        source.calls(),
        vec!["NGN=X", "KES=X", "USDKES=X", "ETB=X", "USDETB=X"]
    );

    match &summary.outcomes[1] {
        CurrencyOutcome::Written {
            code,
            symbol,
            used_fallback,
            ..
        } => {
            assert_eq!(code, "KES");
            assert_eq!(symbol, "USDKES=X");
            assert!(used_fallback);
        }
        other => panic!("expected KES written, got {other:?}"),
    }

    match &summary.outcomes[2] {
        CurrencyOutcome::Failed { code, attempted } => {
            assert_eq!(code, "ETB");
            assert_eq!(attempted, &vec!["ETB=X".to_string(), "USDETB=X".to_string()]);
        }
        other => panic!("expected ETB failed, got {other:?}"),
    }

    assert!(tmp.path().join("NGN.json").exists());
    assert!(tmp.path().join("KES.json").exists());
    assert!(!tmp.path().join("ETB.json").exists());
}

#[test]
fn failing_currency_does_not_stop_later_ones() {
    let tmp = tempfile::tempdir().unwrap();
    let writer = JsonWriter::create(tmp.path()).unwrap();
    let source = ScriptedSource::new(vec![("KES=X", fixture("ngn_2023_q1.csv"))]);
    let table = vec![
        CurrencyEntry::new("NGN", "NGN=X"),
        CurrencyEntry::new("KES", "KES=X"),
    ];

    let summary = run_feed(&source, &writer, &table, "USD{code}=X", &window()).unwrap();

    assert_eq!(summary.failed_codes(), vec!["NGN"]);
    assert!(summary.outcomes[1].is_written());
    assert!(tmp.path().join("KES.json").exists());
}

#[test]
fn existing_output_is_overwritten() {
    let tmp = tempfile::tempdir().unwrap();
    let writer = JsonWriter::create(tmp.path()).unwrap();
    std::fs::write(tmp.path().join("NGN.json"), "[]").unwrap();
    let source = ScriptedSource::new(vec![("NGN=X", fixture("ngn_2023_q1.csv"))]);

    run_feed(
        &source,
        &writer,
        &[CurrencyEntry::new("NGN", "NGN=X")],
        "USD{code}=X",
        &window(),
    )
    .unwrap();

    assert_eq!(read_series(&tmp.path().join("NGN.json")).len(), 5);
}

#[test]
fn write_failure_aborts_the_run() {
    let tmp = tempfile::tempdir().unwrap();
    let writer = JsonWriter::create(tmp.path()).unwrap();
    // A directory where the output file should go makes the write fail.
    std::fs::create_dir(tmp.path().join("NGN.json")).unwrap();
    let source = ScriptedSource::new(vec![
        ("NGN=X", fixture("ngn_2023_q1.csv")),
        ("KES=X", fixture("ngn_2023_q1.csv")),
    ]);
    let table = vec![
        CurrencyEntry::new("NGN", "NGN=X"),
        CurrencyEntry::new("KES", "KES=X"),
    ];

    let result = run_feed(&source, &writer, &table, "USD{code}=X", &window());

    assert!(result.is_err());
    assert_eq!(source.calls(), vec!["NGN=X"]);
    assert!(!tmp.path().join("KES.json").exists());
}
