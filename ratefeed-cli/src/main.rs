//! Ratefeed CLI — download exchange-rate history and write per-currency JSON.
//!
//! With no arguments, runs the built-in table (NGN, KES, ETB) over the last
//! five years into `../public/data`. Flags override individual settings.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use ratefeed_core::data::{run_feed, CurrencyOutcome, JsonWriter, RunSummary, YahooCsvSource};
use ratefeed_core::domain::CurrencyEntry;
use ratefeed_core::FeedConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ratefeed",
    about = "Ratefeed — fetch daily exchange-rate history and write JSON series"
)]
struct Cli {
    /// Path to a TOML config file. Missing keys take built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory for <CODE>.json files.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Years of history to request.
    #[arg(long)]
    years: Option<u32>,

    /// Currency as CODE=SYMBOL (e.g. NGN=NGN=X). Repeat to build the table;
    /// replaces the configured table when given.
    #[arg(long = "currency", value_parser = parse_currency)]
    currencies: Vec<CurrencyEntry>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long, default_value_t = false)]
    print_config: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let summary = run(&config)?;
    print_summary(&summary);
    Ok(())
}

/// Split on the first `=` only, since symbols themselves contain `=`.
fn parse_currency(s: &str) -> Result<CurrencyEntry, String> {
    let (code, symbol) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CODE=SYMBOL, got '{s}'"))?;
    if code.is_empty() || symbol.is_empty() {
        return Err(format!("expected CODE=SYMBOL, got '{s}'"));
    }
    Ok(CurrencyEntry::new(code, symbol))
}

fn build_config(cli: &Cli) -> Result<FeedConfig> {
    let mut config = match &cli.config {
        Some(path) => FeedConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => FeedConfig::default(),
    };

    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(years) = cli.years {
        config.window_years = years;
    }
    if !cli.currencies.is_empty() {
        config.currencies = cli.currencies.clone();
    }

    config.validate()?;
    Ok(config)
}

fn run(config: &FeedConfig) -> Result<RunSummary> {
    let writer = JsonWriter::create(&config.output_dir)?;
    let source = YahooCsvSource::from_config(config)?;
    let window = config.window()?;

    info!(
        "Fetching {} currencies from {} to {}",
        config.currencies.len(),
        window.start.date_naive(),
        window.end.date_naive()
    );

    let summary = run_feed(
        &source,
        &writer,
        &config.currencies,
        &config.fallback_template,
        &window,
    )?;
    Ok(summary)
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("=== Feed Result ===");
    println!("{:<6} {:<12} {:>8}  {}", "Code", "Symbol", "Records", "Output");
    println!("{}", "-".repeat(50));
    for outcome in &summary.outcomes {
        match outcome {
            CurrencyOutcome::Written {
                code,
                symbol,
                records,
                path,
                ..
            } => println!("{code:<6} {symbol:<12} {records:>8}  {}", path.display()),
            CurrencyOutcome::Failed { code, attempted } => {
                println!("{code:<6} {:<12} {:>8}  FAILED", attempted.join(","), "-")
            }
        }
    }
    println!();
    println!(
        "{}/{} succeeded, {} failed",
        summary.succeeded(),
        summary.total(),
        summary.failed()
    );
}
