//! SPAN margin extraction binary.
//!
//! Resolves the risk file, runs the extraction pipeline for one underlying,
//! writes the derived records to CSV, and prints a short console summary.

use anyhow::Context;
use clap::Parser;
use rust_decimal::Decimal;
use span_core::{export, ExposureRate, ExtractConfig, LotSize};
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "span-extract")]
#[command(about = "Extract per-contract SPAN margin figures for one underlying")]
#[command(version)]
struct Cli {
    /// Risk file input: a .zip archive, a .spn document, or a bare locator
    input: PathBuf,

    /// Instrument family to extract
    #[arg(short, long, default_value = "BANKNIFTY")]
    symbol: String,

    /// Output CSV path
    #[arg(short, long, default_value = "span_extract.csv")]
    output: PathBuf,

    /// Exposure rate as a decimal fraction; repeat for multiple columns
    #[arg(long = "rate", value_name = "FRACTION")]
    rates: Vec<Decimal>,

    /// Lot size to assume when the document does not carry one
    #[arg(long, default_value_t = 35)]
    fallback_lot: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let exposure_rates = if cli.rates.is_empty() {
        ExtractConfig::default().exposure_rates
    } else {
        cli.rates
            .into_iter()
            .map(|rate| {
                ExposureRate::new(rate)
                    .with_context(|| format!("exposure rate must be positive, got {rate}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
    };

    let config = ExtractConfig {
        input_path: cli.input,
        symbol: cli.symbol,
        exposure_rates,
        fallback_lot_size: LotSize::new(cli.fallback_lot)
            .context("fallback lot size must be positive")?,
    };

    let extraction = span_core::run(&config)?;

    let file = File::create(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    export::write_csv(file, &config.exposure_rates, &extraction.records)?;

    println!(
        "Wrote {} option rows to {}",
        extraction.records.len(),
        cli.output.display()
    );
    match extraction.spot {
        Some(spot) => println!(
            "Underlying spot (from file): {spot}; lot size used: {}",
            extraction.lot_size
        ),
        None => println!(
            "Underlying spot unavailable; lot size used: {}",
            extraction.lot_size
        ),
    }

    Ok(())
}
