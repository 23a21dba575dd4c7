//! End-to-end extraction run: load, locate, read underlying, derive.
//!
//! Strictly forward data flow and no persistent state. Structural problems
//! abort the run; everything below contract granularity is skip-and-log.

use crate::config::ExtractConfig;
use crate::deriver;
use crate::document;
use crate::error::SpanError;
use crate::loader;
use crate::record::DerivedRecord;
use crate::types::LotSize;
use crate::underlying;
use chrono::{DateTime, Utc};
use roxmltree::Document;
use rust_decimal::Decimal;
use tracing::{info, warn};

/// The result of one run: the ordered record set plus the resolved context
/// figures the exporter and the console summary both need.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub records: Vec<DerivedRecord>,
    pub spot: Option<Decimal>,
    pub lot_size: LotSize,
    pub generated_at: DateTime<Utc>,
}

pub fn run(config: &ExtractConfig) -> Result<Extraction, SpanError> {
    config.validate()?;

    let text = loader::read_risk_text(&config.input_path)?;
    let doc = Document::parse(&text)?;

    let portfolios = document::locate_portfolios(&doc, &config.symbol)?;
    if portfolios.underlying.is_none() {
        warn!(
            symbol = %config.symbol,
            "underlying portfolio not found; spot and exposure columns will be empty"
        );
    }

    let info = underlying::read_underlying(portfolios.underlying);
    let lot_size = info.lot_size.unwrap_or(config.fallback_lot_size);

    let records = deriver::derive_records(
        portfolios.options,
        info.spot,
        lot_size,
        &config.exposure_rates,
        &config.symbol,
    )?;

    info!(
        records = records.len(),
        spot = ?info.spot,
        lot_size = %lot_size,
        "extraction complete"
    );

    Ok(Extraction {
        records,
        spot: info.spot,
        lot_size,
        generated_at: Utc::now(),
    })
}
