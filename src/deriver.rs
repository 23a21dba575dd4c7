//! Per-contract margin derivation.
//!
//! Walks every expiry series under the options portfolio in document order,
//! coerces the signed risk array, and computes the worst-case loss figures.
//! The worst scenario value (most negative) is the per-unit loss; scaled to
//! one lot it becomes the margin base, and each configured exposure rate adds
//! a notional-proportional buffer on top.
//!
//! Failure isolation is per contract: a contract that yields no usable risk
//! values is skipped with a warning, and one bad contract never aborts the
//! batch. Scalar fields degrade to null independently.

use crate::document::{self, SERIES_TAG};
use crate::error::SpanError;
use crate::record::{DerivedRecord, ExposureFigures};
use crate::types::{coerce_scenario_value, parse_decimal, Expiry, ExposureRate, LotSize, OptionType};
use roxmltree::Node;
use rust_decimal::Decimal;
use std::fmt;
use tracing::{debug, warn};

const EXPIRY_TAG: &str = "pe";
const CONTRACT_TAG: &str = "opt";
const TYPE_TAG: &str = "o";
const STRIKE_TAG: &str = "k";
const PREMIUM_TAG: &str = "p";
const DELTA_TAG: &str = "d";
const RISK_ARRAY_TAG: &str = "ra";
const SCENARIO_TAG: &str = "a";

// why a contract was dropped; surfaces in the warning log only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoRiskArray,
    EmptyRiskArray,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoRiskArray => write!(f, "no risk array present"),
            SkipReason::EmptyRiskArray => write!(f, "risk array had no coercible values"),
        }
    }
}

/// Derive the ordered record sequence for every contract under `options`.
/// Order follows the document: series first, contracts within each series.
pub fn derive_records(
    options: Node,
    spot: Option<Decimal>,
    lot_size: LotSize,
    rates: &[ExposureRate],
    symbol: &str,
) -> Result<Vec<DerivedRecord>, SpanError> {
    let series: Vec<Node> = options
        .children()
        .filter(|child| document::tag_is(*child, SERIES_TAG))
        .collect();
    if series.is_empty() {
        return Err(SpanError::NoSeries {
            symbol: symbol.to_string(),
        });
    }

    let mut records = Vec::new();
    for series_node in series {
        let expiry = Expiry::from_raw(document::child_text(series_node, EXPIRY_TAG).unwrap_or(""));
        for contract in series_node
            .children()
            .filter(|child| document::tag_is(*child, CONTRACT_TAG))
        {
            match derive_contract(contract, &expiry, spot, lot_size, rates) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    warn!(expiry = %expiry.normalized, %reason, "skipping contract");
                }
            }
        }
    }
    Ok(records)
}

// the contract-granularity failure boundary: every fallible step inside
// resolves to a record or a skip reason, never a propagated error
fn derive_contract(
    contract: Node,
    expiry: &Expiry,
    spot: Option<Decimal>,
    lot_size: LotSize,
    rates: &[ExposureRate],
) -> Result<DerivedRecord, SkipReason> {
    let option_type = document::child_text(contract, TYPE_TAG).and_then(OptionType::from_code);
    let strike = scalar_field(contract, STRIKE_TAG);
    let premium = scalar_field(contract, PREMIUM_TAG);
    let delta = scalar_field(contract, DELTA_TAG);

    let risk_array =
        document::find_child(contract, RISK_ARRAY_TAG).ok_or(SkipReason::NoRiskArray)?;
    let values = coerce_risk_array(risk_array);
    // most negative scenario is the worst-case loss per unit
    let worst = values
        .iter()
        .copied()
        .min()
        .ok_or(SkipReason::EmptyRiskArray)?;

    let worst_per_unit = worst.abs();
    let span_per_lot = worst_per_unit * lot_size.as_decimal();
    let notional = spot.map(|spot| spot * lot_size.as_decimal());
    let exposures = rates
        .iter()
        .map(|rate| {
            let exposure = notional.map(|notional| notional * rate.value());
            let total = exposure.map(|exposure| span_per_lot + exposure);
            ExposureFigures { exposure, total }
        })
        .collect();

    Ok(DerivedRecord {
        expiry_raw: expiry.raw.clone(),
        expiry: expiry.normalized.clone(),
        strike,
        option_type,
        premium,
        delta,
        worst_per_unit,
        span_per_lot,
        spot,
        lot_size,
        notional,
        exposures,
    })
}

// scalar fields degrade to null independently; the contract keeps deriving
fn scalar_field(contract: Node, tag: &str) -> Option<Decimal> {
    let text = document::child_text(contract, tag)?;
    let value = parse_decimal(text);
    if value.is_none() && !text.is_empty() {
        debug!(%tag, %text, "scalar field failed numeric coercion");
    }
    value
}

// whatever count is present; unparsable entries are dropped, not zeroed
fn coerce_risk_array(risk_array: Node) -> Vec<Decimal> {
    risk_array
        .children()
        .filter(|child| document::tag_is(*child, SCENARIO_TAG))
        .filter_map(|entry| {
            let raw = entry.text()?;
            let value = coerce_scenario_value(raw);
            if value.is_none() {
                debug!(raw = raw.trim(), "dropping unparsable scenario value");
            }
            value
        })
        .collect()
}
