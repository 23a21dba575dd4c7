// 5.0: the derived output row and its column layout. records are plain data,
// immutable once computed; the exporter only formats them.

use crate::types::{ExposureRate, LotSize, OptionType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// fixed core columns, in output order
pub const CORE_FIELDS: [&str; 11] = [
    "expiry_raw",
    "expiry",
    "strike",
    "option_type",
    "premium",
    "delta",
    "worst_per_unit",
    "span_per_lot",
    "spot",
    "lot_size",
    "notional",
];

/** 5.1: exposure figures for one configured rate. null when spot is unknown. */
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureFigures {
    pub exposure: Option<Decimal>,
    pub total: Option<Decimal>,
}

// 5.2: one row per surviving contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRecord {
    pub expiry_raw: String,
    pub expiry: String,
    pub strike: Option<Decimal>,
    pub option_type: Option<OptionType>,
    pub premium: Option<Decimal>,
    pub delta: Option<Decimal>,
    // worst-case scenario loss per unit, always non-negative
    pub worst_per_unit: Decimal,
    // margin base: worst_per_unit scaled to one lot
    pub span_per_lot: Decimal,
    pub spot: Option<Decimal>,
    pub lot_size: LotSize,
    pub notional: Option<Decimal>,
    // aligned with the configured rate order
    pub exposures: Vec<ExposureFigures>,
}

// core columns followed by exposure/total pairs per rate, in configured order
pub fn column_names(rates: &[ExposureRate]) -> Vec<String> {
    let mut names: Vec<String> = CORE_FIELDS.iter().map(|name| name.to_string()).collect();
    for rate in rates {
        let label = rate.percent_label();
        names.push(format!("exposure_{label}_pct"));
        names.push(format!("total_{label}_pct"));
    }
    names
}

impl DerivedRecord {
    // one CSV row in column order; None becomes the empty field
    pub fn to_row(&self) -> Vec<String> {
        fn cell<T: std::fmt::Display>(value: &Option<T>) -> String {
            value.as_ref().map(|v| v.to_string()).unwrap_or_default()
        }

        let mut row = vec![
            self.expiry_raw.clone(),
            self.expiry.clone(),
            cell(&self.strike),
            cell(&self.option_type),
            cell(&self.premium),
            cell(&self.delta),
            self.worst_per_unit.to_string(),
            self.span_per_lot.to_string(),
            cell(&self.spot),
            self.lot_size.to_string(),
            cell(&self.notional),
        ];
        for figures in &self.exposures {
            row.push(cell(&figures.exposure));
            row.push(cell(&figures.total));
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_record() -> DerivedRecord {
        DerivedRecord {
            expiry_raw: "20250828".to_string(),
            expiry: "2025-08-28".to_string(),
            strike: Some(dec!(48000)),
            option_type: Some(OptionType::Call),
            premium: None,
            delta: Some(dec!(0.52)),
            worst_per_unit: dec!(300.5),
            span_per_lot: dec!(10517.5),
            spot: None,
            lot_size: LotSize::new(35).unwrap(),
            notional: None,
            exposures: vec![ExposureFigures {
                exposure: None,
                total: None,
            }],
        }
    }

    #[test]
    fn column_names_follow_rate_order() {
        let rates = [
            ExposureRate::new(dec!(0.02)).unwrap(),
            ExposureRate::new(dec!(0.02265)).unwrap(),
        ];
        let names = column_names(&rates);
        assert_eq!(names.len(), CORE_FIELDS.len() + 4);
        assert_eq!(names[0], "expiry_raw");
        assert_eq!(names[CORE_FIELDS.len()], "exposure_2.00_pct");
        assert_eq!(names[CORE_FIELDS.len() + 1], "total_2.00_pct");
        assert_eq!(names[CORE_FIELDS.len() + 2], "exposure_2.27_pct");
        assert_eq!(names[CORE_FIELDS.len() + 3], "total_2.27_pct");
    }

    #[test]
    fn row_width_matches_columns() {
        let rates = [ExposureRate::new(dec!(0.02)).unwrap()];
        let record = sample_record();
        assert_eq!(record.to_row().len(), column_names(&rates).len());
    }

    #[test]
    fn null_fields_become_empty_cells() {
        let row = sample_record().to_row();
        assert_eq!(row[0], "20250828");
        assert_eq!(row[1], "2025-08-28");
        assert_eq!(row[3], "C");
        assert_eq!(row[4], ""); // premium
        assert_eq!(row[8], ""); // spot
        assert_eq!(row[9], "35");
        assert_eq!(row[10], ""); // notional
        assert_eq!(row[11], ""); // exposure
        assert_eq!(row[12], ""); // total
    }
}
