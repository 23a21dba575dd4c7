// 6.0: CSV export collaborator. receives the finished record set and the
// configured rates; owns no decision logic.

use crate::record::{column_names, DerivedRecord};
use crate::types::ExposureRate;
use std::io::Write;

pub fn write_csv<W: Write>(
    writer: W,
    rates: &[ExposureRate],
    records: &[DerivedRecord],
) -> csv::Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(column_names(rates))?;
    for record in records {
        out.write_record(record.to_row())?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ExposureFigures;
    use crate::types::{LotSize, OptionType};
    use rust_decimal_macros::dec;

    #[test]
    fn writes_header_and_rows() {
        let rates = [ExposureRate::new(dec!(0.02)).unwrap()];
        let records = vec![DerivedRecord {
            expiry_raw: "20250828".to_string(),
            expiry: "2025-08-28".to_string(),
            strike: Some(dec!(48000)),
            option_type: Some(OptionType::Call),
            premium: Some(dec!(350.5)),
            delta: None,
            worst_per_unit: dec!(300.5),
            span_per_lot: dec!(10517.5),
            spot: None,
            lot_size: LotSize::new(35).unwrap(),
            notional: None,
            exposures: vec![ExposureFigures {
                exposure: None,
                total: None,
            }],
        }];

        let mut buffer = Vec::new();
        write_csv(&mut buffer, &rates, &records).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("expiry_raw,expiry,strike,option_type"));
        assert!(header.ends_with("exposure_2.00_pct,total_2.00_pct"));

        // null delta, spot, notional, exposure, total serialize as empty cells
        let row = lines.next().unwrap();
        assert_eq!(row, "20250828,2025-08-28,48000,C,350.5,,300.5,10517.5,,35,,,");
        assert!(lines.next().is_none());
    }

    #[test]
    fn empty_record_set_writes_header_only() {
        let rates = [ExposureRate::new(dec!(0.02)).unwrap()];
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &rates, &[]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
