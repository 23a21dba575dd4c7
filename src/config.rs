// 2.0 config.rs: all run settings in one place. input locator, target symbol,
// exposure rates, fallback lot size.
// 2.1 defaults mirror the clearing house's BANKNIFTY setup: 2.00% and 2.265%
// exposure buffers, lot 35.

use crate::types::{ExposureRate, LotSize};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

// Complete configuration for one extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    // Archive or raw risk file; bare locators get the known suffixes appended
    pub input_path: PathBuf,
    // Instrument family to extract, matched case-insensitively
    pub symbol: String,
    // Decimal fractions applied to notional, in output column order
    pub exposure_rates: Vec<ExposureRate>,
    // Used when the document carries no usable contract multiplier
    pub fallback_lot_size: LotSize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("nsccl.latest.zip"),
            symbol: "BANKNIFTY".to_string(),
            exposure_rates: vec![
                ExposureRate::new(dec!(0.02)).unwrap(),
                ExposureRate::new(dec!(0.02265)).unwrap(),
            ],
            fallback_lot_size: LotSize::new(35).unwrap(),
        }
    }
}

impl ExtractConfig {
    // Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::EmptySymbol);
        }

        if self.exposure_rates.is_empty() {
            return Err(ConfigError::NoExposureRates);
        }

        // generated column names must stay unique per rate
        let mut labels = HashSet::new();
        for rate in &self.exposure_rates {
            let label = rate.percent_label();
            if !labels.insert(label.clone()) {
                return Err(ConfigError::DuplicateRateLabel { label });
            }
        }

        Ok(())
    }
}

// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("target symbol must not be empty")]
    EmptySymbol,

    #[error("at least one exposure rate is required")]
    NoExposureRates,

    #[error("exposure rates produce duplicate column label {label}")]
    DuplicateRateLabel { label: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config_valid() {
        let config = ExtractConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.symbol, "BANKNIFTY");
        assert_eq!(config.fallback_lot_size.value(), 35);
    }

    #[test]
    fn test_empty_symbol_rejected() {
        let mut config = ExtractConfig::default();
        config.symbol = "   ".to_string();
        assert_eq!(config.validate(), Err(ConfigError::EmptySymbol));
    }

    #[test]
    fn test_empty_rates_rejected() {
        let mut config = ExtractConfig::default();
        config.exposure_rates.clear();
        assert_eq!(config.validate(), Err(ConfigError::NoExposureRates));
    }

    #[test]
    fn test_colliding_rate_labels_rejected() {
        let mut config = ExtractConfig::default();
        // 0.02 and 0.020001 both label as "2.00"
        config.exposure_rates = vec![
            ExposureRate::new(dec!(0.02)).unwrap(),
            ExposureRate::new(dec!(0.020001)).unwrap(),
        ];
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::DuplicateRateLabel { .. })));
    }

    #[test]
    fn test_config_serialization() {
        let config = ExtractConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: ExtractConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.symbol, config.symbol);
        assert_eq!(back.exposure_rates, config.exposure_rates);
    }
}
