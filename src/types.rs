// 1.0: all the primitives live here. nothing downstream works without these types.
// option codes, lot sizes, exposure rates, expiries. each is a newtype so the
// compiler catches mixups between raw document text and derived figures.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Call = right to buy, Put = right to sell. the risk file codes these "C" and "P".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.eq_ignore_ascii_case("C") {
            Some(OptionType::Call)
        } else if code.eq_ignore_ascii_case("P") {
            Some(OptionType::Put)
        } else {
            None
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            OptionType::Call => "C",
            OptionType::Put => "P",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// 1.1: contract multiplier. always positive: either inferred from the document
// or pinned by the configured fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotSize(u32);

impl LotSize {
    #[must_use]
    pub fn new(value: u32) -> Option<Self> {
        if value > 0 {
            Some(Self(value))
        } else {
            None
        }
    }

    // multiplier fields sometimes carry decimal text ("35.0");
    // truncate toward zero before the positivity check
    pub fn from_text(text: &str) -> Option<Self> {
        let value = parse_decimal(text)?;
        value.trunc().to_u32().and_then(Self::new)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }
}

impl fmt::Display for LotSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 1.2: exposure rate as a decimal fraction. 0.02 = 2% of notional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureRate(Decimal);

impl ExposureRate {
    #[must_use]
    pub fn new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    // column label from the percentage, two decimals, half away from zero:
    // 0.02265 -> "2.27", 0.02 -> "2.00"
    pub fn percent_label(&self) -> String {
        let mut percent = (self.0 * dec!(100))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        percent.rescale(2);
        percent.to_string()
    }
}

impl fmt::Display for ExposureRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 1.3: expiry as read from a series, plus its normalized form. an 8-digit date
// token becomes hyphenated; anything else passes through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expiry {
    pub raw: String,
    pub normalized: String,
}

impl Expiry {
    pub fn from_raw(raw: &str) -> Self {
        let raw = raw.trim().to_string();
        let normalized = if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
            format!("{}-{}-{}", &raw[0..4], &raw[4..6], &raw[6..8])
        } else {
            raw.clone()
        };
        Self { raw, normalized }
    }
}

// 1.4: tolerant numeric coercion, shared by scalar fields and risk-array entries.
// plain decimal first, scientific notation second.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .ok()
        .or_else(|| Decimal::from_scientific(trimmed).ok())
}

// 1.5: risk-array entry coercion: strip thousands separators, then retry with
// everything but numeric characters removed. None means the entry is dropped.
pub fn coerce_scenario_value(raw: &str) -> Option<Decimal> {
    let cleaned = raw.trim().replace(',', "");
    parse_decimal(&cleaned).or_else(|| {
        let filtered: String = cleaned
            .chars()
            .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
            .collect();
        parse_decimal(&filtered)
    })
}
