// 4.0: underlying reader. spot price and lot-size inference from the physical
// portfolio block. everything here is best-effort: absent or unparsable
// fields cost a column, never the run.

use crate::document::{self, UNDERLYING_ENTRY_TAG};
use crate::types::{parse_decimal, LotSize};
use roxmltree::Node;
use rust_decimal::Decimal;

// multiplier alias tags observed across file vintages, in priority order
const LOT_ALIASES: [&str; 7] = ["m", "mult", "mktLot", "lotSize", "lot", "sc", "l"];
const SPOT_TAG: &str = "p";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnderlyingInfo {
    pub spot: Option<Decimal>,
    pub lot_size: Option<LotSize>,
}

pub fn read_underlying(portfolio: Option<Node>) -> UnderlyingInfo {
    let Some(entry) = portfolio.and_then(|block| document::find_child(block, UNDERLYING_ENTRY_TAG))
    else {
        return UnderlyingInfo::default();
    };

    let spot = document::child_text(entry, SPOT_TAG).and_then(parse_decimal);

    // first alias that parses to a positive integer wins
    let lot_size = LOT_ALIASES
        .iter()
        .find_map(|alias| document::child_text(entry, alias).and_then(LotSize::from_text));

    UnderlyingInfo { spot, lot_size }
}
