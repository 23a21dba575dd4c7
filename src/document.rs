//! Risk-tree location: find the options and underlying portfolio blocks for
//! one instrument family inside the clearing subtree.
//!
//! File vintages disagree on tag casing and sometimes on block tags entirely,
//! so selection runs an ordered list of matcher strategies: family-code
//! parents first, then a direct tag scan, then classification of clearing
//! children by shape (a `series` child marks options, a `phy` child marks
//! the underlying). Each strategy returns match-or-absent; later strategies
//! only fill what earlier ones left open.

use crate::error::SpanError;
use roxmltree::{Document, Node};

pub const POINT_IN_TIME_TAG: &str = "pointInTime";
pub const CLEARING_ORG_TAG: &str = "clearingOrg";
pub const FAMILY_CODE_TAG: &str = "pfCode";
pub const OPTIONS_PORTFOLIO_TAG: &str = "oopPf";
pub const UNDERLYING_PORTFOLIO_TAG: &str = "phyPf";
pub const SERIES_TAG: &str = "series";
pub const UNDERLYING_ENTRY_TAG: &str = "phy";

/// The portfolio blocks selected for one symbol. The underlying block is
/// optional; a missing one only costs the spot-derived columns.
#[derive(Debug, Clone, Copy)]
pub struct Portfolios<'a, 'input> {
    pub options: Node<'a, 'input>,
    pub underlying: Option<Node<'a, 'input>>,
}

pub fn tag_is(node: Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name().eq_ignore_ascii_case(name)
}

pub fn find_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| tag_is(*child, name))
}

pub fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    find_child(node, name).and_then(|child| child.text()).map(str::trim)
}

/// Locate the portfolio blocks for `symbol`. Fatal when the document anchors
/// are missing or no strategy resolves an options portfolio.
pub fn locate_portfolios<'a, 'input>(
    doc: &'a Document<'input>,
    symbol: &str,
) -> Result<Portfolios<'a, 'input>, SpanError> {
    let root = doc.root_element();
    let point =
        find_child(root, POINT_IN_TIME_TAG).ok_or(SpanError::Structure(POINT_IN_TIME_TAG))?;
    let clearing =
        find_child(point, CLEARING_ORG_TAG).ok_or(SpanError::Structure(CLEARING_ORG_TAG))?;

    // strategy 1: parents of family-code leaves matching the symbol
    let parents = family_code_parents(clearing, symbol);
    let mut options = parents
        .iter()
        .copied()
        .find(|parent| tag_is(*parent, OPTIONS_PORTFOLIO_TAG));
    let mut underlying = parents
        .iter()
        .copied()
        .find(|parent| tag_is(*parent, UNDERLYING_PORTFOLIO_TAG));

    // strategy 2: direct tag scan anywhere under the clearing subtree
    if options.is_none() {
        options = clearing
            .descendants()
            .find(|node| tag_is(*node, OPTIONS_PORTFOLIO_TAG));
    }
    if underlying.is_none() {
        underlying = clearing
            .descendants()
            .find(|node| tag_is(*node, UNDERLYING_PORTFOLIO_TAG));
    }

    // strategy 3: nonstandard block tags; classify clearing children by shape
    if options.is_none() || underlying.is_none() {
        let (by_series, by_entry) = classify_by_shape(clearing, symbol);
        options = options.or(by_series);
        underlying = underlying.or(by_entry);
    }

    let options = options.ok_or_else(|| SpanError::OptionsPortfolioMissing {
        symbol: symbol.to_string(),
    })?;

    Ok(Portfolios { options, underlying })
}

// the tree carries parent links, so the containing block of a matched
// family-code leaf is one hop up
fn family_code_parents<'a, 'input>(
    clearing: Node<'a, 'input>,
    symbol: &str,
) -> Vec<Node<'a, 'input>> {
    clearing
        .descendants()
        .filter(|node| tag_is(*node, FAMILY_CODE_TAG))
        .filter(|node| {
            node.text()
                .map_or(false, |text| text.trim().eq_ignore_ascii_case(symbol))
        })
        .filter_map(|node| node.parent())
        .filter(|parent| parent.is_element())
        .collect()
}

fn classify_by_shape<'a, 'input>(
    clearing: Node<'a, 'input>,
    symbol: &str,
) -> (Option<Node<'a, 'input>>, Option<Node<'a, 'input>>) {
    let mut by_series = None;
    let mut by_entry = None;
    for child in clearing.children().filter(|child| child.is_element()) {
        let code = child_text(child, FAMILY_CODE_TAG).unwrap_or("");
        if !code.eq_ignore_ascii_case(symbol) {
            continue;
        }
        if by_series.is_none() && find_child(child, SERIES_TAG).is_some() {
            by_series = Some(child);
        } else if find_child(child, UNDERLYING_ENTRY_TAG).is_some() {
            by_entry = Some(child);
        }
    }
    (by_series, by_entry)
}
