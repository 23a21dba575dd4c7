// 3.0: fatal error taxonomy. per-field and per-contract failures never land
// here; those are recovered inside the deriver and surface only as log lines.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SpanError {
    #[error("input not found: {0}")]
    NotFound(String),

    #[error("risk document is not well-formed XML: {0}")]
    Parse(#[from] roxmltree::Error),

    #[error("required document anchor missing: <{0}>")]
    Structure(&'static str),

    #[error("options portfolio for {symbol} not found in risk document")]
    OptionsPortfolioMissing { symbol: String },

    #[error("no <series> nodes under the options portfolio for {symbol}")]
    NoSeries { symbol: String },

    #[error("invalid configuration: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}
