// span-core: SPAN risk-file margin extraction.
// parse-first architecture: tolerant tag matching and per-contract failure
// isolation take priority. one forward pass: load -> locate -> derive; the
// exporter only ever receives a finished record set.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x types.rs: primitives: OptionType, LotSize, ExposureRate, Expiry,
//       numeric coercion
//   2.x config.rs: run configuration and validation
//   3.x error.rs: fatal error taxonomy
//   4.x underlying.rs: spot price and lot-size inference
//   5.x record.rs: derived record and column layout
//   6.x export.rs: CSV serialization collaborator
//   loader.rs, document.rs, deriver.rs, pipeline.rs carry their own docs

// core pipeline modules
pub mod deriver;
pub mod document;
pub mod loader;
pub mod pipeline;
pub mod underlying;

// data model and configuration
pub mod config;
pub mod error;
pub mod record;
pub mod types;

// output collaborator
pub mod export;

// re exports for convenience
pub use config::*;
pub use deriver::*;
pub use document::*;
pub use error::*;
pub use export::*;
pub use loader::*;
pub use pipeline::*;
pub use record::*;
pub use types::*;
pub use underlying::*;
