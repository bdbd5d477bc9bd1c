//! Fetches one page of Tmall try reports (a JSONP response), flattens the
//! nested record batches into a table and writes it to a spreadsheet.
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;

pub use config::ReportConfig;
pub use error::ReportError;
pub use extract::{extract, Extractor, ReportTable};
