// src/fetch/mod.rs

pub mod report;
pub mod urls;

pub use report::{build_client, fetch_report};
pub use urls::report_url;
