// src/fetch/report.rs
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, info};
use url::Url;

use crate::config::ReportConfig;
use crate::error::{ReportError, Result};

/// HTTP client for the report request, with the configured timeout if any.
pub fn build_client(cfg: &ReportConfig) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = cfg.timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(|source| ReportError::Network {
        url: format!("https://{}", cfg.host),
        source,
    })
}

/// GET `url` once and return the body text. Non-success statuses are errors.
pub async fn fetch_report(client: &Client, url: &Url) -> Result<String> {
    let network = |source| ReportError::Network {
        url: url.to_string(),
        source,
    };

    debug!(%url, "requesting report");
    let start = Instant::now();
    let body = client
        .get(url.clone())
        .send()
        .await
        .map_err(network)?
        .error_for_status()
        .map_err(network)?
        .text()
        .await
        .map_err(network)?;

    info!(bytes = body.len(), elapsed = ?start.elapsed(), "fetched report");
    Ok(body)
}
