// src/fetch/urls.rs
use chrono::{DateTime, Utc};
use url::Url;

use crate::config::ReportConfig;
use crate::error::{ReportError, Result};

const REPORT_PATH: &str = "/listTryReport.htm";

/// Build the try-report listing URL for `cfg`, stamped with `now`.
///
/// `_ksTS` is `<epoch millis>_<n>` where `n` is one less than the numeric
/// suffix of the callback name, the way the site's own loader numbers them.
pub fn report_url(cfg: &ReportConfig, now: DateTime<Utc>) -> Result<Url> {
    let base = format!("https://{}{}", cfg.host, REPORT_PATH);
    let mut url = Url::parse(&base).map_err(|e| ReportError::Config {
        key: "TRYREPORT_HOST",
        value: cfg.host.clone(),
        reason: e.to_string(),
    })?;

    let ks_ts = format!(
        "{}_{}",
        now.timestamp_millis(),
        callback_sequence(&cfg.callback)
    );
    url.query_pairs_mut()
        .append_pair("itemId", &cfg.item_id.to_string())
        .append_pair("pageSize", &cfg.page_size.to_string())
        .append_pair("currentPage", &cfg.current_page.to_string())
        .append_pair("_ksTS", &ks_ts)
        .append_pair("callback", &cfg.callback);

    Ok(url)
}

/// Numeric suffix of `callback` minus one (`jsonp701` → 700), 0 without one.
fn callback_sequence(callback: &str) -> u64 {
    let head = callback.trim_end_matches(|c: char| c.is_ascii_digit());
    callback[head.len()..]
        .parse::<u64>()
        .map_or(0, |n| n.saturating_sub(1))
}
