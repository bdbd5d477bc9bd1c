// src/extract/mod.rs

pub mod jsonp;
pub mod table;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ReportConfig;
use crate::error::{ReportError, Result};

pub use jsonp::{parse_envelope, Envelope};
pub use table::{Record, ReportTable, URL_COLUMN};

/// Turns a JSONP try-report response into a flat [`ReportTable`].
#[derive(Debug, Clone)]
pub struct Extractor {
    marker: String,
    list_field: String,
    callback: Option<String>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            marker: "\"tryReportList\"".to_string(),
            list_field: "tryReportList".to_string(),
            callback: None,
        }
    }
}

impl Extractor {
    pub fn new(marker: impl Into<String>, list_field: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            list_field: list_field.into(),
            callback: None,
        }
    }

    pub fn from_config(cfg: &ReportConfig) -> Self {
        Self {
            marker: cfg.marker.clone(),
            list_field: cfg.list_field.clone(),
            callback: Some(cfg.callback.clone()),
        }
    }

    /// Parse `raw` and flatten its record batches, tagging every row with `url`.
    pub fn extract(&self, raw: &str, url: &str) -> Result<ReportTable> {
        // 1) the payload we expect must be in there at all
        if !raw.contains(&self.marker) {
            return Err(ReportError::parse(
                format!("marker {} not found in response", self.marker),
                raw,
            ));
        }

        // 2) strip the callback wrapper
        let envelope = parse_envelope(raw)?;
        if let Some(expected) = &self.callback {
            if envelope.callback != expected.as_str() {
                warn!(
                    expected = %expected,
                    got = %envelope.callback,
                    "response wrapped in unexpected callback"
                );
            }
        }

        // 3) strict JSON decode, then normalize
        let parsed: Value = serde_json::from_str(envelope.body).map_err(|e| {
            ReportError::parse(
                format!("invalid JSON at line {} column {}: {}", e.line(), e.column(), e),
                envelope.body,
            )
        })?;
        let mut payload = canonicalize(&parsed)?;

        // 4) pull out the list of batches and flatten
        let batches = match payload.as_object_mut() {
            Some(obj) => obj.remove(&self.list_field).ok_or_else(|| ReportError::Schema {
                path: self.list_field.clone(),
                expected: "array",
                found: "nothing",
            })?,
            None => {
                return Err(ReportError::Schema {
                    path: "$".to_string(),
                    expected: "object",
                    found: table::kind(&payload),
                })
            }
        };

        let table = ReportTable::from_batches(batches, &self.list_field, url)?;
        debug!(
            rows = table.len(),
            columns = table.columns().len(),
            "flattened report"
        );
        Ok(table)
    }
}

/// [`Extractor::extract`] with the default marker and list field.
pub fn extract(raw: &str, url: &str) -> Result<ReportTable> {
    Extractor::default().extract(raw, url)
}

/// Round-trip `value` through the JSON encoder and decoder.
pub fn canonicalize(value: &Value) -> Result<Value> {
    let text = serde_json::to_string(value)
        .map_err(|e| ReportError::parse(format!("re-encoding payload: {}", e), ""))?;
    serde_json::from_str(&text)
        .map_err(|e| ReportError::parse(format!("re-decoding payload: {}", e), &text))
}
