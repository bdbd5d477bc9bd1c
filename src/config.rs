// src/config.rs

use serde::Serialize;
use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::error::{ReportError, Result};

/// Everything needed to request one page of try reports and write it out.
#[derive(Debug, Clone, Serialize)]
pub struct ReportConfig {
    pub host: String,
    pub item_id: u64,
    pub page_size: u32,
    pub current_page: u32,
    pub callback: String,
    /// Substring that must appear in the response body.
    pub marker: String,
    /// Field of the JSONP payload holding the list of record batches.
    pub list_field: String,
    pub output: PathBuf,
    pub sheet_name: String,
    pub parquet_output: Option<PathBuf>,
    pub timeout: Option<Duration>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            host: "rate.tmall.com".to_string(),
            item_id: 545135822523,
            page_size: 75,
            current_page: 1,
            callback: "jsonp701".to_string(),
            marker: "\"tryReportList\"".to_string(),
            list_field: "tryReportList".to_string(),
            output: PathBuf::from("TryReport.xlsx"),
            sheet_name: "TryReport".to_string(),
            parquet_output: None,
            timeout: None,
        }
    }
}

impl ReportConfig {
    /// Defaults overridden by any `TRYREPORT_*` variables in the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ReportConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("TRYREPORT_HOST") {
            cfg.host = v;
        }
        if let Some(v) = lookup("TRYREPORT_ITEM_ID") {
            cfg.item_id = parse_num("TRYREPORT_ITEM_ID", v)?;
        }
        if let Some(v) = lookup("TRYREPORT_PAGE_SIZE") {
            cfg.page_size = parse_num("TRYREPORT_PAGE_SIZE", v)?;
        }
        if let Some(v) = lookup("TRYREPORT_PAGE") {
            cfg.current_page = parse_num("TRYREPORT_PAGE", v)?;
        }
        if let Some(v) = lookup("TRYREPORT_CALLBACK") {
            if !crate::extract::jsonp::is_callback_name(&v) {
                return Err(ReportError::Config {
                    key: "TRYREPORT_CALLBACK",
                    value: v,
                    reason: "not a valid JavaScript identifier".to_string(),
                });
            }
            cfg.callback = v;
        }
        if let Some(v) = lookup("TRYREPORT_OUTPUT") {
            cfg.output = PathBuf::from(v);
        }
        if let Some(v) = lookup("TRYREPORT_SHEET") {
            cfg.sheet_name = v;
        }
        if let Some(v) = lookup("TRYREPORT_PARQUET").filter(|v| !v.is_empty()) {
            cfg.parquet_output = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("TRYREPORT_TIMEOUT_SECS") {
            let secs: u64 = parse_num("TRYREPORT_TIMEOUT_SECS", v)?;
            cfg.timeout = Some(Duration::from_secs(secs));
        }

        Ok(cfg)
    }
}

fn parse_num<T>(key: &'static str, value: String) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| ReportError::Config {
        key,
        reason: e.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_reproduce_the_fixed_request() {
        let cfg = ReportConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.host, "rate.tmall.com");
        assert_eq!(cfg.item_id, 545135822523);
        assert_eq!(cfg.page_size, 75);
        assert_eq!(cfg.current_page, 1);
        assert_eq!(cfg.callback, "jsonp701");
        assert_eq!(cfg.output, PathBuf::from("TryReport.xlsx"));
        assert_eq!(cfg.sheet_name, "TryReport");
        assert!(cfg.parquet_output.is_none());
        assert!(cfg.timeout.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = ReportConfig::from_lookup(lookup_from(&[
            ("TRYREPORT_ITEM_ID", "42"),
            ("TRYREPORT_PAGE", " 3 "),
            ("TRYREPORT_CALLBACK", "jsonp12"),
            ("TRYREPORT_PARQUET", "out/report.parquet"),
            ("TRYREPORT_TIMEOUT_SECS", "10"),
        ]))
        .unwrap();
        assert_eq!(cfg.item_id, 42);
        assert_eq!(cfg.current_page, 3);
        assert_eq!(cfg.callback, "jsonp12");
        assert_eq!(cfg.parquet_output, Some(PathBuf::from("out/report.parquet")));
        assert_eq!(cfg.timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn bad_numbers_are_config_errors() {
        let err = ReportConfig::from_lookup(lookup_from(&[("TRYREPORT_PAGE_SIZE", "lots")]))
            .unwrap_err();
        assert_eq!(err.stage(), "config");
        assert!(err.to_string().contains("TRYREPORT_PAGE_SIZE"));
    }

    #[test]
    fn callback_must_be_an_identifier() {
        let err = ReportConfig::from_lookup(lookup_from(&[("TRYREPORT_CALLBACK", "alert(1)")]))
            .unwrap_err();
        assert!(matches!(err, ReportError::Config { key: "TRYREPORT_CALLBACK", .. }));
    }
}
