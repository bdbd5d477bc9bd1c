// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Longest slice of a payload kept in a parse error.
const SNIPPET_LEN: usize = 120;

/// Every failure the fetch → extract → export pipeline can surface.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("GET {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed report payload: {reason} (near {snippet:?})")]
    Parse { reason: String, snippet: String },

    #[error("unexpected report structure at {path}: expected {expected}, found {found}")]
    Schema {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("writing {path:?} failed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("invalid configuration {key}={value:?}: {reason}")]
    Config {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ReportError {
    /// Pipeline stage that produced the error.
    pub fn stage(&self) -> &'static str {
        match self {
            ReportError::Network { .. } => "fetch",
            ReportError::Parse { .. } | ReportError::Schema { .. } => "extract",
            ReportError::Io { .. } => "export",
            ReportError::Config { .. } => "config",
        }
    }

    pub(crate) fn parse(reason: impl Into<String>, text: &str) -> Self {
        ReportError::Parse {
            reason: reason.into(),
            snippet: snippet(text),
        }
    }

    pub(crate) fn io(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        ReportError::Io {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// First `SNIPPET_LEN` characters of `text`, cut on a char boundary.
fn snippet(text: &str) -> String {
    match text.char_indices().nth(SNIPPET_LEN) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
