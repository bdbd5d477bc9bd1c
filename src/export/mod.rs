// src/export/mod.rs

pub mod columnar;
pub mod sheet;

use serde_json::Value;
use std::borrow::Cow;

pub use columnar::write_parquet;
pub use sheet::write_spreadsheet;

/// Largest integer an f64 holds exactly; bigger numbers are written as text.
const MAX_EXACT_INT: u64 = 1 << 53;

/// How one JSON value lands in an output cell.
#[derive(Debug, PartialEq)]
pub enum Cell<'a> {
    Blank,
    Text(Cow<'a, str>),
    Number(f64),
    Bool(bool),
}

impl<'a> Cell<'a> {
    /// Map a (possibly absent) JSON value to a cell.
    /// Arrays and objects are kept as compact JSON text.
    pub fn from_value(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => Cell::Blank,
            Some(Value::Bool(b)) => Cell::Bool(*b),
            Some(Value::String(s)) => Cell::Text(Cow::Borrowed(s)),
            Some(Value::Number(n)) => {
                let exact = n
                    .as_u64()
                    .map(|u| u <= MAX_EXACT_INT)
                    .or_else(|| n.as_i64().map(|i| i.unsigned_abs() <= MAX_EXACT_INT))
                    .unwrap_or(true);
                match n.as_f64() {
                    Some(f) if exact => Cell::Number(f),
                    _ => Cell::Text(Cow::Owned(n.to_string())),
                }
            }
            Some(v @ (Value::Array(_) | Value::Object(_))) => Cell::Text(Cow::Owned(v.to_string())),
        }
    }

    /// Text rendering used by the all-string columnar copy; `None` for blanks.
    pub fn into_text(self) -> Option<String> {
        match self {
            Cell::Blank => None,
            Cell::Text(s) => Some(s.into_owned()),
            Cell::Number(f) => Some(f.to_string()),
            Cell::Bool(b) => Some(b.to_string()),
        }
    }
}
