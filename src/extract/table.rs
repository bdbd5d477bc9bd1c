// src/extract/table.rs

use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::error::{ReportError, Result};

/// Name of the provenance column added to every row.
pub const URL_COLUMN: &str = "url";

/// One flattened report row: field name → JSON value.
pub type Record = Map<String, Value>;

/// Rows flattened from every record batch, plus the union of their columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    /// Field names in first-seen order, `url` last.
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl ReportTable {
    /// Append every object of every batch as a row, then tag each row with `url`.
    ///
    /// `batches` must be an array of arrays of objects; `path` names it in errors.
    pub fn from_batches(batches: Value, path: &str, url: &str) -> Result<Self> {
        let batches = match batches {
            Value::Array(items) => items,
            other => return Err(schema_error(path.to_string(), "array", &other)),
        };

        let mut rows: Vec<Record> = Vec::new();
        for (i, batch) in batches.into_iter().enumerate() {
            let items = match batch {
                Value::Array(items) => items,
                other => return Err(schema_error(format!("{}[{}]", path, i), "array", &other)),
            };
            rows.reserve(items.len());
            for (j, item) in items.into_iter().enumerate() {
                match item {
                    Value::Object(record) => rows.push(record),
                    other => {
                        return Err(schema_error(
                            format!("{}[{}][{}]", path, i, j),
                            "object",
                            &other,
                        ))
                    }
                }
            }
        }

        for row in rows.iter_mut() {
            row.insert(URL_COLUMN.to_string(), Value::String(url.to_string()));
        }

        let columns = union_columns(&rows);
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of `column` in row `row`; `None` when the row lacks the field.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }
}

/// Union of the field names of `rows`, first-seen order, `url` moved last.
fn union_columns(rows: &[Record]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut columns = Vec::new();
    for key in rows.iter().flat_map(|r| r.keys()) {
        if key != URL_COLUMN && seen.insert(key.as_str()) {
            columns.push(key.clone());
        }
    }
    columns.push(URL_COLUMN.to_string());
    columns
}

/// Short name of a JSON value's type, for error messages.
pub fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn schema_error(path: String, expected: &'static str, found: &Value) -> ReportError {
    ReportError::Schema {
        path,
        expected,
        found: kind(found),
    }
}
