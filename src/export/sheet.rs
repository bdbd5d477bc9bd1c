// src/export/sheet.rs

use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, XlsxError};
use std::{borrow::Cow, fs, path::Path};
use tracing::{info, warn};

use super::Cell;
use crate::error::{ReportError, Result};
use crate::extract::ReportTable;

/// Excel's hard limit on characters in one cell.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Write `table` as the only sheet of a new `.xlsx` workbook at `path`.
///
/// Row 0 holds the bolded column names; there is no index column.
pub fn write_spreadsheet(
    table: &ReportTable,
    path: impl AsRef<Path>,
    sheet_name: &str,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ReportError::io(path, e))?;
    }

    let mut workbook = build_workbook(table, sheet_name).map_err(|e| ReportError::io(path, e))?;
    workbook.save(path).map_err(|e| ReportError::io(path, e))?;

    info!(
        path = %path.display(),
        sheet = sheet_name,
        rows = table.len(),
        columns = table.columns().len(),
        "wrote spreadsheet"
    );
    Ok(())
}

fn build_workbook(table: &ReportTable, sheet_name: &str) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;

    for (c, name) in table.columns().iter().enumerate() {
        sheet.write_string_with_format(0, col_num(c)?, name, &header)?;
    }

    for (r, row) in table.rows().iter().enumerate() {
        let r = row_num(r + 1)?;
        for (c, name) in table.columns().iter().enumerate() {
            let c = col_num(c)?;
            match Cell::from_value(row.get(name)) {
                Cell::Blank => {}
                Cell::Text(s) => {
                    sheet.write_string(r, c, fit_cell(s, name))?;
                }
                Cell::Number(n) => {
                    sheet.write_number(r, c, n)?;
                }
                Cell::Bool(b) => {
                    sheet.write_boolean(r, c, b)?;
                }
            }
        }
    }

    Ok(workbook)
}

fn row_num(i: usize) -> std::result::Result<RowNum, XlsxError> {
    RowNum::try_from(i).map_err(|_| XlsxError::RowColumnLimitError)
}

fn col_num(i: usize) -> std::result::Result<ColNum, XlsxError> {
    ColNum::try_from(i).map_err(|_| XlsxError::RowColumnLimitError)
}

/// Cut `text` to [`MAX_CELL_CHARS`] characters.
fn fit_cell(text: Cow<'_, str>, column: &str) -> String {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((idx, _)) => {
            warn!(column, chars = text.chars().count(), "truncating oversized cell");
            text[..idx].to_string()
        }
        None => text.into_owned(),
    }
}
