// src/export/columnar.rs

use arrow::{
    array::{ArrayRef, StringArray},
    datatypes::{DataType, Field, Schema},
    error::ArrowError,
    record_batch::RecordBatch,
};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::{fs, fs::File, io, path::Path, sync::Arc};
use tracing::{info, warn};

use super::Cell;
use crate::error::{ReportError, Result};
use crate::extract::ReportTable;

/// One nullable Utf8 column per table column, cells rendered as text.
pub fn to_record_batch(table: &ReportTable) -> std::result::Result<RecordBatch, ArrowError> {
    let fields: Vec<Field> = table
        .columns()
        .iter()
        .map(|name| Field::new(name, DataType::Utf8, true))
        .collect();

    let arrays: Vec<ArrayRef> = table
        .columns()
        .iter()
        .map(|name| {
            let values: StringArray = table
                .rows()
                .iter()
                .map(|row| Cell::from_value(row.get(name)).into_text())
                .collect();
            Arc::new(values) as ArrayRef
        })
        .collect();

    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
}

/// Write `table` as a Snappy-compressed Parquet file at `path`.
/// Goes through a temp file renamed into place.
pub fn write_parquet(table: &ReportTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let batch = to_record_batch(table).map_err(|e| ReportError::io(path, e))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ReportError::io(path, e))?;
    }

    let tmp_path = path.with_extension("parquet.tmp");
    let written = write_batch(&batch, &tmp_path)
        .and_then(|()| fs::rename(&tmp_path, path).map_err(|e| ReportError::io(path, e)));
    if let Err(e) = written {
        // never leave a half-written temp file behind
        if let Err(rm) = fs::remove_file(&tmp_path) {
            if rm.kind() != io::ErrorKind::NotFound {
                warn!(path = %tmp_path.display(), error = %rm, "could not remove temp file");
            }
        }
        return Err(e);
    }

    info!(
        path = %path.display(),
        rows = batch.num_rows(),
        columns = batch.num_columns(),
        "wrote parquet copy"
    );
    Ok(())
}

fn write_batch(batch: &RecordBatch, tmp_path: &Path) -> Result<()> {
    let file = File::create(tmp_path).map_err(|e| ReportError::io(tmp_path, e))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))
        .map_err(|e| ReportError::io(tmp_path, e))?;
    writer.write(batch).map_err(|e| ReportError::io(tmp_path, e))?;
    writer.close().map_err(|e| ReportError::io(tmp_path, e))?;
    Ok(())
}
