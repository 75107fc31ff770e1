//! CSV loading.

use std::path::Path;

use crate::error::CleaningResult;
use crate::types::{Column, Schema, Table, Value};

/// Load a CSV file into an in-memory [`Table`].
///
/// Rules:
///
/// - The CSV must have a header row; header names are kept verbatim (no trimming or casing).
/// - Every column is loaded as [`crate::types::ColumnType::Text`] and every cell keeps its raw
///   text; normalization is the pipeline's job.
/// - Quoted fields follow RFC 4180. A row with a different field count than the header is an
///   error.
///
/// The file handle is closed before this function returns, on success or failure.
pub fn read_csv_from_path(path: impl AsRef<Path>) -> CleaningResult<Table> {
    let mut rdr = reader_builder().from_path(path)?;
    read_csv_from_reader(&mut rdr)
}

/// Load CSV data from an existing CSV reader.
pub fn read_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> CleaningResult<Table> {
    let headers = rdr.headers()?.clone();
    let schema = Schema::new(headers.iter().map(|h| Column::text(h)).collect());

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(|cell| Value::text(cell)).collect());
    }

    Ok(Table::new(schema, rows))
}

/// Reader settings shared by path- and reader-based loading.
pub fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::None);
    builder
}
