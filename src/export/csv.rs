//! CSV writing.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::CleaningResult;
use crate::types::Table;

/// Write `table` as CSV (header row first) to `path`.
///
/// The table is written to a temporary file next to `path` and renamed over it only once every
/// row has been written and flushed, so a failure leaves no partial output behind. The
/// destination directory must already exist.
pub fn write_csv_to_path(table: &Table, path: impl AsRef<Path>) -> CleaningResult<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut wtr = csv::Writer::from_writer(tmp.as_file());
        write_csv_to_writer(&mut wtr, table)?;
        wtr.flush()?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Write `table` to an existing CSV writer. `Missing` cells become empty fields.
pub fn write_csv_to_writer<W: Write>(
    wtr: &mut csv::Writer<W>,
    table: &Table,
) -> CleaningResult<()> {
    wtr.write_record(table.schema.column_names())?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(ToString::to_string))?;
    }
    Ok(())
}
