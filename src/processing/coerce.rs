//! Numeric coercion for `price` and `qty`.

use crate::error::CleaningResult;
use crate::types::{ColumnType, Table, Value};

/// Columns reinterpreted as numbers.
pub const NUMERIC_COLUMNS: [&str; 2] = ["price", "qty"];

const STAGE: &str = "coerce_numeric";

/// Parse a raw cell into a number.
///
/// This never fails: text that does not parse as a finite decimal number (including empty text,
/// `NaN` and infinities) becomes [`Value::Missing`]. Rows are dropped later, by the filters.
pub fn coerce_number(raw: &str) -> Value {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Value::Number(v),
        _ => Value::Missing,
    }
}

/// Retype `price` and `qty` as [`ColumnType::Number`], coercing each cell with
/// [`coerce_number`]. Cells that are already numeric or missing are kept.
///
/// Both columns are required.
pub fn coerce_numeric_columns(table: &Table) -> CleaningResult<Table> {
    let idxs = NUMERIC_COLUMNS
        .iter()
        .map(|name| table.schema.require(STAGE, name))
        .collect::<CleaningResult<Vec<_>>>()?;

    let mut out = table.clone();
    for idx in idxs {
        out = out.map_column(idx, ColumnType::Number, |cell| match cell {
            Value::Text(s) => coerce_number(s),
            other => other.clone(),
        });
    }
    Ok(out)
}
