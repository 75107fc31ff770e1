//! Row filters on the numeric fields.

use crate::error::CleaningResult;
use crate::types::{Table, Value};

/// Drop every row whose `price` or `qty` is [`Value::Missing`].
pub fn drop_missing(table: &Table) -> CleaningResult<Table> {
    let price = table.schema.require("drop_missing", "price")?;
    let qty = table.schema.require("drop_missing", "qty")?;

    Ok(table.filter_rows(|row| !row[price].is_missing() && !row[qty].is_missing()))
}

/// Drop every row whose `price` or `qty` is not strictly positive.
///
/// Cells that are not numbers at all count as invalid.
pub fn drop_invalid(table: &Table) -> CleaningResult<Table> {
    let price = table.schema.require("drop_invalid", "price")?;
    let qty = table.schema.require("drop_invalid", "qty")?;

    Ok(table.filter_rows(|row| is_positive(&row[price]) && is_positive(&row[qty])))
}

fn is_positive(cell: &Value) -> bool {
    matches!(cell.as_number(), Some(v) if v > 0.0)
}
