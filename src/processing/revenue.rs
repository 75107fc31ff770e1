//! Derived `revenue` column.

use crate::error::CleaningResult;
use crate::types::{Column, Table, Value};

/// Name of the derived column.
pub const REVENUE_COLUMN: &str = "revenue";

/// Round to 2 decimal places, ties to even on the value scaled by 100.
///
/// `0.125 -> 0.12`, `0.375 -> 0.38`, `1.005 -> 1.0` (the last because `1.005` is stored just
/// below the tie).
pub fn round_cents(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}

/// Append (or overwrite) `revenue = round_cents(price * qty)`.
///
/// Runs after all filtering, so `price`/`qty` are present; a non-numeric cell still yields
/// [`Value::Missing`] instead of a panic. A product that overflows to infinity is also
/// [`Value::Missing`].
pub fn add_revenue(table: &Table) -> CleaningResult<Table> {
    let price = table.schema.require("add_revenue", "price")?;
    let qty = table.schema.require("add_revenue", "qty")?;

    Ok(
        table.with_derived_column(Column::number(REVENUE_COLUMN), |row| {
            match (row[price].as_number(), row[qty].as_number()) {
                (Some(p), Some(q)) => {
                    let revenue = round_cents(p * q);
                    if revenue.is_finite() {
                        Value::Number(revenue)
                    } else {
                        Value::Missing
                    }
                }
                _ => Value::Missing,
            }
        }),
    )
}
