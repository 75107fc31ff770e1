//! Cleaning stages.
//!
//! Each stage is a pure `&Table -> CleaningResult<Table>` function. [`STAGES`] lists them in the
//! order the pipeline applies them; [`Stage::apply`] dispatches to the implementation.
//!
//! | # | stage                      | effect                                             |
//! |---|----------------------------|----------------------------------------------------|
//! | 1 | [`Stage::NormalizeColumnNames`] | trim/lowercase/underscore column names        |
//! | 2 | [`Stage::NormalizeText`]   | strip quotes, trim and collapse whitespace in text |
//! | 3 | [`Stage::StandardizeText`] | title-case `category` and `prodname`               |
//! | 4 | [`Stage::CoerceNumeric`]   | `price`/`qty` to numbers, unparsable to `Missing`  |
//! | 5 | [`Stage::DropMissing`]     | drop rows missing `price` or `qty`                 |
//! | 6 | [`Stage::DropInvalid`]     | drop rows with `price <= 0` or `qty <= 0`          |
//! | 7 | [`Stage::DropDuplicates`]  | keep first row per `(prodname, price, qty)`        |
//! | 8 | [`Stage::AddRevenue`]      | append `revenue = round(price * qty, 2)`           |
//!
//! ## Example
//!
//! ```rust
//! use sales_clean::processing::STAGES;
//! use sales_clean::types::{Column, Schema, Table, Value};
//!
//! let schema = Schema::new(vec![
//!     Column::text("ProdName"),
//!     Column::text("Price"),
//!     Column::text("Qty"),
//! ]);
//! let mut table = Table::new(
//!     schema,
//!     vec![vec![Value::text(" mouse "), Value::text("19.99"), Value::text("2")]],
//! );
//! for stage in STAGES {
//!     table = stage.apply(&table).unwrap();
//! }
//! assert_eq!(table.rows[0][0], Value::text("Mouse"));
//! assert_eq!(table.rows[0][3], Value::Number(39.98));
//! ```

pub mod coerce;
pub mod columns;
pub mod dedup;
pub mod filter;
pub mod revenue;
pub mod text;

use std::fmt;

use serde::Serialize;

use crate::error::CleaningResult;
use crate::types::Table;

pub use coerce::{coerce_number, coerce_numeric_columns};
pub use columns::{normalize_column_name, normalize_column_names};
pub use dedup::drop_duplicates;
pub use filter::{drop_invalid, drop_missing};
pub use revenue::{add_revenue, round_cents};
pub use text::{normalize_text, normalize_text_columns, standardize_text_fields, title_case};

/// One step of the cleaning pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Column names to `lower_snake` form.
    NormalizeColumnNames,
    /// Quote/whitespace cleanup of every text column.
    NormalizeText,
    /// Title-casing of `category` and `prodname`.
    StandardizeText,
    /// `price`/`qty` to numbers.
    CoerceNumeric,
    /// Drop rows with a missing `price` or `qty`.
    DropMissing,
    /// Drop rows with a non-positive `price` or `qty`.
    DropInvalid,
    /// Drop repeated `(prodname, price, qty)` keys.
    DropDuplicates,
    /// Append `revenue`.
    AddRevenue,
}

/// All stages, in execution order.
pub const STAGES: [Stage; 8] = [
    Stage::NormalizeColumnNames,
    Stage::NormalizeText,
    Stage::StandardizeText,
    Stage::CoerceNumeric,
    Stage::DropMissing,
    Stage::DropInvalid,
    Stage::DropDuplicates,
    Stage::AddRevenue,
];

impl Stage {
    /// Stable identifier, used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::NormalizeColumnNames => "normalize_column_names",
            Self::NormalizeText => "normalize_text",
            Self::StandardizeText => "standardize_text",
            Self::CoerceNumeric => "coerce_numeric",
            Self::DropMissing => "drop_missing",
            Self::DropInvalid => "drop_invalid",
            Self::DropDuplicates => "drop_duplicates",
            Self::AddRevenue => "add_revenue",
        }
    }

    /// Whether this stage may remove rows.
    pub fn is_filter(self) -> bool {
        matches!(
            self,
            Self::DropMissing | Self::DropInvalid | Self::DropDuplicates
        )
    }

    /// Run the stage on `table`, producing a new table.
    pub fn apply(self, table: &Table) -> CleaningResult<Table> {
        match self {
            Self::NormalizeColumnNames => normalize_column_names(table),
            Self::NormalizeText => normalize_text_columns(table),
            Self::StandardizeText => standardize_text_fields(table),
            Self::CoerceNumeric => coerce_numeric_columns(table),
            Self::DropMissing => drop_missing(table),
            Self::DropInvalid => drop_invalid(table),
            Self::DropDuplicates => drop_duplicates(table),
            Self::AddRevenue => add_revenue(table),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
