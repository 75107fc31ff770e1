//! `sales-clean` turns a raw, inconsistently formatted sales transaction CSV into a clean,
//! analysis-ready table.
//!
//! The primary entrypoint is [`pipeline::clean_file`], which loads a CSV, runs the fixed chain of
//! cleaning stages and writes the result. [`pipeline::CleaningPipeline`] runs the same stages on
//! an in-memory [`types::Table`].
//!
//! ## What the pipeline does
//!
//! Stages run in this order (see [`processing`]):
//!
//! 1. column names: trimmed, lowercased, spaces to underscores (`" Unit Price"` -> `unit_price`)
//! 2. text cells: `"` removed, trimmed, whitespace runs collapsed
//! 3. `category` and `prodname` title-cased, when present
//! 4. `price` and `qty` parsed as numbers; unparsable text becomes [`types::Value::Missing`]
//! 5. rows missing `price` or `qty` dropped
//! 6. rows with `price <= 0` or `qty <= 0` dropped
//! 7. duplicate `(prodname, price, qty)` rows dropped, first occurrence kept
//! 8. `revenue = round(price * qty, 2)` appended, rounding half to even
//!
//! Missing `price`/`qty`/`prodname` columns, unreadable input and unwritable output are fatal
//! ([`CleaningError`]); bad cells and rows never are. They are excluded and counted in the
//! [`report::PipelineReport`].
//!
//! ## Quick example: clean a file
//!
//! ```no_run
//! use sales_clean::pipeline::{clean_file, PipelineOptions};
//!
//! # fn main() -> Result<(), sales_clean::CleaningError> {
//! let report = clean_file(
//!     "data/raw/sales_data_raw.csv",
//!     "data/processed/sales_data_clean.csv",
//!     &PipelineOptions::default(),
//! )?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```
//!
//! ## In-memory example
//!
//! ```rust
//! use sales_clean::pipeline::CleaningPipeline;
//! use sales_clean::types::{Column, Schema, Table, Value};
//!
//! let raw = Table::new(
//!     Schema::new(vec![
//!         Column::text("ProdName"),
//!         Column::text("Category"),
//!         Column::text("Price"),
//!         Column::text("Qty"),
//!     ]),
//!     [
//!         ["  Laptop ", "electronics", "999.99", "2"],
//!         ["Laptop", "Electronics", "999.99", "2"],
//!         ["Mouse", "electronics", "-5", "1"],
//!     ]
//!     .into_iter()
//!     .map(|row| row.into_iter().map(|cell| Value::text(cell)).collect())
//!     .collect(),
//! );
//!
//! let out = CleaningPipeline::default().run(raw).unwrap();
//! assert_eq!(out.table.row_count(), 1);
//! assert_eq!(out.table.rows[0][4], Value::Number(1999.98));
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: CSV loading into a [`types::Table`]
//! - [`processing`]: the eight cleaning stages
//! - [`pipeline`]: the driver, options and observer hooks
//! - [`export`]: CSV writing
//! - [`report`]: diagnostics (row counts, preview, descriptive statistics)
//! - [`types`]: table, schema and cell types
//! - [`error`]: the error type shared by everything above

pub mod error;
pub mod export;
pub mod ingestion;
pub mod pipeline;
pub mod processing;
pub mod report;
pub mod types;

pub use error::{CleaningError, CleaningResult};
