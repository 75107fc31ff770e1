//! Loading the raw source table.
//!
//! The source is a delimited text file with a header row; see [`csv::read_csv_from_path`].
//! Writing the cleaned table lives in [`crate::export`].

pub mod csv;

pub use self::csv::{read_csv_from_path, read_csv_from_reader};
