//! Writing the cleaned table.
//!
//! Output uses the same conventions as input: comma-delimited, header row first, fields quoted
//! only when needed.

pub mod csv;

pub use self::csv::{write_csv_to_path, write_csv_to_writer};
