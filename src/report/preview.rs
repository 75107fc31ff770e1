//! Head-of-table preview.

use std::fmt;

use serde::Serialize;

use crate::types::Table;

/// The first rows of a table, rendered as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Take the first `n` rows of `table`.
pub fn preview(table: &Table, n: usize) -> Preview {
    Preview {
        columns: table.schema.column_names().map(str::to_owned).collect(),
        rows: table
            .rows
            .iter()
            .take(n)
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect(),
    }
}

/// Left-aligned, space-padded columns with a header line.
impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        write_line(f, &self.columns, &widths)?;
        for row in &self.rows {
            write_line(f, row, &widths)?;
        }
        Ok(())
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(f, "{}", line.trim_end())
}
