//! Column-name normalization.

use std::collections::HashMap;

use crate::error::{CleaningError, CleaningResult};
use crate::types::Table;

/// Normalize a single column name: trim, lowercase, spaces to underscores.
///
/// Only the space character is replaced; other interior whitespace is kept.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Rename every column with [`normalize_column_name`]. Rows are untouched.
///
/// Fails with [`CleaningError::ColumnCollision`] if two columns end up with the same name.
pub fn normalize_column_names(table: &Table) -> CleaningResult<Table> {
    let names: Vec<String> = table
        .schema
        .column_names()
        .map(normalize_column_name)
        .collect();

    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(names.len());
    for (idx, name) in names.iter().enumerate() {
        if let Some(&first) = seen.get(name.as_str()) {
            return Err(CleaningError::ColumnCollision {
                column: name.clone(),
                originals: vec![
                    table.schema.columns[first].name.clone(),
                    table.schema.columns[idx].name.clone(),
                ],
            });
        }
        seen.insert(name.as_str(), idx);
    }

    Ok(table.with_column_names(names))
}
