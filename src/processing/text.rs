//! Text cleanup: quote/whitespace normalization and title-casing.

use crate::error::CleaningResult;
use crate::types::{ColumnType, Table, Value};

/// Columns that get title-cased by [`standardize_text_fields`], when present.
pub const TITLE_CASE_COLUMNS: [&str; 2] = ["category", "prodname"];

/// Remove every `"`, trim, and collapse whitespace runs to a single space.
pub fn normalize_text(raw: &str) -> String {
    raw.replace('"', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first letter of every whitespace-separated word. Other letters are kept.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Apply [`normalize_text`] to every cell of every [`ColumnType::Text`] column.
pub fn normalize_text_columns(table: &Table) -> CleaningResult<Table> {
    let text_cols: Vec<bool> = table
        .schema
        .columns
        .iter()
        .map(|c| c.column_type == ColumnType::Text)
        .collect();

    Ok(table.map_rows(|row| {
        row.iter()
            .zip(&text_cols)
            .map(|(cell, &is_text)| match cell {
                Value::Text(s) if is_text => Value::Text(normalize_text(s)),
                other => other.clone(),
            })
            .collect()
    }))
}

/// Title-case the `category` and `prodname` columns. A missing column is skipped.
pub fn standardize_text_fields(table: &Table) -> CleaningResult<Table> {
    let mut out = table.clone();
    for name in TITLE_CASE_COLUMNS {
        let Some(idx) = out.schema.index_of(name) else {
            continue;
        };
        out = out.map_column(idx, ColumnType::Text, |cell| match cell {
            Value::Text(s) => Value::Text(title_case(s)),
            other => other.clone(),
        });
    }
    Ok(out)
}
