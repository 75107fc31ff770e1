//! Core data model: an ordered set of named, typed columns over row-major cell storage.
//!
//! Every value is loaded as [`Value::Text`]; the coercion stage is the only place a column changes
//! type, turning [`ColumnType::Text`] cells into [`Value::Number`] or [`Value::Missing`].

use std::fmt;

use serde::Serialize;

use crate::error::{CleaningError, CleaningResult};

/// Logical type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free text. Cells are [`Value::Text`].
    Text,
    /// Numeric. Cells are [`Value::Number`] or [`Value::Missing`].
    Number,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Number => f.write_str("number"),
        }
    }
}

/// A single named, typed column in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name (case-sensitive).
    pub name: String,
    /// Column type.
    pub column_type: ColumnType,
}

impl Column {
    /// Create a new column.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    /// Shorthand for a [`ColumnType::Text`] column.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Text)
    }

    /// Shorthand for a [`ColumnType::Number`] column.
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Number)
    }
}

/// Ordered list of columns describing a table's row shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered columns.
    pub columns: Vec<Column>,
}

impl Schema {
    /// Create a new schema from columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Iterate column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Returns the index of a column by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Like [`Self::index_of`], but a missing column is a fatal error attributed to `stage`.
    pub fn require(&self, stage: &'static str, name: &str) -> CleaningResult<usize> {
        self.index_of(name)
            .ok_or_else(|| CleaningError::missing_column(stage, name))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence of a valid value in a numeric column.
    Missing,
    /// Parsed number.
    Number(f64),
    /// Text.
    Text(String),
}

impl Value {
    /// Convenience constructor for text cells.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// The numeric payload, if this is a [`Value::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// The text payload, if this is a [`Value::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this is [`Value::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Renders the cell the way it is written to CSV: `Missing` is empty, numbers use the shortest
/// representation that round-trips.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => Ok(()),
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// In-memory table.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] columns. Every
/// operation here returns a new table and keeps one cell per column in every row.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    /// Whether every row has exactly one cell per schema column.
    pub fn is_rectangular(&self) -> bool {
        let width = self.schema.len();
        self.rows.iter().all(|row| row.len() == width)
    }

    /// Iterate the cells of one column, top to bottom.
    ///
    /// Yields nothing for an out-of-range index.
    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().filter_map(move |row| row.get(idx))
    }

    /// Create a new table containing only rows that match `predicate`, in their original order.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Create a new table by applying `mapper` to every row.
    ///
    /// # Panics
    ///
    /// Panics if `mapper` returns a row with a different length than the schema column count.
    pub fn map_rows<F>(&self, mut mapper: F) -> Self
    where
        F: FnMut(&[Value]) -> Vec<Value>,
    {
        let expected_len = self.schema.len();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let out = mapper(row.as_slice());
                assert!(
                    out.len() == expected_len,
                    "mapped row length {} does not match schema length {}",
                    out.len(),
                    expected_len
                );
                out
            })
            .collect();

        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Create a new table where column `idx` is rewritten cell by cell and retyped to
    /// `column_type`. Other columns are untouched.
    pub fn map_column<F>(&self, idx: usize, column_type: ColumnType, mut mapper: F) -> Self
    where
        F: FnMut(&Value) -> Value,
    {
        let mut schema = self.schema.clone();
        if let Some(col) = schema.columns.get_mut(idx) {
            col.column_type = column_type;
        }
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut out = row.clone();
                if let Some(cell) = out.get_mut(idx) {
                    *cell = mapper(cell);
                }
                out
            })
            .collect();
        Self { schema, rows }
    }

    /// Create a new table with the column list renamed, keeping types and cells.
    ///
    /// # Panics
    ///
    /// Panics if `names` does not have one entry per column.
    pub fn with_column_names(&self, names: Vec<String>) -> Self {
        assert!(
            names.len() == self.schema.len(),
            "renamed column count {} does not match schema length {}",
            names.len(),
            self.schema.len()
        );
        let columns = self
            .schema
            .columns
            .iter()
            .zip(names)
            .map(|(col, name)| Column::new(name, col.column_type))
            .collect();
        Self {
            schema: Schema::new(columns),
            rows: self.rows.clone(),
        }
    }

    /// Create a new table where column `column` holds one value computed per row.
    ///
    /// An existing column with that name is replaced in place; otherwise the column is appended.
    pub fn with_derived_column<F>(&self, column: Column, mut derive: F) -> Self
    where
        F: FnMut(&[Value]) -> Value,
    {
        let existing = self.schema.index_of(&column.name);
        let mut schema = self.schema.clone();
        match existing {
            Some(idx) => schema.columns[idx] = column,
            None => schema.columns.push(column),
        }

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let value = derive(row.as_slice());
                let mut out = row.clone();
                match existing {
                    Some(idx) => out[idx] = value,
                    None => out.push(value),
                }
                out
            })
            .collect();
        Self { schema, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::{Column, ColumnType, Schema, Table, Value};

    fn sample_table() -> Table {
        let schema = Schema::new(vec![Column::text("prodname"), Column::number("price")]);
        let rows = vec![
            vec![Value::text("Laptop"), Value::Number(999.99)],
            vec![Value::text("Mouse"), Value::Missing],
            vec![Value::text("Cable"), Value::Number(5.0)],
        ];
        Table::new(schema, rows)
    }

    #[test]
    fn schema_index_of_works() {
        let t = sample_table();
        assert_eq!(t.schema.index_of("prodname"), Some(0));
        assert_eq!(t.schema.index_of("price"), Some(1));
        assert_eq!(t.schema.index_of("Price"), None);
    }

    #[test]
    fn require_reports_stage_and_column() {
        let t = sample_table();
        let err = t.schema.require("coerce_numeric", "qty").unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required column 'qty' (stage: coerce_numeric)"
        );
    }

    #[test]
    fn filter_rows_is_stable() {
        let t = sample_table();
        let out = t.filter_rows(|row| !row[1].is_missing());
        assert_eq!(out.schema, t.schema);
        assert_eq!(
            out.rows,
            vec![
                vec![Value::text("Laptop"), Value::Number(999.99)],
                vec![Value::text("Cable"), Value::Number(5.0)],
            ]
        );
        // Original unchanged
        assert_eq!(t.row_count(), 3);
    }

    #[test]
    fn map_column_retypes_only_target_column() {
        let schema = Schema::new(vec![Column::text("a"), Column::text("b")]);
        let t = Table::new(schema, vec![vec![Value::text("1"), Value::text("x")]]);

        let out = t.map_column(0, ColumnType::Number, |v| match v.as_text() {
            Some(s) => s.parse().map(Value::Number).unwrap_or(Value::Missing),
            None => Value::Missing,
        });

        assert_eq!(out.schema.columns[0].column_type, ColumnType::Number);
        assert_eq!(out.schema.columns[1].column_type, ColumnType::Text);
        assert_eq!(out.rows[0], vec![Value::Number(1.0), Value::text("x")]);
    }

    #[test]
    fn with_derived_column_appends_or_replaces() {
        let t = sample_table();
        let appended = t.with_derived_column(Column::number("double"), |row| {
            row[1].as_number().map_or(Value::Missing, |v| Value::Number(v * 2.0))
        });
        assert_eq!(appended.column_count(), 3);
        assert!(appended.is_rectangular());
        assert_eq!(appended.rows[2][2], Value::Number(10.0));
        assert_eq!(appended.rows[1][2], Value::Missing);

        let replaced = t.with_derived_column(Column::number("price"), |_| Value::Number(1.0));
        assert_eq!(replaced.column_count(), 2);
        assert!(replaced.rows.iter().all(|r| r[1] == Value::Number(1.0)));
    }

    #[test]
    fn display_matches_csv_rendering() {
        assert_eq!(Value::Missing.to_string(), "");
        assert_eq!(Value::Number(2.0).to_string(), "2");
        assert_eq!(Value::Number(1999.98).to_string(), "1999.98");
        assert_eq!(Value::text("Laptop").to_string(), "Laptop");
    }

    #[test]
    #[should_panic(expected = "mapped row length")]
    fn map_rows_panics_if_mapper_returns_wrong_arity() {
        let t = sample_table();
        let _ = t.map_rows(|_row| vec![Value::Missing]);
    }
}
