//! Duplicate removal on `(prodname, price, qty)`.

use std::collections::HashSet;

use crate::error::CleaningResult;
use crate::types::{Table, Value};

/// Columns forming the duplicate-detection key, in key order.
pub const KEY_COLUMNS: [&str; 3] = ["prodname", "price", "qty"];

/// Hashable form of one key cell. Numbers compare by exact bit pattern, which is value equality
/// for the finite, positive numbers that reach this stage.
#[derive(Debug, PartialEq, Eq, Hash)]
enum KeyPart<'a> {
    Missing,
    Number(u64),
    Text(&'a str),
}

impl<'a> From<&'a Value> for KeyPart<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Missing => Self::Missing,
            Value::Number(v) => Self::Number(v.to_bits()),
            Value::Text(s) => Self::Text(s),
        }
    }
}

/// Keep the first row for each `(prodname, price, qty)` key and drop the rest.
///
/// Other columns (`category`, dates, ...) do not take part in the comparison. Survivors keep their
/// relative order.
pub fn drop_duplicates(table: &Table) -> CleaningResult<Table> {
    let idxs = KEY_COLUMNS
        .iter()
        .map(|name| table.schema.require("drop_duplicates", name))
        .collect::<CleaningResult<Vec<_>>>()?;

    let mut seen: HashSet<Vec<KeyPart<'_>>> = HashSet::with_capacity(table.row_count());
    let keep: Vec<bool> = table
        .rows
        .iter()
        .map(|row| seen.insert(idxs.iter().map(|&i| KeyPart::from(&row[i])).collect()))
        .collect();

    let mut flags = keep.into_iter();
    Ok(table.filter_rows(|_| flags.next().unwrap_or(false)))
}

#[cfg(test)]
mod tests {
    use super::drop_duplicates;
    use crate::types::{Column, Schema, Table, Value};

    fn row(name: &str, category: &str, price: f64, qty: f64) -> Vec<Value> {
        vec![
            Value::text(name),
            Value::text(category),
            Value::Number(price),
            Value::Number(qty),
        ]
    }

    fn schema() -> Schema {
        Schema::new(vec![
            Column::text("prodname"),
            Column::text("category"),
            Column::number("price"),
            Column::number("qty"),
        ])
    }

    #[test]
    fn keeps_first_occurrence_ignoring_category() {
        let t = Table::new(
            schema(),
            vec![
                row("Laptop", "Electronics", 999.99, 2.0),
                row("Mouse", "Electronics", 19.99, 1.0),
                row("Laptop", "Computers", 999.99, 2.0),
                row("Laptop", "Electronics", 999.99, 3.0),
            ],
        );

        let out = drop_duplicates(&t).unwrap();
        assert_eq!(
            out.rows,
            vec![
                row("Laptop", "Electronics", 999.99, 2.0),
                row("Mouse", "Electronics", 19.99, 1.0),
                row("Laptop", "Electronics", 999.99, 3.0),
            ]
        );
    }

    #[test]
    fn text_and_number_parts_are_compared_exactly() {
        let t = Table::new(
            schema(),
            vec![
                row("Laptop", "a", 10.0, 1.0),
                row("laptop", "a", 10.0, 1.0),
                row("Laptop", "a", 10.000_000_1, 1.0),
            ],
        );
        assert_eq!(drop_duplicates(&t).unwrap().row_count(), 3);
    }

    #[test]
    fn prodname_is_required() {
        let schema = Schema::new(vec![Column::number("price"), Column::number("qty")]);
        let t = Table::new(schema, vec![]);
        let err = drop_duplicates(&t).unwrap_err();
        assert!(err.to_string().contains("'prodname'"));
    }
}
