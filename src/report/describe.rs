//! Descriptive statistics for numeric columns.

use serde::Serialize;

use crate::types::Table;

/// Count, mean, sample standard deviation, min, quartiles and max of one numeric column.
///
/// Missing and non-numeric cells are ignored. Every statistic is `None` when there are no
/// numbers; `std` also needs at least two.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub q25: Option<f64>,
    #[serde(rename = "50%")]
    pub median: Option<f64>,
    #[serde(rename = "75%")]
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Summarize `column`. Returns `None` if the column does not exist.
pub fn describe(table: &Table, column: &str) -> Option<ColumnSummary> {
    let idx = table.schema.index_of(column)?;

    let mut values: Vec<f64> = table
        .column_values(idx)
        .filter_map(|v| v.as_number())
        .collect();
    values.sort_by(f64::total_cmp);

    let count = values.len();
    let mean = (count > 0).then(|| values.iter().sum::<f64>() / count as f64);
    let std = match mean {
        Some(m) if count > 1 => {
            let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
            Some((ss / (count - 1) as f64).sqrt())
        }
        _ => None,
    };

    Some(ColumnSummary {
        column: column.to_owned(),
        count,
        mean,
        std,
        min: values.first().copied(),
        q25: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: values.last().copied(),
    })
}

/// Quantile `q` (0..=1) of an ascending slice, linearly interpolating between neighbours.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let pos = q.clamp(0.0, 1.0) * last as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

#[cfg(test)]
mod tests {
    use super::{describe, quantile};
    use crate::types::{Column, Schema, Table, Value};

    fn approx(a: Option<f64>, b: f64) -> bool {
        matches!(a, Some(v) if (v - b).abs() < 1e-9)
    }

    #[test]
    fn quantile_interpolates() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert!(approx(quantile(&v, 0.25), 1.75));
        assert!(approx(quantile(&v, 0.5), 2.5));
        assert!(approx(quantile(&v, 0.75), 3.25));
        assert!(approx(quantile(&v, 0.0), 1.0));
        assert!(approx(quantile(&v, 1.0), 4.0));
        assert_eq!(quantile(&[], 0.5), None);
        assert!(approx(quantile(&[7.0], 0.75), 7.0));
    }

    #[test]
    fn describe_ignores_missing_and_sorts() {
        let schema = Schema::new(vec![Column::number("qty")]);
        let t = Table::new(
            schema,
            vec![
                vec![Value::Number(4.0)],
                vec![Value::Missing],
                vec![Value::Number(1.0)],
                vec![Value::Number(3.0)],
                vec![Value::Number(2.0)],
            ],
        );

        let s = describe(&t, "qty").unwrap();
        assert_eq!(s.count, 4);
        assert!(approx(s.mean, 2.5));
        assert!(approx(s.std, 1.290_994_448_735_805_6));
        assert_eq!(s.min, Some(1.0));
        assert!(approx(s.median, 2.5));
        assert_eq!(s.max, Some(4.0));
    }

    #[test]
    fn describe_handles_empty_and_unknown_columns() {
        let schema = Schema::new(vec![Column::number("price")]);
        let t = Table::new(schema, vec![]);

        let s = describe(&t, "price").unwrap();
        assert_eq!(s.count, 0);
        assert_eq!(s.mean, None);
        assert_eq!(s.std, None);
        assert_eq!(s.q25, None);
        assert!(describe(&t, "revenue").is_none());
    }
}
