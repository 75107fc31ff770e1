use std::fs;

use sales_clean::ingestion::read_csv_from_path;
use sales_clean::pipeline::{clean_file, CleaningPipeline, CleaningRequest, PipelineOptions};
use sales_clean::processing::{round_cents, Stage};
use sales_clean::types::{Column, ColumnType, Schema, Table, Value};
use sales_clean::CleaningError;

fn text_row(cells: [&str; 4]) -> Vec<Value> {
    cells.into_iter().map(|c| Value::text(c)).collect()
}

fn example_table() -> Table {
    let schema = Schema::new(vec![
        Column::text("ProdName"),
        Column::text("Category"),
        Column::text("Price"),
        Column::text("Qty"),
    ]);
    Table::new(
        schema,
        vec![
            text_row(["  Laptop ", "electronics", "999.99", "2"]),
            text_row(["Laptop", "Electronics", "999.99", "2"]),
            text_row(["Mouse", "electronics", "-5", "1"]),
            text_row(["Keyboard", "electronics", "49.99", "0"]),
            text_row(["Tablet", "electronics", "abc", "3"]),
        ],
    )
}

#[test]
fn example_input_yields_single_laptop_row() {
    let out = CleaningPipeline::default().run(example_table()).unwrap();

    assert_eq!(
        out.table.schema.column_names().collect::<Vec<_>>(),
        vec!["prodname", "category", "price", "qty", "revenue"]
    );
    assert_eq!(
        out.table.rows,
        vec![vec![
            Value::text("Laptop"),
            Value::text("Electronics"),
            Value::Number(999.99),
            Value::Number(2.0),
            Value::Number(1999.98),
        ]]
    );

    let r = &out.report;
    assert_eq!(r.rows_loaded, 5);
    assert_eq!(r.columns_before, vec!["ProdName", "Category", "Price", "Qty"]);
    assert_eq!(r.columns_after, vec!["prodname", "category", "price", "qty"]);
    assert_eq!(r.dropped_by(Stage::DropMissing), 1);
    assert_eq!(r.dropped_by(Stage::DropInvalid), 2);
    assert_eq!(r.dropped_by(Stage::DropDuplicates), 1);
    assert_eq!(r.rows_out, 1);
    assert_eq!(r.stages.len(), 8);
}

#[test]
fn surviving_rows_satisfy_output_invariants() {
    let raw = read_csv_from_path("tests/fixtures/sales_raw.csv").unwrap();
    let out = CleaningPipeline::default().run(raw).unwrap();
    let t = &out.table;

    assert!(t.is_rectangular());
    let price = t.schema.index_of("price").unwrap();
    let qty = t.schema.index_of("qty").unwrap();
    let revenue = t.schema.index_of("revenue").unwrap();
    assert_eq!(t.schema.columns[revenue].column_type, ColumnType::Number);

    for row in &t.rows {
        let p = row[price].as_number().unwrap();
        let q = row[qty].as_number().unwrap();
        assert!(p > 0.0 && q > 0.0);
        assert_eq!(row[revenue], Value::Number(round_cents(p * q)));
    }
}

#[test]
fn clean_file_writes_expected_csv() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("clean.csv");

    let report = clean_file("tests/fixtures/sales_raw.csv", &output, &PipelineOptions::default())
        .unwrap();

    let written = fs::read_to_string(&output).unwrap();
    let expected = fs::read_to_string("tests/fixtures/sales_clean_expected.csv").unwrap();
    assert_eq!(written, expected);

    assert_eq!(report.rows_loaded, 9);
    assert_eq!(report.rows_out, 4);
    assert_eq!(report.dropped_by(Stage::DropMissing), 2);
    assert_eq!(report.dropped_by(Stage::DropInvalid), 2);
    assert_eq!(report.dropped_by(Stage::DropDuplicates), 1);
    assert_eq!(report.destination.as_deref(), Some(output.as_path()));
    assert_eq!(report.preview.rows.len(), 4);
}

#[test]
fn cleaning_cleaned_output_is_a_fixed_point() {
    let dir = tempfile::tempdir().unwrap();
    let once = dir.path().join("once.csv");
    let twice = dir.path().join("twice.csv");

    clean_file("tests/fixtures/sales_raw.csv", &once, &PipelineOptions::default()).unwrap();
    let report = CleaningRequest::new(&once, &twice).run().unwrap();

    assert_eq!(report.total_dropped(), 0);
    assert_eq!(
        fs::read_to_string(&once).unwrap(),
        fs::read_to_string(&twice).unwrap()
    );
}

#[test]
fn missing_required_column_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("clean.csv");

    let err = clean_file("tests/fixtures/no_qty.csv", &output, &PipelineOptions::default())
        .unwrap_err();

    match err {
        CleaningError::MissingColumn { stage, column } => {
            assert_eq!(stage, "coerce_numeric");
            assert_eq!(column, "qty");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!output.exists());
}

#[test]
fn unwritable_destination_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("no_such_dir").join("clean.csv");

    let err = clean_file("tests/fixtures/sales_raw.csv", &output, &PipelineOptions::default())
        .unwrap_err();
    assert!(matches!(err, CleaningError::Io(_)));
    assert!(!output.exists());
}

#[test]
fn failed_run_leaves_existing_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("clean.csv");
    fs::write(&output, "previous run\n").unwrap();

    let _ = clean_file("tests/fixtures/no_qty.csv", &output, &PipelineOptions::default())
        .unwrap_err();
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous run\n");
}

#[test]
fn ragged_table_is_rejected_before_any_stage() {
    let schema = Schema::new(vec![
        Column::text("prodname"),
        Column::text("price"),
        Column::text("qty"),
    ]);
    let table = Table::new(
        schema,
        vec![
            vec![Value::text("Lamp"), Value::text("3"), Value::text("1")],
            vec![Value::text("Desk"), Value::text("3")],
        ],
    );

    let err = CleaningPipeline::default().run(table).unwrap_err();
    match err {
        CleaningError::RaggedRow {
            row,
            expected,
            found,
        } => {
            assert_eq!(row, 1);
            assert_eq!(expected, 3);
            assert_eq!(found, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}
