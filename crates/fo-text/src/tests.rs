//! Tests for delimited text reading and writing

use super::*;

use fo_core::{Cell, CellKind, CoercionPolicy, DataError, NullableSeries, Table};

fn read(text: &str, options: &IngestOptions) -> Result<Table> {
    read_table(text.as_bytes(), options)
}

fn emit(table: &Table, options: &EmitOptions) -> String {
    let mut buffer = Vec::new();
    write_table(table, &mut buffer, options).unwrap();
    String::from_utf8(buffer).unwrap()
}

fn column(table: &Table, name: &str) -> Vec<Option<Cell>> {
    table.column(name).unwrap().values().to_vec()
}

#[test]
fn test_infer_cell_default_order() {
    let inference = TypeInference::FloatFirst;

    assert_eq!(infer_cell("", inference), None);
    assert_eq!(infer_cell("2", inference), Some(Cell::Float(2.0)));
    assert_eq!(infer_cell("-1.5", inference), Some(Cell::Float(-1.5)));
    assert_eq!(infer_cell("true", inference), Some(Cell::Bool(true)));
    assert_eq!(infer_cell("false", inference), Some(Cell::Bool(false)));
    assert_eq!(infer_cell("True", inference), Some(Cell::from("True")));
    assert_eq!(infer_cell("abc", inference), Some(Cell::from("abc")));
}

#[test]
fn test_infer_cell_narrowest() {
    let inference = TypeInference::Narrowest;

    assert_eq!(infer_cell("2", inference), Some(Cell::Int(2)));
    assert_eq!(infer_cell("2.5", inference), Some(Cell::Float(2.5)));
    assert_eq!(infer_cell("1e3", inference), Some(Cell::Float(1000.0)));
    assert_eq!(infer_cell("x1", inference), Some(Cell::from("x1")));
}

#[test]
fn test_read_with_header() {
    let text = "name,score,passed\nada,1.5,true\nbob,,false\n";
    let table = read(text, &IngestOptions::default()).unwrap();

    assert_eq!(table.shape(), (2, 3));
    assert_eq!(table.column_names(), vec!["name", "score", "passed"]);
    assert_eq!(column(&table, "score"), vec![Some(Cell::Float(1.5)), None]);
    assert_eq!(
        table.column("passed").unwrap().established_kind(),
        Some(CellKind::Bool)
    );
    assert_eq!(table.get_row(0).unwrap().get_str("name").unwrap(), Some("ada"));
}

#[test]
fn test_read_pads_short_records() {
    let text = "a,b,c\n1,2\n";
    let table = read(text, &IngestOptions::default()).unwrap();

    assert_eq!(table.nrows(), 1);
    assert_eq!(column(&table, "c"), vec![None]);
}

#[test]
fn test_read_rejects_wide_records() {
    let text = "a,b\n1,2\n1,2,3\n";
    let err = read(text, &IngestOptions::default()).unwrap_err();

    assert!(matches!(
        err,
        TextError::RowTooWide {
            record: 3,
            expected: 2,
            actual: 3
        }
    ));
}

#[test]
fn test_read_without_header_names_columns() {
    let text = "1;x\n2;y;true\n";
    let options = IngestOptions::new()
        .with_header(false)
        .with_delimiter(';')
        .with_inference(TypeInference::Narrowest);
    let table = read(text, &options).unwrap();

    assert_eq!(table.column_names(), vec!["column_0", "column_1", "column_2"]);
    assert_eq!(column(&table, "column_0"), vec![Some(Cell::Int(1)), Some(Cell::Int(2))]);
    assert_eq!(column(&table, "column_2"), vec![None, Some(Cell::Bool(true))]);
}

#[test]
fn test_read_downgrades_foreign_cells() {
    let text = "n\n1\noops\n3\n";
    let table = read(text, &IngestOptions::default()).unwrap();

    assert_eq!(
        column(&table, "n"),
        vec![Some(Cell::Float(1.0)), None, Some(Cell::Float(3.0))]
    );

    let strict = IngestOptions::new().with_policy(CoercionPolicy::Reject);
    let err = read(text, &strict).unwrap_err();
    assert!(matches!(
        err,
        TextError::Data(DataError::TypeMismatch {
            expected: CellKind::Float,
            actual: CellKind::Text,
            ..
        })
    ));
}

#[test]
fn test_read_honours_quoting() {
    let text = "label,value\n\"a, b\",1\n";
    let table = read(text, &IngestOptions::default()).unwrap();

    assert_eq!(table.get_row(0).unwrap().get_str("label").unwrap(), Some("a, b"));
}

#[test]
fn test_read_empty_input() {
    let table = read("", &IngestOptions::default()).unwrap();
    assert_eq!(table.shape(), (0, 0));

    let header_only = read("a,b\n", &IngestOptions::default()).unwrap();
    assert_eq!(header_only.shape(), (0, 2));
}

#[test]
fn test_invalid_delimiter() {
    let options = IngestOptions::new().with_delimiter('§');
    assert!(matches!(
        read("a", &options),
        Err(TextError::InvalidDelimiter('§'))
    ));
}

#[test]
fn test_write_table() {
    let mut table = Table::new();
    table
        .add_series(&NullableSeries::from_values("i", vec![Some(1i64), None]))
        .unwrap();
    table
        .add_series(&NullableSeries::from_present("s", ["plain", "with,comma"]))
        .unwrap();

    assert_eq!(
        emit(&table, &EmitOptions::default()),
        "i,s\n1,plain\n,\"with,comma\"\n"
    );
    assert_eq!(
        emit(&table, &EmitOptions::new().with_header(false).with_delimiter('\t')),
        "1\tplain\n\twith,comma\n"
    );
}

#[test]
fn test_round_trip_modulo_inference() {
    let mut table = Table::new();
    table
        .add_series(&NullableSeries::from_values(
            "n",
            vec![Some(2i64), None, Some(-7)],
        ))
        .unwrap();
    table
        .add_series(&NullableSeries::from_present("f", [0.5, 1.25, 3.0]))
        .unwrap();
    table
        .add_series(&NullableSeries::from_present("b", [true, false, true]))
        .unwrap();

    let text = emit(&table, &EmitOptions::default());
    let back = read(&text, &IngestOptions::default()).unwrap();

    assert_eq!(back.column_names(), table.column_names());
    assert_eq!(back.nrows(), table.nrows());
    assert_eq!(
        column(&back, "n"),
        vec![Some(Cell::Float(2.0)), None, Some(Cell::Float(-7.0))]
    );
    assert_eq!(column(&back, "f"), column(&table, "f"));
    assert_eq!(column(&back, "b"), column(&table, "b"));

    let narrow = read(&text, &IngestOptions::new().with_inference(TypeInference::Narrowest)).unwrap();
    assert_eq!(column(&narrow, "n"), column(&table, "n"));
}

#[test]
fn test_path_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.csv");

    let mut table = Table::new();
    table
        .add_series(&NullableSeries::from_present("k", ["A", "B"]))
        .unwrap();
    write_table_to_path(&table, &path, &EmitOptions::default()).unwrap();

    let back = read_table_from_path(&path, &IngestOptions::default()).unwrap();
    assert_eq!(column(&back, "k"), column(&table, "k"));
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.csv");

    let err = read_table_from_path(&path, &IngestOptions::default()).unwrap_err();
    assert!(matches!(err, TextError::Io { ref path, .. } if path.ends_with("missing.csv")));
    assert!(err.to_string().contains("missing.csv"));
}

#[test]
fn test_options_deserialize_with_defaults() {
    let options: IngestOptions = serde_json::from_str(r#"{"inference": "narrowest"}"#).unwrap();

    assert_eq!(options.inference, TypeInference::Narrowest);
    assert_eq!(options.delimiter, ',');
    assert!(options.has_header);
}
