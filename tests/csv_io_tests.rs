use std::collections::BTreeSet;

use chrono::NaiveDate;

use tabledeck::io::csv_io::{self, CsvIoError};
use tabledeck::state::data_model::{self, CellValue, Column, Row};

fn fixture(name: &str) -> Vec<u8> {
    let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let path = manifest_dir.join("tests").join("data").join(name);
    std::fs::read(path).unwrap()
}

#[test]
fn test_export_header_and_rows() {
    let rows = vec![
        Row::new("1").with("name", "Ann").with("email", "ann@example.com").with("age", 31).with("role", "Dev"),
        Row::new("2").with("name", "Bo").with("email", "bo@example.com").with("age", 40).with("role", "Ops"),
    ];
    let csv = csv_io::export_csv(&rows, &data_model::baseline_columns());
    assert_eq!(
        csv,
        "Name,Email,Age,Role\nAnn,ann@example.com,31,Dev\nBo,bo@example.com,40,Ops"
    );
}

#[test]
fn test_export_only_given_columns_in_order() {
    let rows = vec![Row::new("1").with("name", "Ann").with("age", 31)];
    let columns = vec![Column::new("age", "Age"), Column::new("name", "Name")];
    assert_eq!(csv_io::export_csv(&rows, &columns), "Age,Name\n31,Ann");
}

#[test]
fn test_export_quotes_values_with_commas() {
    let rows = vec![Row::new("1").with("name", "Lee, Ann").with("note", "say \"hi\"")];
    let columns = vec![Column::new("name", "Name"), Column::new("note", "Note")];
    assert_eq!(
        csv_io::export_csv(&rows, &columns),
        "Name,Note\n\"Lee, Ann\",say \"hi\""
    );
}

#[test]
fn test_export_missing_values_are_empty() {
    let rows = vec![Row::new("1").with("name", "Ann")];
    let columns = vec![Column::new("name", "Name"), Column::new("team", "Team")];
    assert_eq!(csv_io::export_csv(&rows, &columns), "Name,Team\nAnn,");
}

#[test]
fn test_export_no_rows_is_header_only() {
    assert_eq!(
        csv_io::export_csv(&[], &data_model::baseline_columns()),
        "Name,Email,Age,Role"
    );
}

#[test]
fn test_export_file_name() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    assert_eq!(csv_io::export_file_name(date), "table-export-2024-03-05.csv");
    assert!(csv_io::export_file_name_today().starts_with("table-export-"));
    assert!(csv_io::export_file_name_today().ends_with(".csv"));
}

#[test]
fn test_import_fixture_with_new_column() {
    let import = csv_io::import_csv(&fixture("people.csv"), &data_model::baseline_columns()).unwrap();

    assert_eq!(
        import.new_columns,
        vec![Column::new("phone_number", "Phone Number")]
    );
    assert_eq!(import.imported_rows.len(), 2);

    let ann = &import.imported_rows[0];
    assert!(ann.id.starts_with("imported-"));
    assert_eq!(ann.get("name"), Some(&CellValue::text("Ann Lee")));
    assert_eq!(ann.get("email"), Some(&CellValue::text("ann@example.com")));
    assert_eq!(ann.get("age"), Some(&CellValue::Number(31.0)));
    assert_eq!(ann.get("role"), Some(&CellValue::text("Developer")));
    assert_eq!(ann.get("phone_number"), Some(&CellValue::text("555-0101")));
}

#[test]
fn test_import_unparsable_age_is_zero() {
    let import = csv_io::import_csv(&fixture("people.csv"), &data_model::baseline_columns()).unwrap();
    let bo = &import.imported_rows[1];
    assert_eq!(bo.get("age"), Some(&CellValue::Number(0.0)));
    assert_eq!(bo.get("phone_number"), Some(&CellValue::empty()));
}

#[test]
fn test_import_missing_baseline_fields_default() {
    let import = csv_io::import_csv(b"team\nOps\n", &data_model::baseline_columns()).unwrap();
    let row = &import.imported_rows[0];
    assert_eq!(row.get("name"), Some(&CellValue::empty()));
    assert_eq!(row.get("email"), Some(&CellValue::empty()));
    assert_eq!(row.get("age"), Some(&CellValue::Number(0.0)));
    assert_eq!(row.get("role"), Some(&CellValue::empty()));
    assert_eq!(row.get("team"), Some(&CellValue::text("Ops")));
}

#[test]
fn test_import_known_columns_are_not_new() {
    let mut columns = data_model::baseline_columns();
    columns.push(Column::new("phone_number", "Phone"));
    let import = csv_io::import_csv(&fixture("people.csv"), &columns).unwrap();
    assert!(import.new_columns.is_empty());
    assert_eq!(
        import.imported_rows[0].get("phone_number"),
        Some(&CellValue::text("555-0101"))
    );
}

#[test]
fn test_import_ignores_id_header_and_normalizes_others() {
    let import =
        csv_io::import_csv(&fixture("extra_columns.csv"), &data_model::baseline_columns()).unwrap();

    assert_eq!(import.new_columns, vec![Column::new("team_lead", "Team  Lead")]);
    let row = &import.imported_rows[0];
    assert_ne!(row.id, "7");
    assert_eq!(row.get("id"), None);
    assert_eq!(row.get("team_lead"), Some(&CellValue::text("Cy")));
    assert_eq!(row.get("age"), Some(&CellValue::Number(31.0)));
}

#[test]
fn test_import_skips_blank_lines() {
    let import =
        csv_io::import_csv(&fixture("blank_lines.csv"), &data_model::baseline_columns()).unwrap();
    let names: Vec<String> = import
        .imported_rows
        .iter()
        .map(|row| row.display("name"))
        .collect();
    assert_eq!(names, vec!["Ann", "Bo"]);
}

#[test]
fn test_import_ids_are_unique_across_batches() {
    let columns = data_model::baseline_columns();
    let first = csv_io::import_csv(&fixture("people.csv"), &columns).unwrap();
    let second = csv_io::import_csv(&fixture("people.csv"), &columns).unwrap();

    let ids: BTreeSet<String> = first
        .imported_rows
        .iter()
        .chain(&second.imported_rows)
        .map(|row| row.id.clone())
        .collect();
    assert_eq!(ids.len(), 4);
    assert!(data_model::seed_rows().iter().all(|row| !ids.contains(&row.id)));
}

#[test]
fn test_import_header_only_is_empty() {
    let import = csv_io::import_csv(b"name,email,age,role\n", &data_model::baseline_columns()).unwrap();
    assert!(import.imported_rows.is_empty());
    assert!(import.new_columns.is_empty());
}

#[test]
fn test_import_ragged_rows_default_missing_fields() {
    let import = csv_io::import_csv(&fixture("ragged.csv"), &data_model::baseline_columns()).unwrap();
    let names: Vec<String> = import
        .imported_rows
        .iter()
        .map(|row| row.display("name"))
        .collect();
    assert_eq!(names, vec!["Ann", "Bo", "Cy"]);

    let bo = &import.imported_rows[1];
    assert_eq!(bo.get("email"), Some(&CellValue::text("bo@example.com")));
    assert_eq!(bo.get("age"), Some(&CellValue::Number(0.0)));
    assert_eq!(bo.get("role"), Some(&CellValue::empty()));
    assert_eq!(bo.get("team"), Some(&CellValue::empty()));
}

#[test]
fn test_import_drops_fields_past_the_header() {
    let import = csv_io::import_csv(&fixture("ragged.csv"), &data_model::baseline_columns()).unwrap();
    let cy = &import.imported_rows[2];
    assert_eq!(cy.get("age"), Some(&CellValue::Number(40.0)));
    assert_eq!(cy.get("team"), Some(&CellValue::text("R&D")));
    let keys: Vec<&str> = cy.fields.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["age", "email", "name", "role", "team"]);
}

#[test]
fn test_import_short_record_inline() {
    let import = csv_io::import_csv(
        b"name,email,age\nAnn,ann@example.com,31\nBo,bo@example.com\n",
        &data_model::baseline_columns(),
    )
    .unwrap();
    assert_eq!(import.imported_rows.len(), 2);
    assert_eq!(import.imported_rows[1].get("age"), Some(&CellValue::Number(0.0)));
}

#[test]
fn test_import_invalid_utf8_fails() {
    let err = csv_io::import_csv(b"name\n\xff\xfe\n", &data_model::baseline_columns()).unwrap_err();
    assert!(matches!(err, CsvIoError::Parse(_)));
}
