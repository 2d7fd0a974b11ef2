use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{NaiveDate, Utc};
use csv::StringRecord;
use thiserror::Error;
use tracing::info;

use crate::state::data_model::{CellValue, Column, Row};
use crate::state::normalize::normalize;

pub const EXPORT_MIME_TYPE: &str = "text/csv";

/// Normalized header ids that never become dynamic columns on import.
const RESERVED_IDS: [&str; 5] = ["id", "name", "email", "age", "role"];

#[derive(Debug, Error)]
pub enum CsvIoError {
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CsvImport {
    pub imported_rows: Vec<Row>,
    /// Columns found in the header that the table does not know yet.
    pub new_columns: Vec<Column>,
}

/// Serializes rows under the given columns, header first.
///
/// Values containing a comma are wrapped in double quotes. Embedded quotes and
/// newlines are written as-is.
pub fn export_csv(rows: &[Row], visible_columns: &[Column]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        visible_columns
            .iter()
            .map(|col| col.label.as_str())
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        lines.push(
            visible_columns
                .iter()
                .map(|col| quote_if_needed(row.display(&col.id)))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}

fn quote_if_needed(value: String) -> String {
    if value.contains(',') {
        format!("\"{value}\"")
    } else {
        value
    }
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("table-export-{}.csv", date.format("%Y-%m-%d"))
}

/// File name for an export made now, dated in UTC.
pub fn export_file_name_today() -> String {
    export_file_name(Utc::now().date_naive())
}

static IMPORT_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Mints `imported-<millis>-<seq>` ids. The sequence is shared by every
/// generator in the process, so ids stay unique across import batches.
#[derive(Clone, Debug)]
pub struct ImportIdGenerator {
    stamp: i64,
}

impl ImportIdGenerator {
    pub fn new() -> Self {
        Self {
            stamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn next_id(&mut self) -> String {
        let seq = IMPORT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        format!("imported-{}-{}", self.stamp, seq)
    }
}

impl Default for ImportIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses CSV with a header row into fresh rows.
///
/// Blank and whitespace-only lines are skipped. A short record leaves its
/// missing fields at their defaults and fields past the header are dropped.
/// Input that is not UTF-8 fails the whole import.
pub fn import_csv(input: &[u8], existing_columns: &[Column]) -> Result<CsvImport, CsvIoError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let keys: Vec<String> = headers.iter().map(normalize).collect();

    let mut new_columns: Vec<Column> = Vec::new();
    for (header, key) in headers.iter().zip(&keys) {
        let known = key.is_empty()
            || RESERVED_IDS.contains(&key.as_str())
            || existing_columns.iter().any(|col| &col.id == key)
            || new_columns.iter().any(|col| &col.id == key);
        if !known {
            new_columns.push(Column::new(key.clone(), header.trim()));
        }
    }

    let mut ids = ImportIdGenerator::new();
    let mut imported_rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if is_blank(&record) {
            continue;
        }
        imported_rows.push(build_row(ids.next_id(), &keys, &record));
    }

    info!(
        rows = imported_rows.len(),
        new_columns = new_columns.len(),
        "parsed CSV import"
    );
    Ok(CsvImport {
        imported_rows,
        new_columns,
    })
}

fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record.get(0).is_some_and(|field| field.trim().is_empty())
}

fn build_row(id: String, keys: &[String], record: &StringRecord) -> Row {
    let mut row = Row::new(id)
        .with("name", lookup(keys, record, "name").unwrap_or_default())
        .with("email", lookup(keys, record, "email").unwrap_or_default())
        .with("age", parse_leading_int(lookup(keys, record, "age").unwrap_or_default()))
        .with("role", lookup(keys, record, "role").unwrap_or_default());

    for (index, key) in keys.iter().enumerate() {
        if key.is_empty() || RESERVED_IDS.contains(&key.as_str()) {
            continue;
        }
        let value = record.get(index).unwrap_or_default();
        row.fields.insert(key.clone(), CellValue::text(value));
    }
    row
}

/// First non-empty value under a header that normalizes to `target`.
fn lookup<'a>(keys: &[String], record: &'a StringRecord, target: &str) -> Option<&'a str> {
    keys.iter()
        .zip(record.iter())
        .find(|(key, value)| key.as_str() == target && !value.is_empty())
        .map(|(_, value)| value)
}

/// Reads an optional sign and the leading digits; anything else is 0.
fn parse_leading_int(text: &str) -> i64 {
    let text = text.trim();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}
