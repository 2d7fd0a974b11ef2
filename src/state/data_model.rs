use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Ids of the columns every table carries. They can be hidden but never removed.
pub const BASELINE_COLUMN_IDS: [&str; 4] = ["name", "email", "age", "role"];

pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// A single cell. Serialized untagged, so a blob reads `"Alice"` or `28`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

pub type Fields = BTreeMap<String, CellValue>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    #[serde(default)]
    pub fields: Fields,
}

impl Row {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Fields::new(),
        }
    }

    /// Builder used by the seed data and tests.
    pub fn with(mut self, column: &str, value: impl Into<CellValue>) -> Self {
        self.fields.insert(column.to_string(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields.get(column)
    }

    /// Display text for a column; a missing field reads as empty.
    pub fn display(&self, column: &str) -> String {
        self.get(column).map(ToString::to_string).unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub label: String,
    pub visible: bool,
}

impl Column {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            visible: true,
        }
    }

    pub fn is_baseline(&self) -> bool {
        BASELINE_COLUMN_IDS.contains(&self.id.as_str())
    }
}

pub fn baseline_columns() -> Vec<Column> {
    vec![
        Column::new("name", "Name"),
        Column::new("email", "Email"),
        Column::new("age", "Age"),
        Column::new("role", "Role"),
    ]
}

const SEED: [(&str, &str, &str, i64, &str); 12] = [
    ("1", "John Doe", "john@example.com", 28, "Developer"),
    ("2", "Jane Smith", "jane@example.com", 32, "Designer"),
    ("3", "Mike Johnson", "mike@example.com", 25, "Manager"),
    ("4", "Sarah Williams", "sarah@example.com", 29, "Developer"),
    ("5", "Tom Brown", "tom@example.com", 35, "Designer"),
    ("6", "Emily Davis", "emily@example.com", 27, "Developer"),
    ("7", "Chris Wilson", "chris@example.com", 31, "Manager"),
    ("8", "Lisa Anderson", "lisa@example.com", 26, "Developer"),
    ("9", "David Martinez", "david@example.com", 33, "Designer"),
    ("10", "Amy Taylor", "amy@example.com", 24, "Developer"),
    ("11", "Robert Lee", "robert@example.com", 30, "Manager"),
    ("12", "Maria Garcia", "maria@example.com", 28, "Developer"),
];

/// The built-in dataset used when no persisted state exists.
pub fn seed_rows() -> Vec<Row> {
    SEED.iter()
        .map(|(id, name, email, age, role)| {
            Row::new(*id)
                .with("name", *name)
                .with("email", *email)
                .with("age", *age)
                .with("role", *role)
        })
        .collect()
}
