use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::data_model::{self, CellValue, Column, Fields, Row};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Every transition the store accepts, as a value.
#[derive(Clone, Debug, PartialEq)]
pub enum TableAction {
    SetSearchTerm(String),
    SetSortColumn(Option<String>),
    SetCurrentPage(usize),
    ToggleColumnVisibility(String),
    AddColumn { id: String, label: String },
    UpdateData(Vec<Row>),
    AddRow(Row),
    UpdateRow { id: String, fields: Fields },
    DeleteRow(String),
}

/// Rows, columns and view state of the one table the application manages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableState {
    data: Vec<Row>,
    columns: Vec<Column>,
    #[serde(default)]
    search_term: String,
    #[serde(default)]
    sort_column: Option<String>,
    #[serde(default)]
    sort_direction: SortDirection,
    #[serde(default)]
    current_page: usize,
    #[serde(default = "default_rows_per_page")]
    rows_per_page: usize,
}

fn default_rows_per_page() -> usize {
    data_model::DEFAULT_ROWS_PER_PAGE
}

impl Default for TableState {
    fn default() -> Self {
        Self::seeded()
    }
}

impl TableState {
    /// The built-in dataset with the four baseline columns.
    pub fn seeded() -> Self {
        Self::from_parts(data_model::seed_rows(), data_model::baseline_columns())
    }

    pub fn from_parts(data: Vec<Row>, columns: Vec<Column>) -> Self {
        Self {
            data,
            columns,
            search_term: String::new(),
            sort_column: None,
            sort_direction: SortDirection::Asc,
            current_page: 0,
            rows_per_page: data_model::DEFAULT_ROWS_PER_PAGE,
        }
    }

    /// Zero is not a valid page size and is ignored.
    pub fn with_rows_per_page(mut self, rows_per_page: usize) -> Self {
        if rows_per_page > 0 {
            self.rows_per_page = rows_per_page;
        }
        self
    }

    pub fn data(&self) -> &[Row] {
        &self.data
    }

    pub fn row(&self, id: &str) -> Option<&Row> {
        self.data.iter().find(|row| row.id == id)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn visible_columns(&self) -> Vec<Column> {
        self.columns.iter().filter(|c| c.visible).cloned().collect()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_column(&self) -> Option<&str> {
        self.sort_column.as_deref()
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn apply(&mut self, action: TableAction) {
        debug!(action = action_name(&action), "applying table action");
        match action {
            TableAction::SetSearchTerm(term) => self.set_search_term(term),
            TableAction::SetSortColumn(column) => self.set_sort_column(column),
            TableAction::SetCurrentPage(page) => self.set_current_page(page),
            TableAction::ToggleColumnVisibility(id) => self.toggle_column_visibility(&id),
            TableAction::AddColumn { id, label } => self.add_column(&id, label),
            TableAction::UpdateData(rows) => self.update_data(rows),
            TableAction::AddRow(row) => self.add_row(row),
            TableAction::UpdateRow { id, fields } => self.update_row(&id, fields),
            TableAction::DeleteRow(id) => self.delete_row(&id),
        }
    }

    pub fn set_search_term(&mut self, term: String) {
        self.search_term = term;
        self.current_page = 0;
    }

    /// Selecting the current sort column again flips the direction; any other
    /// column (or clearing with `None`) starts over ascending.
    /// `None` clears sorting and always leaves the direction at `Asc`.
    pub fn set_sort_column(&mut self, column: Option<String>) {
        match column {
            None => {
                self.sort_column = None;
                self.sort_direction = SortDirection::Asc;
            }
            Some(_) if self.sort_column == column => {
                self.sort_direction = self.sort_direction.toggled();
            }
            Some(_) => {
                self.sort_column = column;
                self.sort_direction = SortDirection::Asc;
            }
        }
    }

    pub fn set_current_page(&mut self, page: usize) {
        self.current_page = page;
    }

    pub fn toggle_column_visibility(&mut self, id: &str) {
        if let Some(column) = self.columns.iter_mut().find(|c| c.id == id) {
            column.visible = !column.visible;
        }
    }

    /// Appends a visible column and blanks the new field on every row.
    /// Ids are lowercased but not deduplicated.
    pub fn add_column(&mut self, id: &str, label: String) {
        let id = id.to_lowercase();
        for row in &mut self.data {
            row.fields.insert(id.clone(), CellValue::empty());
        }
        self.columns.push(Column {
            id,
            label,
            visible: true,
        });
    }

    pub fn update_data(&mut self, rows: Vec<Row>) {
        self.data = rows;
        self.current_page = 0;
    }

    pub fn add_row(&mut self, row: Row) {
        self.data.push(row);
    }

    pub fn update_row(&mut self, id: &str, fields: Fields) {
        if let Some(row) = self.data.iter_mut().find(|row| row.id == id) {
            row.fields.extend(fields);
        }
    }

    pub fn delete_row(&mut self, id: &str) {
        self.data.retain(|row| row.id != id);
    }

    /// Registers columns discovered by an import, then replaces the rows.
    pub fn commit_import(&mut self, new_columns: Vec<Column>, rows: Vec<Row>) {
        for column in new_columns {
            self.add_column(&column.id, column.label);
        }
        self.update_data(rows);
    }
}

fn action_name(action: &TableAction) -> &'static str {
    match action {
        TableAction::SetSearchTerm(_) => "set_search_term",
        TableAction::SetSortColumn(_) => "set_sort_column",
        TableAction::SetCurrentPage(_) => "set_current_page",
        TableAction::ToggleColumnVisibility(_) => "toggle_column_visibility",
        TableAction::AddColumn { .. } => "add_column",
        TableAction::UpdateData(_) => "update_data",
        TableAction::AddRow(_) => "add_row",
        TableAction::UpdateRow { .. } => "update_row",
        TableAction::DeleteRow(_) => "delete_row",
    }
}
