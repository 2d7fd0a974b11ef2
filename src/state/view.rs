//! Filter, sort and paginate: the rows the table actually shows.
//!
//! Everything here is a pure function of [`TableState`]; nothing is cached.
//! The UI memoizes the results so they are only recomputed when the state
//! changes.

use std::cmp::Ordering;

use crate::state::data_model::{CellValue, Column, Row};
use crate::state::table_state::{SortDirection, TableState};

#[derive(Clone, Debug, PartialEq)]
pub struct TableView {
    /// Rows on the current page.
    pub rows: Vec<Row>,
    /// Number of rows that passed the filter, across all pages.
    pub total: usize,
}

impl TableView {
    pub fn from_state(state: &TableState) -> Self {
        let ordered = ordered_rows(state);
        Self {
            rows: paginate(&ordered, state.current_page(), state.rows_per_page()).to_vec(),
            total: ordered.len(),
        }
    }
}

/// Filtered and sorted rows, before pagination.
pub fn ordered_rows(state: &TableState) -> Vec<Row> {
    let mut rows = filter_rows(state.data(), state.columns(), state.search_term());
    if let Some(column) = state.sort_column() {
        sort_rows(&mut rows, column, state.sort_direction());
    }
    rows
}

/// Keeps rows where some visible column contains `term`, ignoring case.
/// Rows never match when no column is visible.
pub fn filter_rows(rows: &[Row], columns: &[Column], term: &str) -> Vec<Row> {
    let needle = term.to_lowercase();
    let visible: Vec<&Column> = columns.iter().filter(|c| c.visible).collect();
    rows.iter()
        .filter(|row| {
            visible
                .iter()
                .any(|col| row.display(&col.id).to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Stable sort on one column; ties keep their incoming order in both directions.
pub fn sort_rows(rows: &mut [Row], column: &str, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ordering = compare_cells(a.get(column), b.get(column));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Numbers compare numerically; anything else as lowercase text.
/// A missing cell reads as empty text.
pub fn compare_cells(a: Option<&CellValue>, b: Option<&CellValue>) -> Ordering {
    match (a.and_then(CellValue::as_number), b.and_then(CellValue::as_number)) {
        (Some(left), Some(right)) => left.total_cmp(&right),
        _ => cell_sort_text(a).cmp(&cell_sort_text(b)),
    }
}

fn cell_sort_text(value: Option<&CellValue>) -> String {
    value
        .map(|v| v.to_string().to_lowercase())
        .unwrap_or_default()
}

/// Slice of one page; a page past the end is empty.
pub fn paginate(rows: &[Row], page: usize, rows_per_page: usize) -> &[Row] {
    let start = page.saturating_mul(rows_per_page);
    if start >= rows.len() {
        return &[];
    }
    let end = start.saturating_add(rows_per_page).min(rows.len());
    &rows[start..end]
}

pub fn page_count(total: usize, rows_per_page: usize) -> usize {
    if rows_per_page == 0 {
        return 0;
    }
    total.div_ceil(rows_per_page)
}

/// `"11-12 of 12"` for the second page of twelve rows at ten per page.
pub fn page_range_label(page: usize, rows_per_page: usize, total: usize) -> String {
    let start = page.saturating_mul(rows_per_page);
    if total == 0 || start >= total {
        return format!("0-0 of {total}");
    }
    let end = start.saturating_add(rows_per_page).min(total);
    format!("{}-{} of {}", start + 1, end, total)
}
