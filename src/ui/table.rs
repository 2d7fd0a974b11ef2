use dioxus::prelude::*;

use crate::io::storage::FileStore;
use crate::state::data_model::{Column, Row};
use crate::state::table_state::{SortDirection, TableAction, TableState};
use crate::ui::actions;

#[component]
pub fn Table(
    data: Signal<TableState>,
    store: Signal<FileStore>,
    error_message: Signal<Option<String>>,
    rows: Vec<Row>,
) -> Element {
    let (columns, sort_column, sort_direction) = {
        let state = data.read();
        (
            state.visible_columns(),
            state.sort_column().map(str::to_string),
            state.sort_direction(),
        )
    };
    let span = columns.len().max(1);

    rsx! {
        div { class: "table-container", id: "table-container",
            table {
                thead {
                    tr {
                        for (index, col) in columns.iter().enumerate() {
                            th {
                                key: "{item_key(index, &col.id)}",
                                class: header_class(col, sort_column.as_deref(), sort_direction),
                                id: format!("col-{}", sanitize_id(&col.id)),
                                onclick: {
                                    let col_id = col.id.clone();
                                    move |_| {
                                        actions::dispatch(
                                            data,
                                            store,
                                            error_message,
                                            TableAction::SetSortColumn(Some(col_id.clone())),
                                        );
                                    }
                                },
                                "{col.label}"
                                span { class: "sort-marker",
                                    "{sort_marker(col, sort_column.as_deref(), sort_direction)}"
                                }
                            }
                        }
                    }
                }
                tbody {
                    if rows.is_empty() {
                        tr {
                            td { class: "empty-message", colspan: "{span}", "No data found" }
                        }
                    } else {
                        for (index, row) in rows.iter().enumerate() {
                            tr {
                                key: "{item_key(index, &row.id)}",
                                class: row_class(index),
                                id: format!("row-{}", sanitize_id(&row.id)),
                                for (col_index, col) in columns.iter().enumerate() {
                                    td { key: "{item_key(col_index, &col.id)}", class: "cell", "{cell_text(row, col)}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn header_class(col: &Column, sort_column: Option<&str>, direction: SortDirection) -> String {
    if sort_column != Some(col.id.as_str()) {
        return "sortable".to_string();
    }
    match direction {
        SortDirection::Asc => "sortable sorted-asc".to_string(),
        SortDirection::Desc => "sortable sorted-desc".to_string(),
    }
}

fn sort_marker(col: &Column, sort_column: Option<&str>, direction: SortDirection) -> &'static str {
    if sort_column != Some(col.id.as_str()) {
        return "";
    }
    match direction {
        SortDirection::Asc => " \u{25B2}",
        SortDirection::Desc => " \u{25BC}",
    }
}

fn row_class(index: usize) -> &'static str {
    if index % 2 == 0 {
        "even"
    } else {
        "odd"
    }
}

/// Column and row ids may repeat, so list keys carry the position too.
pub(crate) fn item_key(index: usize, id: &str) -> String {
    format!("{index}-{id}")
}

fn cell_text(row: &Row, col: &Column) -> String {
    row.get(&col.id)
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".to_string())
}

fn sanitize_id(value: &str) -> String {
    value
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect()
}
