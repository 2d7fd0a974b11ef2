use dioxus::prelude::*;

use crate::io::storage::FileStore;
use crate::state::table_state::{TableAction, TableState};
use crate::state::view;
use crate::ui::actions;

#[component]
pub fn Pagination(
    data: Signal<TableState>,
    store: Signal<FileStore>,
    error_message: Signal<Option<String>>,
    total: usize,
) -> Element {
    let (page, rows_per_page) = {
        let state = data.read();
        (state.current_page(), state.rows_per_page())
    };
    let pages = view::page_count(total, rows_per_page);
    let label = view::page_range_label(page, rows_per_page, total);
    let has_previous = page > 0;
    let has_next = page + 1 < pages;

    rsx! {
        div { class: "pagination",
            span { class: "pagination-label", id: "label-page-range", "{label}" }
            button {
                class: "pagination-btn",
                id: "btn-prev-page",
                disabled: !has_previous,
                onclick: move |_| {
                    actions::dispatch(
                        data,
                        store,
                        error_message,
                        TableAction::SetCurrentPage(page.saturating_sub(1)),
                    );
                },
                "\u{2039}"
            }
            button {
                class: "pagination-btn",
                id: "btn-next-page",
                disabled: !has_next,
                onclick: move |_| {
                    actions::dispatch(
                        data,
                        store,
                        error_message,
                        TableAction::SetCurrentPage(page + 1),
                    );
                },
                "\u{203A}"
            }
        }
    }
}
