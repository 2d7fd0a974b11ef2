use dioxus::prelude::*;

use crate::io::storage::FileStore;
use crate::state::table_state::{TableAction, TableState};
use crate::ui::actions;

#[component]
pub fn Toolbar(
    data: Signal<TableState>,
    store: Signal<FileStore>,
    error_message: Signal<Option<String>>,
    notice: Signal<Option<String>>,
    show_columns: Signal<bool>,
) -> Element {
    let search_term = data.read().search_term().to_string();

    rsx! {
        div { class: "toolbar",
            div { class: "toolbar-group toolbar-grow",
                input {
                    class: "toolbar-input toolbar-search",
                    id: "input-search",
                    placeholder: "Search",
                    value: "{search_term}",
                    oninput: move |evt| {
                        actions::dispatch(
                            data,
                            store,
                            error_message,
                            TableAction::SetSearchTerm(evt.value()),
                        );
                    }
                }
            }
            div { class: "toolbar-group",
                button {
                    class: "toolbar-btn",
                    id: "btn-manage-columns",
                    onclick: move |_| {
                        let mut show_columns = show_columns;
                        show_columns.set(true);
                    },
                    "\u{2699} Manage Columns"
                }
                button {
                    class: "toolbar-btn",
                    id: "btn-import",
                    onclick: move |_| {
                        spawn(async move {
                            actions::import_file(data, store, error_message, notice).await;
                        });
                    },
                    "\u{2B06} Import CSV"
                }
                button {
                    class: "toolbar-btn toolbar-btn-primary",
                    id: "btn-export",
                    onclick: move |_| {
                        spawn(async move {
                            actions::export_file(data, error_message, notice).await;
                        });
                    },
                    "\u{2B07} Export CSV"
                }
            }
            div { class: "toolbar-info",
                if let Some(message) = notice.read().as_ref() {
                    span { class: "notice", "\u{2714} {message}" }
                }
                if let Some(err) = error_message.read().as_ref() {
                    span { class: "error-message", "{err}" }
                }
            }
        }
    }
}
