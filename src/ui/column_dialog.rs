use dioxus::prelude::{Key, *};

use crate::io::storage::FileStore;
use crate::state::normalize::normalize;
use crate::state::table_state::{TableAction, TableState};
use crate::ui::{actions, table};

#[component]
pub fn ColumnDialog(
    data: Signal<TableState>,
    store: Signal<FileStore>,
    error_message: Signal<Option<String>>,
    show_columns: Signal<bool>,
) -> Element {
    let new_column = use_signal(String::new);
    let columns = data.read().columns().to_vec();
    let can_add = !new_column.read().trim().is_empty();

    let add_column = move || {
        let mut new_column = new_column;
        let mut show_columns = show_columns;
        let label = new_column.read().trim().to_string();
        if label.is_empty() {
            return;
        }
        actions::dispatch(
            data,
            store,
            error_message,
            TableAction::AddColumn {
                id: normalize(&label),
                label,
            },
        );
        new_column.set(String::new());
        show_columns.set(false);
    };

    rsx! {
        div { class: "dialog-backdrop",
            div { class: "dialog", id: "dialog-columns",
                h2 { class: "dialog-title", "Manage Columns" }
                div { class: "dialog-section",
                    input {
                        class: "toolbar-input",
                        id: "input-new-column",
                        placeholder: "New Column Name",
                        value: "{new_column.read()}",
                        oninput: move |evt| {
                            let mut new_column = new_column;
                            new_column.set(evt.value());
                        },
                        onkeydown: move |evt: KeyboardEvent| {
                            if evt.key() == Key::Enter {
                                add_column();
                            }
                        }
                    }
                    button {
                        class: "toolbar-btn",
                        id: "btn-add-column",
                        disabled: !can_add,
                        onclick: move |_| add_column(),
                        "\u{2795} Add Column"
                    }
                }
                div { class: "dialog-section column-list",
                    for (index, column) in columns.iter().enumerate() {
                        label { key: "{table::item_key(index, &column.id)}", class: "column-toggle",
                            input {
                                r#type: "checkbox",
                                checked: column.visible,
                                onchange: {
                                    let id = column.id.clone();
                                    move |_| {
                                        actions::dispatch(
                                            data,
                                            store,
                                            error_message,
                                            TableAction::ToggleColumnVisibility(id.clone()),
                                        );
                                    }
                                }
                            }
                            "{column.label}"
                        }
                    }
                }
                div { class: "dialog-actions",
                    button {
                        class: "toolbar-btn",
                        id: "btn-close-columns",
                        onclick: move |_| {
                            let mut show_columns = show_columns;
                            show_columns.set(false);
                        },
                        "Close"
                    }
                }
            }
        }
    }
}
