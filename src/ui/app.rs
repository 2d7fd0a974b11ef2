use dioxus::prelude::*;

use crate::config::AppConfig;
use crate::io::storage::{self, FileStore};
use crate::state::table_state::TableState;
use crate::state::view;
use crate::ui::actions;
use crate::ui::column_dialog::ColumnDialog;
use crate::ui::pagination::Pagination;
use crate::ui::table::Table;
use crate::ui::toolbar::Toolbar;

const STYLES: Asset = asset!("/assets/styles.css");

#[component]
pub fn App() -> Element {
    let config = use_hook(AppConfig::from_env);
    let store = use_signal({
        let dir = config.state_dir.clone();
        move || FileStore::new(dir)
    });
    let data = use_signal({
        let rows_per_page = config.rows_per_page;
        move || {
            storage::rehydrate(&*store.peek(), || {
                TableState::seeded().with_rows_per_page(rows_per_page)
            })
        }
    });
    let error_message = use_signal::<Option<String>>(|| None);
    let notice = use_signal::<Option<String>>(|| None);
    let show_columns = use_signal(|| false);

    use_effect({
        let open_csv = config.open_csv.clone();
        move || {
            if let Some(path) = open_csv.as_deref() {
                actions::import_path(data, store, error_message, notice, path);
            }
        }
    });

    let ordered = use_memo(move || view::ordered_rows(&data.read()));
    let page_rows = use_memo(move || {
        let state = data.read();
        view::paginate(&ordered.read(), state.current_page(), state.rows_per_page()).to_vec()
    });

    let total = ordered.read().len();
    let rows = page_rows.read().clone();

    rsx! {
        document::Stylesheet { href: STYLES }
        div { class: "app",
            h1 { class: "app-title", "Dynamic Data Table Manager" }
            Toolbar { data, store, error_message, notice, show_columns }
            Table { data, store, error_message, rows }
            Pagination { data, store, error_message, total }
            if *show_columns.read() {
                ColumnDialog { data, store, error_message, show_columns }
            }
        }
    }
}
