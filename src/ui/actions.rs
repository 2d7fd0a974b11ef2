use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dioxus::prelude::*;
use tracing::{error, info};

use crate::io::csv_io;
use crate::io::storage::{self, FileStore};
use crate::io::write_atomically;
use crate::state::table_state::{TableAction, TableState};
use crate::state::view;

const NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Bumped for every notice; a timer only clears the notice it started with.
static NOTICE_SERIAL: AtomicU64 = AtomicU64::new(0);

/// Applies one transition and persists the result.
pub fn dispatch(
    mut data: Signal<TableState>,
    store: Signal<FileStore>,
    error_message: Signal<Option<String>>,
    action: TableAction,
) {
    data.with_mut(|state| state.apply(action));
    persist(data, store, error_message);
}

/// Returns `false` after showing the save error.
pub fn persist(
    data: Signal<TableState>,
    store: Signal<FileStore>,
    mut error_message: Signal<Option<String>>,
) -> bool {
    match storage::persist_state(&*store.peek(), &data.peek()) {
        Ok(()) => true,
        Err(message) => {
            error_message.set(Some(message));
            false
        }
    }
}

pub async fn import_file(
    data: Signal<TableState>,
    store: Signal<FileStore>,
    error_message: Signal<Option<String>>,
    notice: Signal<Option<String>>,
) {
    let Some(handle) = rfd::AsyncFileDialog::new()
        .add_filter("CSV", &["csv"])
        .pick_file()
        .await
    else {
        return;
    };

    let bytes = handle.read().await;
    import_bytes(data, store, error_message, notice, &handle.file_name(), &bytes);
}

/// Startup import of the file named by the configuration.
pub fn import_path(
    data: Signal<TableState>,
    store: Signal<FileStore>,
    mut error_message: Signal<Option<String>>,
    notice: Signal<Option<String>>,
    path: &Path,
) {
    match std::fs::read(path) {
        Ok(bytes) => import_bytes(
            data,
            store,
            error_message,
            notice,
            &path.display().to_string(),
            &bytes,
        ),
        Err(err) => {
            error!(path = %path.display(), error = %err, "cannot read CSV file");
            error_message.set(Some(format!("Failed to import CSV file: {err}")));
        }
    }
}

/// On a parse failure the table is left as it was.
pub fn import_bytes(
    mut data: Signal<TableState>,
    store: Signal<FileStore>,
    mut error_message: Signal<Option<String>>,
    notice: Signal<Option<String>>,
    source: &str,
    bytes: &[u8],
) {
    let columns = data.peek().columns().to_vec();
    match csv_io::import_csv(bytes, &columns) {
        Ok(import) => {
            let count = import.imported_rows.len();
            data.with_mut(|state| state.commit_import(import.new_columns, import.imported_rows));
            info!(source, rows = count, "imported CSV");
            error_message.set(None);
            persist(data, store, error_message);
            show_notice(notice, format!("Imported {count} rows"));
        }
        Err(err) => {
            error!(source, error = %err, "CSV import failed");
            error_message.set(Some(format!("Failed to import CSV file: {err}")));
        }
    }
}

/// Exports the filtered, sorted rows under the visible columns.
pub async fn export_file(
    data: Signal<TableState>,
    mut error_message: Signal<Option<String>>,
    notice: Signal<Option<String>>,
) {
    let content = {
        let state = data.read();
        let rows = view::ordered_rows(&state);
        csv_io::export_csv(&rows, &state.visible_columns())
    };

    let Some(handle) = rfd::AsyncFileDialog::new()
        .set_file_name(csv_io::export_file_name_today())
        .add_filter("CSV", &["csv"])
        .save_file()
        .await
    else {
        return;
    };

    let path = handle.path().to_path_buf();
    match write_atomically(&path, content.as_bytes()) {
        Ok(()) => {
            info!(path = %path.display(), "exported CSV");
            error_message.set(None);
            show_notice(notice, format!("Exported to {}", path.display()));
        }
        Err(err) => {
            error!(path = %path.display(), error = %err, "CSV export failed");
            error_message.set(Some(format!("Failed to export CSV file: {err}")));
        }
    }
}

fn show_notice(mut notice: Signal<Option<String>>, message: String) {
    let serial = NOTICE_SERIAL.fetch_add(1, Ordering::Relaxed) + 1;
    notice.set(Some(message));
    spawn(async move {
        tokio::time::sleep(NOTICE_DURATION).await;
        if NOTICE_SERIAL.load(Ordering::Relaxed) == serial {
            notice.set(None);
        }
    });
}
