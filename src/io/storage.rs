use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info, warn};

use crate::io::write_atomically;
use crate::state::table_state::TableState;

/// Key the whole table state is stored under.
pub const PERSIST_KEY: &str = "persist-root";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("state serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Opaque string blobs addressed by key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per key inside a directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        write_atomically(&self.path_for(key), value.as_bytes())?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The persisted state, or `None` when nothing was saved yet.
pub fn load_state(store: &impl KeyValueStore) -> Result<Option<TableState>, StorageError> {
    let Some(blob) = store.get(PERSIST_KEY)? else {
        return Ok(None);
    };
    Ok(Some(serde_json::from_str(&blob)?))
}

pub fn save_state(store: &impl KeyValueStore, state: &TableState) -> Result<(), StorageError> {
    let blob = serde_json::to_string(state)?;
    store.set(PERSIST_KEY, &blob)
}

/// Saves `state` and logs a failure. The error is the text shown to the user.
pub fn persist_state(store: &impl KeyValueStore, state: &TableState) -> Result<(), String> {
    save_state(store, state).map_err(|err| {
        error!(error = %err, "failed to save table state");
        format!("Failed to save table state: {err}")
    })
}

/// Startup state: the persisted blob when readable, otherwise `fallback`.
pub fn rehydrate(store: &impl KeyValueStore, fallback: impl FnOnce() -> TableState) -> TableState {
    match load_state(store) {
        Ok(Some(state)) => {
            info!(rows = state.data().len(), "rehydrated table state");
            state
        }
        Ok(None) => fallback(),
        Err(err) => {
            warn!(error = %err, "discarding unreadable table state");
            fallback()
        }
    }
}
