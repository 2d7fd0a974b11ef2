use std::path::PathBuf;

use directories::ProjectDirs;

use crate::state::data_model::DEFAULT_ROWS_PER_PAGE;

pub const STATE_DIR_VAR: &str = "TABLEDECK_STATE_DIR";
pub const ROWS_PER_PAGE_VAR: &str = "TABLEDECK_ROWS_PER_PAGE";
pub const OPEN_VAR: &str = "TABLEDECK_OPEN";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the persisted table state.
    pub state_dir: PathBuf,
    /// Page size for a freshly seeded table.
    pub rows_per_page: usize,
    /// CSV imported once at startup.
    pub open_csv: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let state_dir = lookup(STATE_DIR_VAR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_state_dir);

        let rows_per_page = lookup(ROWS_PER_PAGE_VAR)
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_ROWS_PER_PAGE);

        let open_csv = lookup(OPEN_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Self {
            state_dir,
            rows_per_page,
            open_csv,
        }
    }
}

fn default_state_dir() -> PathBuf {
    ProjectDirs::from("dev", "tabledeck", "tabledeck")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
