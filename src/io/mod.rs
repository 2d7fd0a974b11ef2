pub mod csv_io;
pub mod storage;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Writes through a temp file in the target directory and renames it into
/// place, so readers never see a half-written file.
pub fn write_atomically(path: &Path, content: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(content)?;
    temp_file.as_file().sync_all()?;

    match temp_file.persist(path) {
        Ok(_) => Ok(()),
        // Windows refuses to rename over an existing file.
        Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
            fs::remove_file(path)?;
            err.file.persist(path).map(|_| ()).map_err(|e| e.error)
        }
        Err(err) => Err(err.error),
    }
}
