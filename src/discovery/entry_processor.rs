// src/discovery/entry_processor.rs

use crate::core_types::{Contents, FileUnit};
use crate::errors::{io_error_with_path, Result};
use ignore::DirEntry;
use log::{debug, trace, warn};
use std::path::Path;

/// Turns one walker entry into a buffered unit.
///
/// Returns `Ok(None)` for walker errors, non-files and binary files.
/// Returns `Err` when a file cannot be read.
pub(super) fn load_direntry(
    entry_result: std::result::Result<DirEntry, ignore::Error>,
    base: &Path,
    cwd: &Path,
) -> Result<Option<FileUnit>> {
    let entry = match entry_result {
        Ok(entry) => entry,
        Err(ignore_error) => {
            warn!("Walker error: {}", ignore_error);
            return Ok(None);
        }
    };

    if !entry.file_type().is_some_and(|t| t.is_file()) {
        trace!("Skipping non-file entry: {}", entry.path().display());
        return Ok(None);
    }

    let path = entry.path();
    let bytes = std::fs::read(path).map_err(|e| io_error_with_path(e, path))?;
    if content_inspector::inspect(&bytes).is_binary() {
        debug!("Skipping binary file: {}", path.display());
        return Ok(None);
    }

    Ok(Some(
        FileUnit::new(cwd, base, path).with_contents(Contents::Buffer(bytes)),
    ))
}
