//! Discovers input files and loads them as buffered units.
use crate::cancellation::CancellationToken;
use crate::config::DiscoveryConfig;
use crate::core_types::FileUnit;
use crate::errors::{Error, Result};
use log::debug;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

mod entry_processor;
mod walker;

use entry_processor::load_direntry;
use walker::build_walker;

/// Walks every input and returns its text files as buffered units.
///
/// Each unit's `base` is the input directory (or, for a file input, the
/// file's parent) and its `cwd` is `cwd`. Units come back in input order,
/// sorted by path within each input; a file reached from two inputs is kept
/// once.
///
/// # Errors
/// Returns `Error::Interrupted` if `token` is cancelled during the walk, or an
/// I/O error if a discovered file cannot be read.
///
/// # Examples
///
/// ```
/// use prettier_pipe::cancellation::CancellationToken;
/// use prettier_pipe::config::DiscoveryConfig;
/// use prettier_pipe::discovery::discover_units;
/// use std::fs;
/// use tempfile::tempdir;
///
/// let temp = tempdir().unwrap();
/// fs::write(temp.path().join("a.js"), "var a = 1;\n").unwrap();
///
/// let units = discover_units(
///     &DiscoveryConfig::default(),
///     &[temp.path().to_path_buf()],
///     temp.path(),
///     &CancellationToken::new(),
/// )
/// .unwrap();
/// assert_eq!(units.len(), 1);
/// assert!(units[0].is_buffer());
/// ```
pub fn discover_units(
    config: &DiscoveryConfig,
    inputs: &[PathBuf],
    cwd: &Path,
    token: &CancellationToken,
) -> Result<Vec<FileUnit>> {
    let mut units = Vec::new();
    let mut seen = HashSet::new();

    for input in inputs {
        if token.is_cancelled() {
            return Err(Error::Interrupted);
        }

        let base = if input.is_file() {
            input.parent().unwrap_or(input.as_path())
        } else {
            input.as_path()
        };

        for entry_result in build_walker(config, input) {
            if token.is_cancelled() {
                return Err(Error::Interrupted);
            }
            if let Some(unit) = load_direntry(entry_result, base, cwd)? {
                if seen.insert(unit.path.clone()) {
                    units.push(unit);
                }
            }
        }
    }

    debug!("Discovery complete. {} file(s) loaded.", units.len());
    Ok(units)
}
