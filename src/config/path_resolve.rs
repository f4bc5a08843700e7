// src/config/path_resolve.rs

use crate::errors::{io_error_with_path, Result};
use std::path::PathBuf;

/// Resolves an input path string to an absolute, canonicalized PathBuf.
pub fn resolve_input_path(input_path_str: &str) -> Result<PathBuf> {
    PathBuf::from(input_path_str)
        .canonicalize()
        .map_err(|e| io_error_with_path(e, input_path_str))
}

/// The process working directory, canonicalized so it compares with resolved inputs.
pub fn current_dir() -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(|e| io_error_with_path(e, "."))?;
    Ok(cwd.canonicalize().unwrap_or(cwd))
}
