//! Defines the error type raised by the stages and the driver.
//!
//! Failures coming from collaborators (the external formatter, project config
//! files) are normalized into these variants as soon as they cross into the
//! crate, so callers match on variants instead of parsing messages.

use crate::constants::{CHECK_REPORT_HEADER, PLUGIN_NAME, STREAMING_NOT_SUPPORTED};
use crate::formatter::FormatterError;
use crate::resolver::ConfigError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced on a stage's output stream or returned by the driver.
#[derive(Error, Debug)]
pub enum Error {
    /// The unit's contents are a live byte stream, which the stages never consume.
    #[error("{}", STREAMING_NOT_SUPPORTED)]
    UnsupportedInput {
        /// Path of the rejected unit.
        path: PathBuf,
    },

    /// The formatter rejected the input (e.g. a syntax error) or the verdict query failed.
    #[error("{}: {cause}", .path.display())]
    FormatFailure {
        /// Path of the offending unit.
        path: PathBuf,
        /// The formatter's own error, kept intact.
        #[source]
        cause: FormatterError,
    },

    /// Raised once at end-of-stream by the check stage when any unit was not formatted.
    #[error("{}", violation_report(.files))]
    AggregateViolations {
        /// Cwd-relative, forward-slash paths in arrival order.
        files: Vec<String>,
    },

    /// The project configuration for a unit could not be read or parsed.
    #[error("Failed to resolve config for '{}': {source}", .path.display())]
    ConfigResolution {
        /// Path of the unit whose config was being resolved.
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    /// Error occurring during file or directory access (read, write, metadata).
    #[error("I/O error accessing path '{path}': {source}")]
    Io {
        /// The path that caused the I/O error.
        path: String,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    /// Invalid run configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Discovery found no text files under the inputs.
    #[error("No files found")]
    NoFilesFound,

    /// The operation was cancelled (e.g. Ctrl+C).
    #[error("Operation cancelled by user (Ctrl+C)")]
    Interrupted,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Identifier of the component that raised the error.
    pub fn plugin(&self) -> &'static str {
        PLUGIN_NAME
    }

    /// The file this error is about, when it is about a single file.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::UnsupportedInput { path }
            | Error::FormatFailure { path, .. }
            | Error::ConfigResolution { path, .. } => Some(path),
            Error::Io { path, .. } => Some(Path::new(path)),
            _ => None,
        }
    }

    /// The underlying error kind, e.g. `SyntaxError` for a formatter parse failure.
    pub fn name(&self) -> &str {
        match self {
            Error::FormatFailure { cause, .. } => cause.name(),
            _ => "Error",
        }
    }

    /// Whether the error concerns one unit only, leaving the stage usable.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedInput { .. }
                | Error::FormatFailure { .. }
                | Error::ConfigResolution { .. }
        )
    }
}

/// Renders the check-mode report: the fixed header, then one path per line.
pub fn violation_report(files: &[String]) -> String {
    let mut report = String::from(CHECK_REPORT_HEADER);
    for file in files {
        report.push('\n');
        report.push_str(file);
    }
    report
}

/// Helper function to create an `Error::Io` with path context.
pub fn io_error_with_path<P: AsRef<Path>>(source: std::io::Error, path: P) -> Error {
    Error::Io {
        path: path.as_ref().display().to_string(),
        source,
    }
}
