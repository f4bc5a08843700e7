//! Defines the `Config` struct that drives a command-line run.
//!
//! This module consolidates the settings parsed and validated from the CLI (or
//! set through [`ConfigBuilder`]) so the rest of the driver reads them from one
//! typed place. Formatter options themselves stay an open map; only the run's
//! own switches are typed here.

use crate::options::FormatOptions;
use std::path::PathBuf;

pub use builder::ConfigBuilder;
mod builder;
mod parsing;
pub mod path_resolve;
mod validation;

pub use parsing::{parse_option_pair, parse_options};

/// What the run does with each file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Rewrite changed files in place, or write everything under `dest`.
    #[default]
    Write,
    /// Report unformatted files and fail if there are any.
    Check,
    /// Print the files whose formatting would change; write nothing.
    ListDifferent,
}

/// Settings for walking the inputs.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Whether to respect `.gitignore`, `.ignore`, and other VCS ignore files.
    pub use_gitignore: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            use_gitignore: true,
        }
    }
}

/// Settings for one run of the driver.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute, canonicalized input files and directories.
    pub inputs: Vec<PathBuf>,
    pub mode: Mode,
    /// Destination directory for `Mode::Write`. `None` writes in place.
    pub dest: Option<PathBuf>,
    /// Formatter executable and its leading arguments.
    pub formatter_program: String,
    pub formatter_args: Vec<String>,
    /// Explicit formatter options, layered over each file's project config.
    pub options: FormatOptions,
    /// Whether project configuration files are looked up.
    pub use_config: bool,
    /// Continue past per-file errors.
    pub keep_going: bool,
    pub discovery: DiscoveryConfig,
    /// Directory reported paths are relative to.
    pub cwd: PathBuf,
}
