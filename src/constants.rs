// src/constants.rs

/// Identifier attached to every error raised by the stages.
pub const PLUGIN_NAME: &str = env!("CARGO_PKG_NAME");

/// Message of the error raised for units whose contents are a live stream.
pub const STREAMING_NOT_SUPPORTED: &str = "Streaming not supported";

/// First line of the check-mode report. Downstream tooling matches on it verbatim.
pub const CHECK_REPORT_HEADER: &str =
    "Code style issues found in the following file(s). Forgot to run Prettier?";

/// Option key carrying the file path hint. Always set by the stage itself.
pub const FILEPATH_OPTION: &str = "filepath";

/// Option key that turns on `.editorconfig` lookup during config resolution.
pub const EDITORCONFIG_OPTION: &str = "editorconfig";

/// Option key naming an explicit config file, bypassing discovery.
pub const CONFIG_OPTION: &str = "config";

/// Project config file names, searched in this order within each directory.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    "package.json",
    ".prettierrc",
    ".prettierrc.json",
    ".prettierrc.yaml",
    ".prettierrc.yml",
    ".prettierrc.toml",
];

/// Name of the EditorConfig file.
pub const EDITORCONFIG_FILE_NAME: &str = ".editorconfig";

/// Default external formatter executable.
pub const DEFAULT_FORMATTER_PROGRAM: &str = "prettier";

/// Printed by a check run that found nothing to report.
pub const CHECK_OK_MESSAGE: &str = "All matched files use Prettier code style!";
