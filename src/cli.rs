// src/cli.rs

use crate::constants::DEFAULT_FORMATTER_PROGRAM;
use clap::Parser;

/// Runs files through the Prettier code formatter.
///
/// prettier-pipe walks the given files and directories (respecting .gitignore
/// rules), resolves each file's Prettier configuration, and pipes the text
/// through an external formatter executable. By default changed files are
/// rewritten in place; `--check` only reports files that are not formatted.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Files or directories to process.
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<String>,

    // --- Mode ---
    /// Report files that are not formatted instead of rewriting them.
    #[arg(short = 'c', long, action = clap::ArgAction::SetTrue)]
    pub check: bool,

    /// Print the paths of files whose formatting would change, without writing them.
    #[arg(short = 'l', long, action = clap::ArgAction::SetTrue, conflicts_with = "check")]
    pub list_different: bool,

    /// Write every processed file under this directory instead of in place.
    #[arg(short = 'd', long, value_name = "DIR", conflicts_with_all = ["check", "list_different"])]
    pub dest: Option<String>,

    // --- Formatter ---
    /// The formatter executable. It reads the text on stdin and writes the result to stdout.
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_FORMATTER_PROGRAM)]
    pub formatter: String,

    /// An argument passed to the formatter before the option flags (repeatable).
    #[arg(long = "formatter-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub formatter_args: Vec<String>,

    /// A formatter option as KEY=VALUE (repeatable). VALUE is read as JSON when it parses, else as a string.
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    // --- Configuration ---
    /// Use this config file instead of searching for one.
    #[arg(long, value_name = "FILE", conflicts_with = "no_config")]
    pub config: Option<String>,

    /// Do not look for project configuration files.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub no_config: bool,

    /// Also take indentation and line settings from .editorconfig files.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub editorconfig: bool,

    // --- Discovery ---
    /// Do not recurse into subdirectories.
    #[arg(short = 'n', long, action = clap::ArgAction::SetTrue)]
    pub no_recursive: bool,

    /// Do not respect .gitignore, .ignore, or other VCS ignore files.
    #[arg(short = 't', long, action = clap::ArgAction::SetTrue)]
    pub no_gitignore: bool,

    // --- Execution Control ---
    /// Keep going after a file fails to format instead of stopping at the first error.
    #[arg(short = 'k', long, action = clap::ArgAction::SetTrue)]
    pub keep_going: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["prettier-pipe", "src"]);
        assert_eq!(cli.inputs, vec!["src"]);
        assert_eq!(cli.formatter, "prettier");
        assert!(!cli.check);
        assert!(cli.formatter_args.is_empty());
    }

    #[test]
    fn test_input_required() {
        assert!(Cli::try_parse_from(["prettier-pipe"]).is_err());
    }

    #[test]
    fn test_check_conflicts_with_dest() {
        let result = Cli::try_parse_from(["prettier-pipe", ".", "--check", "--dest", "out"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_formatter_args_accept_hyphens() {
        let cli = Cli::parse_from([
            "prettier-pipe",
            ".",
            "--formatter",
            "sh",
            "--formatter-arg",
            "-c",
            "--formatter-arg",
            "cat",
        ]);
        assert_eq!(cli.formatter_args, vec!["-c", "cat"]);
    }
}
