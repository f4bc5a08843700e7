// src/formatter/command.rs

//! Runs an external formatter executable (Prettier's CLI by default).
//!
//! The text goes in on stdin with `--stdin-filepath`, the formatted text comes
//! back on stdout. Options were already resolved by the stage, so the
//! executable is told not to look for config files of its own.

use super::{FormatOutput, Formatter, FormatterError};
use crate::constants::{CONFIG_OPTION, DEFAULT_FORMATTER_PROGRAM, EDITORCONFIG_OPTION, FILEPATH_OPTION};
use crate::options::FormatOptions;
use async_trait::async_trait;
use log::{debug, warn};
use serde_json::Value;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Option keys consumed by config resolution or by the stdin protocol itself.
const NOT_FORWARDED: &[&str] = &[FILEPATH_OPTION, CONFIG_OPTION, EDITORCONFIG_OPTION];

/// A [`Formatter`] backed by a child process.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Adds a leading argument, passed before the option flags.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for CommandFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_FORMATTER_PROGRAM)
    }
}

#[async_trait]
impl Formatter for CommandFormatter {
    async fn format(
        &self,
        text: &str,
        options: &FormatOptions,
    ) -> Result<FormatOutput, FormatterError> {
        let option_args = options_to_args(options);
        debug!("Running {} {:?} {:?}", self.program, self.args, option_args);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .args(&option_args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                FormatterError::new("SpawnError", format!("failed to run '{}': {}", self.program, e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| FormatterError::new("SpawnError", "formatter stdin is not piped"))?;

        // Feed stdin while collecting stdout, otherwise a large file can fill
        // both pipes and deadlock.
        let input = text.as_bytes();
        let write = async move {
            let result = stdin.write_all(input).await;
            drop(stdin);
            result
        };
        let (write_result, output) = tokio::join!(write, child.wait_with_output());
        let output = output.map_err(|e| FormatterError::new("IoError", e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.trim().is_empty() {
                return Err(FormatterError::new(
                    "Error",
                    format!("'{}' exited with {}", self.program, output.status),
                ));
            }
            let err = parse_diagnostic(&stderr);
            if err.is_unknown_parser() {
                // Files the formatter does not handle pass through unchanged.
                debug!("'{}' skipped the input: {}", self.program, err);
                return Ok(FormatOutput::PlainText(text.to_string()));
            }
            return Err(err);
        }

        if let Err(e) = write_result {
            warn!("'{}' did not read all of its input: {}", self.program, e);
        }

        let code = String::from_utf8(output.stdout).map_err(|e| {
            FormatterError::new("EncodingError", format!("formatter output is not UTF-8: {}", e))
        })?;
        Ok(FormatOutput::PlainText(code))
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// Renders resolved options as command-line flags.
///
/// `singleQuote: true` becomes `--single-quote`, `semi: false` becomes
/// `--no-semi`, scalars become `--flag value`. Non-scalar values are skipped.
pub fn options_to_args(options: &FormatOptions) -> Vec<String> {
    let mut args = vec!["--no-config".to_string(), "--no-editorconfig".to_string()];
    if let Some(filepath) = options.filepath() {
        args.push("--stdin-filepath".to_string());
        args.push(filepath.to_string());
    }

    for (key, value) in options.iter() {
        if NOT_FORWARDED.contains(&key.as_str()) {
            continue;
        }
        let flag = to_kebab_case(key);
        match value {
            Value::Bool(true) => args.push(format!("--{}", flag)),
            Value::Bool(false) => args.push(format!("--no-{}", flag)),
            Value::Number(n) => {
                args.push(format!("--{}", flag));
                args.push(n.to_string());
            }
            Value::String(s) => {
                args.push(format!("--{}", flag));
                args.push(s.clone());
            }
            Value::Null => {}
            Value::Array(_) | Value::Object(_) => {
                debug!("Option '{}' is not a scalar, not passed to the formatter.", key);
            }
        }
    }
    args
}

fn to_kebab_case(key: &str) -> String {
    let mut flag = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                flag.push('-');
            }
            flag.push(ch.to_ascii_lowercase());
        } else {
            flag.push(ch);
        }
    }
    flag
}

/// Extracts the error kind and message from the formatter's stderr.
///
/// Expects Prettier's layout, `[error] <file>: SyntaxError: <message>`, on the
/// first non-empty line. Anything else is reported with the kind `Error`.
pub fn parse_diagnostic(stderr: &str) -> FormatterError {
    let first_line = stderr
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default();
    let line = first_line.strip_prefix("[error]").unwrap_or(first_line).trim();

    let segments: Vec<&str> = line.split(": ").collect();
    let kind_index = segments.iter().position(|segment| {
        segment.ends_with("Error") && segment.chars().all(|c| c.is_ascii_alphanumeric())
    });

    match kind_index {
        Some(i) if i + 1 < segments.len() => {
            FormatterError::new(segments[i], segments[i + 1..].join(": "))
        }
        _ => FormatterError::new("Error", line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_case() {
        assert_eq!(to_kebab_case("singleQuote"), "single-quote");
        assert_eq!(to_kebab_case("semi"), "semi");
        assert_eq!(to_kebab_case("jsxBracketSameLine"), "jsx-bracket-same-line");
        assert_eq!(to_kebab_case("trailing-comma"), "trailing-comma");
    }

    #[test]
    fn test_options_to_args() {
        let options = FormatOptions::new()
            .set("singleQuote", true)
            .set("semi", false)
            .set("tabWidth", 4)
            .set("trailingComma", "all")
            .set("editorconfig", true)
            .set("plugins", serde_json::json!(["a"]))
            .set("filepath", "/w/src/a.js");

        let args = options_to_args(&options);

        // serde_json's default map keeps keys sorted.
        assert_eq!(
            args,
            vec![
                "--no-config",
                "--no-editorconfig",
                "--stdin-filepath",
                "/w/src/a.js",
                "--no-semi",
                "--single-quote",
                "--tab-width",
                "4",
                "--trailing-comma",
                "all",
            ]
        );
    }

    #[test]
    fn test_parse_prettier_syntax_error() {
        let stderr = "[error] /w/src/error.js: SyntaxError: Unterminated string constant. (1:11)\n[error] > 1 | var foo = 'bar\"\n";
        let err = parse_diagnostic(stderr);
        assert_eq!(err.name(), "SyntaxError");
        assert_eq!(err.message(), "Unterminated string constant. (1:11)");
    }

    #[test]
    fn test_parse_unknown_diagnostic() {
        let err = parse_diagnostic("\n[error] No parser could be inferred for file: /w/a.unknown\n");
        assert_eq!(err.name(), "Error");
        assert_eq!(
            err.message(),
            "No parser could be inferred for file: /w/a.unknown"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_formatter_round_trip() {
        // The option flags land in the shell's positional parameters; `cat` only sees stdin.
        let formatter = CommandFormatter::new("sh").args(["-c", "cat", "sh"]);
        let output = formatter
            .format("var a = 1;\n", &FormatOptions::new())
            .await
            .unwrap();
        assert_eq!(output, FormatOutput::PlainText("var a = 1;\n".to_string()));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_formatter_failure_is_parsed() {
        let script = "cat >/dev/null; echo '[error] x.js: SyntaxError: Unexpected token (1:5)' >&2; exit 2";
        let formatter = CommandFormatter::new("sh").args(["-c", script, "sh"]);
        let err = formatter
            .format("let = ;", &FormatOptions::new())
            .await
            .unwrap_err();
        assert_eq!(err.name(), "SyntaxError");
        assert_eq!(err.message(), "Unexpected token (1:5)");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unknown_file_type_passes_through() {
        let script = r#"cat >/dev/null; echo '[error] No parser could be inferred for file "/w/LICENSE".' >&2; exit 2"#;
        let formatter = CommandFormatter::new("sh").args(["-c", script, "sh"]);
        let output = formatter
            .format("MIT License\n", &FormatOptions::new().set("filepath", "/w/LICENSE"))
            .await
            .unwrap();
        assert_eq!(output, FormatOutput::PlainText("MIT License\n".to_string()));
        assert_eq!(
            formatter.check("MIT License\n", &FormatOptions::new()).await,
            Ok(true)
        );
    }

    #[tokio::test]
    async fn test_command_formatter_missing_program() {
        let formatter = CommandFormatter::new("definitely-not-a-real-formatter-binary");
        let err = formatter
            .format("a", &FormatOptions::new())
            .await
            .unwrap_err();
        assert_eq!(err.name(), "SpawnError");
    }
}
