// tests/common.rs

#![allow(dead_code)] // Each integration test uses a different subset of the helpers.

use async_trait::async_trait;
use prettier_pipe::formatter::{FormatOutput, Formatter, FormatterError};
use prettier_pipe::resolver::ConfigError;
use prettier_pipe::{ConfigResolver, Contents, FileUnit, FormatOptions};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

// Helper function to get the binary command
pub fn prettier_pipe_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("prettier-pipe"))
}

/// An in-process formatter for one-line `var name = '...'` statements.
///
/// Like Prettier it prints double quotes and a trailing semicolon unless told
/// otherwise (`singleQuote`, `semi`), and ends the output with a newline. An
/// unterminated or mismatched string is a `SyntaxError`. Every call records
/// the options it was given.
#[derive(Debug, Default)]
pub struct ToyFormatter {
    calls: AtomicUsize,
    seen: Mutex<Vec<FormatOptions>>,
}

impl ToyFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Options of every call so far, in call order.
    pub fn seen_options(&self) -> Vec<FormatOptions> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Formatter for ToyFormatter {
    async fn format(
        &self,
        text: &str,
        options: &FormatOptions,
    ) -> Result<FormatOutput, FormatterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(options.clone());
        toy_format(text, options).map(FormatOutput::PlainText)
    }

    fn name(&self) -> &str {
        "toy"
    }
}

fn toy_format(text: &str, options: &FormatOptions) -> Result<String, FormatterError> {
    let statement = text.trim();
    let statement = statement.strip_suffix(';').unwrap_or(statement).trim_end();

    let rest = statement
        .strip_prefix("var ")
        .ok_or_else(|| FormatterError::new("SyntaxError", "Unexpected token (1:1)"))?;
    let (name, literal) = rest
        .split_once('=')
        .ok_or_else(|| FormatterError::new("SyntaxError", "Missing initializer (1:5)"))?;
    let literal = literal.trim();

    let open = literal.chars().next().filter(|c| *c == '\'' || *c == '"');
    let value = match open {
        Some(quote) if literal.len() >= 2 && literal.ends_with(quote) => {
            &literal[1..literal.len() - 1]
        }
        _ => {
            return Err(FormatterError::new(
                "SyntaxError",
                format!("Unterminated string constant. (1:{})", text.find(literal).unwrap_or(0) + 1),
            ))
        }
    };

    let quote = if options.get_bool("singleQuote") == Some(true) { '\'' } else { '"' };
    let semi = if options.get_bool("semi") == Some(false) { "" } else { ";" };
    Ok(format!("var {} = {}{}{}{}\n", name.trim(), quote, value, quote, semi))
}

/// A resolver that returns fixed options and counts its calls.
#[derive(Debug, Default)]
pub struct CountingResolver {
    calls: AtomicUsize,
    options: Option<FormatOptions>,
}

impl CountingResolver {
    pub fn returning(options: Option<FormatOptions>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            options,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigResolver for CountingResolver {
    async fn resolve(
        &self,
        _path: &Path,
        _options: &FormatOptions,
    ) -> Result<Option<FormatOptions>, ConfigError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.options.clone())
    }
}

/// A buffered unit at `<root>/src/<name>` with `root` as cwd and base.
pub fn buffer_unit(root: &Path, name: &str, text: &str) -> FileUnit {
    FileUnit::new(root, root, src_path(root, name))
        .with_contents(Contents::Buffer(text.as_bytes().to_vec()))
}

/// A unit with no contents.
pub fn null_unit(root: &Path, name: &str) -> FileUnit {
    FileUnit::new(root, root, src_path(root, name))
}

/// A unit whose contents are a live stream.
pub fn stream_unit(root: &Path, name: &str) -> FileUnit {
    let reader: Box<dyn tokio::io::AsyncRead + Send + Unpin> = Box::new(&b"var foo = 'bar'"[..]);
    FileUnit::new(root, root, src_path(root, name)).with_contents(Contents::Stream(reader))
}

pub fn src_path(root: &Path, name: &str) -> PathBuf {
    root.join("src").join(name)
}

/// The unit's contents as text.
pub fn text_of(unit: &FileUnit) -> String {
    String::from_utf8_lossy(unit.buffer().unwrap_or_default()).into_owned()
}
