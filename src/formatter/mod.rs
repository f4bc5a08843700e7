//! The seam to the external code formatter.
//!
//! The formatting engine is a black box: it takes source text plus options and
//! returns formatted text, or a structured error. Whatever shape the engine
//! reports its failures in, implementations convert them into a
//! [`FormatterError`] before returning.

use crate::options::FormatOptions;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

mod command;
mod source_map;

pub use command::{options_to_args, parse_diagnostic, CommandFormatter};
pub use source_map::{ReplaceSourceMap, SourceMapApplier};

/// Result of a successful format call.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatOutput {
    /// Formatted text only.
    PlainText(String),
    /// Formatted text with a source map describing the rewrite.
    TextWithMap { code: String, map: Value },
}

impl FormatOutput {
    /// The formatted text, whichever shape the result has.
    pub fn code(&self) -> &str {
        match self {
            FormatOutput::PlainText(code) => code,
            FormatOutput::TextWithMap { code, .. } => code,
        }
    }

    /// Splits the output into its text and optional map.
    pub fn into_parts(self) -> (String, Option<Value>) {
        match self {
            FormatOutput::PlainText(code) => (code, None),
            FormatOutput::TextWithMap { code, map } => (code, Some(map)),
        }
    }
}

/// A failure reported by the formatter, e.g. a syntax error in the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{name}: {message}")]
pub struct FormatterError {
    name: String,
    message: String,
}

impl FormatterError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// The error kind as the formatter names it (`SyntaxError`, ...).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_syntax_error(&self) -> bool {
        self.name == "SyntaxError"
    }

    /// Whether the formatter has no parser for the file's type (e.g. `LICENSE`).
    pub fn is_unknown_parser(&self) -> bool {
        self.name == "UndefinedParserError" || self.message.contains("No parser could be inferred")
    }
}

/// A code formatter the stages delegate to.
///
/// Both calls may suspend. The stages await each call to completion before
/// touching the next unit.
#[async_trait]
pub trait Formatter: Send + Sync {
    /// Formats `text` under `options`.
    async fn format(
        &self,
        text: &str,
        options: &FormatOptions,
    ) -> Result<FormatOutput, FormatterError>;

    /// Reports whether `text` is already in canonical form under `options`.
    ///
    /// The default implementation formats and compares.
    async fn check(&self, text: &str, options: &FormatOptions) -> Result<bool, FormatterError> {
        let output = self.format(text, options).await?;
        Ok(output.code() == text)
    }

    /// Returns a descriptive name for the formatter.
    fn name(&self) -> &str;
}
