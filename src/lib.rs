//! `prettier_pipe` runs a stream of files through the Prettier code formatter.
//!
//! The core is a per-file stage that sits inside a pipeline of unknown length:
//! it takes one [`FileUnit`] at a time, resolves that file's configuration,
//! hands the text to an external [`Formatter`], and forwards the unit (rewritten
//! and marked `is_prettier` when the formatting changed) or yields an error
//! for that one file. A check variant classifies files instead of rewriting
//! them and reports every unformatted file in a single error at end of stream.
//!
//! The pieces are:
//! 1.  **Stages**: [`PrettierStage`] and [`CheckStage`], built with [`StageBuilder`]
//!     or the [`prettier`] / [`check`] shortcuts.
//! 2.  **Pipe**: [`pipe`] adapts any `futures::Stream` of units into an ordered
//!     stream of outcomes, one unit in flight at a time.
//! 3.  **Collaborators**: the [`Formatter`] and [`ConfigResolver`] traits, with
//!     [`CommandFormatter`] (drives the `prettier` executable) and
//!     [`FsConfigResolver`] (`.prettierrc` and friends) as the defaults.
//!
//! The `prettier-pipe` binary wires these to file discovery and write-back.
//!
//! # Example: Library Usage
//!
//! ```
//! use async_trait::async_trait;
//! use futures::{stream, TryStreamExt};
//! use prettier_pipe::formatter::{FormatOutput, Formatter, FormatterError};
//! use prettier_pipe::{pipe, CancellationToken, Contents, FileUnit, FormatOptions, NoConfigResolver, StageBuilder};
//!
//! // Any formatter will do; this one only trims trailing spaces.
//! struct Trim;
//!
//! #[async_trait]
//! impl Formatter for Trim {
//!     async fn format(&self, text: &str, _: &FormatOptions) -> Result<FormatOutput, FormatterError> {
//!         Ok(FormatOutput::PlainText(format!("{}\n", text.trim_end())))
//!     }
//!     fn name(&self) -> &str { "trim" }
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let stage = StageBuilder::new(Trim).resolver(NoConfigResolver).prettier_stage();
//! let files = vec![
//!     FileUnit::new("/w", "/w", "/w/a.txt").with_contents(Contents::Buffer(b"a   ".to_vec())),
//!     FileUnit::new("/w", "/w", "/w/b.txt").with_contents(Contents::Buffer(b"b\n".to_vec())),
//! ];
//!
//! let out: Vec<FileUnit> = pipe(stream::iter(files), stage, CancellationToken::new())
//!     .try_collect()
//!     .await
//!     .unwrap();
//!
//! assert!(out[0].is_prettier);
//! assert_eq!(out[0].buffer(), Some(&b"a\n"[..]));
//! assert!(!out[1].is_prettier);
//! # });
//! ```

pub mod cancellation;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core_types;
pub mod discovery;
pub mod errors;
pub mod formatter;
pub mod options;
pub mod output;
pub mod prelude;
pub mod resolver;
pub mod signal;
pub mod stage;

// Re-export key public types for easier use as a library
pub use cancellation::CancellationToken;
pub use config::{Config, ConfigBuilder, Mode};
pub use core_types::{Contents, FileUnit};
pub use errors::{Error, Result};
pub use formatter::{CommandFormatter, FormatOutput, Formatter, FormatterError};
pub use options::{effective_options, FormatOptions};
pub use output::RunSummary;
pub use resolver::{ConfigResolver, FsConfigResolver, NoConfigResolver};
pub use stage::{check, pipe, prettier, CheckStage, PrettierStage, StageBuilder, Transform};

use crate::core_types::{relative_path, to_slash};
use futures::{Stream, StreamExt};
use log::{error, info};

/// Discovers the text files under the configured inputs.
///
/// This is the first half of a command-line run. Returns
/// `Err(Error::NoFilesFound)` when nothing is found.
pub fn discover(config: &Config, token: &CancellationToken) -> Result<Vec<FileUnit>> {
    let units =
        discovery::discover_units(&config.discovery, &config.inputs, &config.cwd, token)?;
    if units.is_empty() {
        return Err(Error::NoFilesFound);
    }
    Ok(units)
}

/// Builds the stage factory a run uses: the configured executable, the
/// explicit options, and filesystem config resolution unless disabled.
pub fn stage_builder(config: &Config) -> StageBuilder {
    let formatter =
        CommandFormatter::new(&config.formatter_program).args(config.formatter_args.iter().cloned());
    let builder = StageBuilder::new(formatter)
        .options(config.options.clone())
        .cwd(config.cwd.clone());
    if config.use_config {
        builder
    } else {
        builder.resolver(NoConfigResolver)
    }
}

/// Executes a complete run: discover, pipe every file through the stage for
/// `config.mode`, and write back forwarded files.
///
/// Per-file errors end the run unless `config.keep_going` is set, in which
/// case they are logged and counted in the summary. The check report is
/// returned in the summary rather than as an error.
pub async fn run(config: &Config, token: &CancellationToken) -> Result<RunSummary> {
    let units = discover(config, token)?;
    info!(
        "Processing {} file(s) with '{}'.",
        units.len(),
        config.formatter_program
    );

    let builder = stage_builder(config);
    let upstream = futures::stream::iter(units);
    match config.mode {
        Mode::Check => drive(pipe(upstream, builder.check_stage(), token.clone()), config).await,
        Mode::Write | Mode::ListDifferent => {
            drive(pipe(upstream, builder.prettier_stage(), token.clone()), config).await
        }
    }
}

async fn drive<S>(outcomes: S, config: &Config) -> Result<RunSummary>
where
    S: Stream<Item = Result<FileUnit>>,
{
    futures::pin_mut!(outcomes);
    let mut summary = RunSummary::default();
    let display = |path: &std::path::Path| to_slash(&relative_path(&config.cwd, path));

    while let Some(outcome) = outcomes.next().await {
        match outcome {
            Ok(unit) => {
                if unit.is_prettier {
                    summary.changed.push(display(&unit.path));
                } else {
                    summary.unchanged += 1;
                }
                if config.mode == Mode::Write {
                    output::write_unit(&unit, config.dest.as_deref()).await?;
                }
            }
            Err(Error::AggregateViolations { files }) => summary.violations = files,
            Err(e) if e.is_per_file() && config.keep_going => {
                error!("{}", e);
                if let Some(path) = e.path() {
                    summary.failed.push(display(path));
                }
            }
            Err(e) => return Err(e),
        }
    }
    Ok(summary)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    /// A formatter script: appends `;` to lines lacking one, fails on `@@`.
    const SEMI_SCRIPT: &str = r#"input=$(cat); case "$input" in *@@*) echo '[error] stdin: SyntaxError: Unexpected token (1:1)' >&2; exit 2;; esac; printf '%s\n' "$input" | sed -e '/;$/!s/$/;/'"#;

    fn config_for(root: &std::path::Path, mode: Mode) -> anyhow::Result<Config> {
        Ok(ConfigBuilder::new()
            .input(root.to_str().unwrap())
            .mode(mode)
            .formatter("sh")
            .formatter_arg("-c")
            .formatter_arg(SEMI_SCRIPT)
            .formatter_arg("sh")
            .use_config(false)
            .cwd(root.canonicalize()?)
            .build()?)
    }

    #[tokio::test]
    async fn test_run_writes_changed_files() -> anyhow::Result<()> {
        let temp = tempdir()?;
        fs::write(temp.path().join("a.js"), "var a = 1")?;
        fs::write(temp.path().join("b.js"), "var b = 2;\n")?;

        let config = config_for(temp.path(), Mode::Write)?;
        let summary = run(&config, &CancellationToken::new()).await?;

        assert_eq!(summary.changed, vec!["a.js"]);
        assert_eq!(summary.unchanged, 1);
        assert_eq!(fs::read_to_string(temp.path().join("a.js"))?, "var a = 1;\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_run_check_collects_violations() -> anyhow::Result<()> {
        let temp = tempdir()?;
        fs::write(temp.path().join("a.js"), "var a = 1")?;
        fs::write(temp.path().join("b.js"), "var b = 2;\n")?;

        let config = config_for(temp.path(), Mode::Check)?;
        let summary = run(&config, &CancellationToken::new()).await?;

        assert_eq!(summary.violations, vec!["a.js"]);
        assert_eq!(fs::read_to_string(temp.path().join("a.js"))?, "var a = 1");
        Ok(())
    }

    #[tokio::test]
    async fn test_run_halts_on_first_error_by_default() -> anyhow::Result<()> {
        let temp = tempdir()?;
        fs::write(temp.path().join("a.js"), "var @@ = 1")?;
        fs::write(temp.path().join("b.js"), "var b = 2")?;

        let config = config_for(temp.path(), Mode::Write)?;
        let result = run(&config, &CancellationToken::new()).await;
        assert!(matches!(result, Err(Error::FormatFailure { .. })));
        // Processing stopped before b.js.
        assert_eq!(fs::read_to_string(temp.path().join("b.js"))?, "var b = 2");

        let mut config = config;
        config.keep_going = true;
        let summary = run(&config, &CancellationToken::new()).await?;
        assert_eq!(summary.failed, vec!["a.js"]);
        assert_eq!(summary.changed, vec!["b.js"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_run_empty_dir_reports_no_files() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let config = config_for(temp.path(), Mode::Write)?;
        let result = run(&config, &CancellationToken::new()).await;
        assert!(matches!(result, Err(Error::NoFilesFound)));
        Ok(())
    }

    #[tokio::test]
    async fn test_run_respects_cancellation() -> anyhow::Result<()> {
        let temp = tempdir()?;
        fs::write(temp.path().join("a.js"), "var a = 1")?;
        let token = CancellationToken::new();
        token.cancel();

        let config = config_for(temp.path(), Mode::Write)?;
        let result = run(&config, &token).await;
        assert!(matches!(result, Err(Error::Interrupted)));
        Ok(())
    }
}
