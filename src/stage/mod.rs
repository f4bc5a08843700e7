//! The per-file stages and the adapter that runs them over a stream of units.
//!
//! A stage sees one unit at a time, in arrival order. `pipe` awaits each
//! unit's outcome before pulling the next one from upstream, so output order
//! always matches input order and a stage never has two units in flight.

use crate::cancellation::CancellationToken;
use crate::core_types::FileUnit;
use crate::errors::{Error, Result};
use crate::formatter::Formatter;
use crate::options::{effective_options, FormatOptions};
use crate::resolver::ConfigResolver;
use async_trait::async_trait;
use futures::stream::{self, Stream, StreamExt};
use log::{debug, warn};
use std::fmt;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;

mod builder;
mod check;
mod transform;

pub use builder::{check, prettier, StageBuilder};
pub use check::CheckStage;
pub use transform::PrettierStage;

/// A single-worker transform over file units.
///
/// `transform` takes `&mut self`: one stage instance processes one unit at a
/// time and owns whatever state it accumulates.
#[async_trait]
pub trait Transform: Send {
    /// Processes one unit. `Ok` forwards it downstream, `Err` drops it.
    async fn transform(&mut self, file: FileUnit) -> Result<FileUnit>;

    /// Called once after the last unit.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Short name used in log lines.
    fn name(&self) -> &'static str;
}

/// Everything the two stages share: the collaborators and the explicit options.
#[derive(Clone)]
pub(crate) struct StageContext {
    pub(crate) formatter: Arc<dyn Formatter>,
    pub(crate) resolver: Arc<dyn ConfigResolver>,
    pub(crate) options: FormatOptions,
}

// Custom Debug implementation, as the collaborators are trait objects.
impl fmt::Debug for StageContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageContext")
            .field("formatter", &self.formatter.name())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Outcome of the intake rules shared by both stages.
pub(crate) enum Intake {
    /// Nothing to format; forward as is.
    Forward(FileUnit),
    /// Buffered unit and its decoded text.
    Text(FileUnit, String),
}

impl StageContext {
    /// Applies the intake rules: null units pass, streams are rejected,
    /// buffers are decoded.
    pub(crate) fn intake(file: FileUnit) -> Result<Intake> {
        if file.is_null() {
            debug!("{}: no contents, forwarding.", file.path.display());
            return Ok(Intake::Forward(file));
        }
        if file.is_stream() {
            warn!("{}: streamed contents rejected.", file.path.display());
            return Err(Error::UnsupportedInput { path: file.path });
        }
        let text = String::from_utf8_lossy(file.buffer().unwrap_or_default()).into_owned();
        Ok(Intake::Text(file, text))
    }

    /// Resolves project config for `path` and layers the explicit options and
    /// the path hint on top.
    pub(crate) async fn options_for(&self, path: &Path) -> Result<FormatOptions> {
        let project = self
            .resolver
            .resolve(path, &self.options)
            .await
            .map_err(|source| Error::ConfigResolution {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(effective_options(project.as_ref(), &self.options, path))
    }
}

struct PipeState<S, T> {
    upstream: Pin<Box<S>>,
    stage: T,
    token: CancellationToken,
    finished: bool,
}

/// Runs `stage` over `upstream`, yielding each unit's outcome in order.
///
/// After the last unit the stage is flushed, and a flush error (the check
/// stage's report) is yielded as the final item. If `token` is cancelled,
/// a single [`Error::Interrupted`] is yielded and the stream ends without
/// flushing.
///
/// Per-file errors do not end the stream. Consumers that stop at the first
/// error can use `TryStreamExt::try_next` or `try_collect`.
pub fn pipe<S, T>(
    upstream: S,
    stage: T,
    token: CancellationToken,
) -> impl Stream<Item = Result<FileUnit>> + Send
where
    S: Stream<Item = FileUnit> + Send + 'static,
    T: Transform + 'static,
{
    let state = PipeState {
        upstream: Box::pin(upstream),
        stage,
        token,
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        if state.finished {
            return None;
        }
        if state.token.is_cancelled() {
            warn!("{}: interrupted, dropping remaining input.", state.stage.name());
            state.finished = true;
            return Some((Err(Error::Interrupted), state));
        }

        match state.upstream.next().await {
            Some(file) => {
                let outcome = state.stage.transform(file).await;
                Some((outcome, state))
            }
            None => {
                state.finished = true;
                debug!("{}: end of input.", state.stage.name());
                match state.stage.flush() {
                    Ok(()) => None,
                    Err(e) => Some((Err(e), state)),
                }
            }
        }
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    //! A small deterministic formatter for unit tests.

    use crate::formatter::{FormatOutput, Formatter, FormatterError};
    use crate::options::FormatOptions;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Trims trailing whitespace per line and ends the text with one newline.
    /// Text containing `@@` is a syntax error.
    #[derive(Debug, Default)]
    pub(crate) struct TrimFormatter {
        pub(crate) calls: AtomicUsize,
    }

    impl TrimFormatter {
        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Formatter for TrimFormatter {
        async fn format(
            &self,
            text: &str,
            _options: &FormatOptions,
        ) -> Result<FormatOutput, FormatterError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if text.contains("@@") {
                return Err(FormatterError::new("SyntaxError", "Unexpected token (1:1)"));
            }
            let mut out: String = text
                .lines()
                .map(|line| format!("{}\n", line.trim_end()))
                .collect();
            if out.is_empty() {
                out.push('\n');
            }
            Ok(FormatOutput::PlainText(out))
        }

        fn name(&self) -> &str {
            "trim"
        }
    }
}
