// src/stage/check.rs

use super::{Intake, StageContext, Transform};
use crate::core_types::{relative_path, to_slash, FileUnit};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use log::debug;
use std::mem;
use std::path::PathBuf;
use tracing::Instrument;

/// Reports units that are not formatted, without rewriting anything.
///
/// Every unit is forwarded unchanged. Paths of units the formatter considers
/// unformatted are collected in arrival order, and `flush` turns them into a
/// single [`Error::AggregateViolations`].
#[derive(Debug)]
pub struct CheckStage {
    context: StageContext,
    /// Directory violation paths are made relative to. `None` uses each unit's own `cwd`.
    cwd: Option<PathBuf>,
    violations: Vec<String>,
}

impl CheckStage {
    pub(crate) fn new(context: StageContext, cwd: Option<PathBuf>) -> Self {
        Self {
            context,
            cwd,
            violations: Vec::new(),
        }
    }

    /// Paths recorded so far.
    pub fn violations(&self) -> &[String] {
        &self.violations
    }

    async fn check_unit(&mut self, file: FileUnit) -> Result<FileUnit> {
        let (file, text) = match StageContext::intake(file)? {
            Intake::Forward(file) => return Ok(file),
            Intake::Text(file, text) => (file, text),
        };

        let options = self.context.options_for(&file.path).await?;
        let formatted = self
            .context
            .formatter
            .check(&text, &options)
            .await
            .map_err(|cause| Error::FormatFailure {
                path: file.path.clone(),
                cause,
            })?;

        if !formatted {
            let cwd = self.cwd.as_deref().unwrap_or(file.cwd.as_path());
            let relative = to_slash(&relative_path(cwd, &file.path));
            debug!("{}: not formatted.", relative);
            self.violations.push(relative);
        }
        Ok(file)
    }
}

#[async_trait]
impl Transform for CheckStage {
    async fn transform(&mut self, file: FileUnit) -> Result<FileUnit> {
        let span = tracing::debug_span!("check", path = %file.path.display());
        self.check_unit(file).instrument(span).await
    }

    fn flush(&mut self) -> Result<()> {
        if self.violations.is_empty() {
            return Ok(());
        }
        Err(Error::AggregateViolations {
            files: mem::take(&mut self.violations),
        })
    }

    fn name(&self) -> &'static str {
        "check"
    }
}
