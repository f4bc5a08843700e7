// src/stage/transform.rs

use super::{Intake, StageContext, Transform};
use crate::core_types::{Contents, FileUnit};
use crate::errors::{Error, Result};
use crate::formatter::SourceMapApplier;
use async_trait::async_trait;
use log::debug;
use std::fmt;
use std::sync::Arc;
use tracing::Instrument;

/// Rewrites each buffered unit with the formatter's output.
///
/// A unit whose formatted text differs from its original is marked with
/// `is_prettier = true` and its buffer replaced; an already formatted unit is
/// forwarded untouched.
pub struct PrettierStage {
    context: StageContext,
    source_maps: Arc<dyn SourceMapApplier>,
}

impl PrettierStage {
    pub(crate) fn new(context: StageContext, source_maps: Arc<dyn SourceMapApplier>) -> Self {
        Self {
            context,
            source_maps,
        }
    }

    async fn format_unit(&self, file: FileUnit) -> Result<FileUnit> {
        let (mut file, text) = match StageContext::intake(file)? {
            Intake::Forward(file) => return Ok(file),
            Intake::Text(file, text) => (file, text),
        };

        let options = self.context.options_for(&file.path).await?;
        let output = self
            .context
            .formatter
            .format(&text, &options)
            .await
            .map_err(|cause| Error::FormatFailure {
                path: file.path.clone(),
                cause,
            })?;

        let (code, map) = output.into_parts();
        if let Some(map) = map {
            if file.source_map.is_some() {
                self.source_maps.apply(&mut file, map);
            }
        }

        if code != text {
            debug!("{}: reformatted.", file.path.display());
            file.is_prettier = true;
            file.contents = Contents::Buffer(code.into_bytes());
        } else {
            debug!("{}: already formatted.", file.path.display());
        }
        Ok(file)
    }
}

impl fmt::Debug for PrettierStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrettierStage")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transform for PrettierStage {
    async fn transform(&mut self, file: FileUnit) -> Result<FileUnit> {
        let span = tracing::debug_span!("format", path = %file.path.display());
        self.format_unit(file).instrument(span).await
    }

    fn name(&self) -> &'static str {
        "prettier"
    }
}
