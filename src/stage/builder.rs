// src/stage/builder.rs

use super::{CheckStage, PrettierStage, StageContext};
use crate::formatter::{Formatter, ReplaceSourceMap, SourceMapApplier};
use crate::options::FormatOptions;
use crate::resolver::{ConfigResolver, FsConfigResolver};
use std::path::PathBuf;
use std::sync::Arc;

/// Builds fresh stage instances.
///
/// Every call to [`prettier_stage`](Self::prettier_stage) or
/// [`check_stage`](Self::check_stage) returns a new instance with its own
/// state; the builder can be reused for several pipelines.
///
/// ```
/// use prettier_pipe::formatter::CommandFormatter;
/// use prettier_pipe::{FormatOptions, NoConfigResolver, StageBuilder};
///
/// let builder = StageBuilder::new(CommandFormatter::default())
///     .options(FormatOptions::new().set("singleQuote", true))
///     .resolver(NoConfigResolver)
///     .cwd("/work");
/// let _format = builder.prettier_stage();
/// let check = builder.check_stage();
/// assert!(check.violations().is_empty());
/// ```
#[derive(Clone)]
pub struct StageBuilder {
    formatter: Arc<dyn Formatter>,
    resolver: Arc<dyn ConfigResolver>,
    source_maps: Arc<dyn SourceMapApplier>,
    options: FormatOptions,
    cwd: Option<PathBuf>,
}

impl StageBuilder {
    /// Starts a builder around `formatter`, resolving config from the filesystem.
    pub fn new(formatter: impl Formatter + 'static) -> Self {
        Self::with_formatter(Arc::new(formatter))
    }

    /// Like [`new`](Self::new), for a formatter that is already shared.
    pub fn with_formatter(formatter: Arc<dyn Formatter>) -> Self {
        Self {
            formatter,
            resolver: Arc::new(FsConfigResolver),
            source_maps: Arc::new(ReplaceSourceMap),
            options: FormatOptions::new(),
            cwd: None,
        }
    }

    /// Explicit options, layered over the project config of each file.
    pub fn options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    pub fn resolver(mut self, resolver: impl ConfigResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    pub fn shared_resolver(mut self, resolver: Arc<dyn ConfigResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn source_map_applier(mut self, applier: impl SourceMapApplier + 'static) -> Self {
        self.source_maps = Arc::new(applier);
        self
    }

    /// Directory the check stage reports paths relative to.
    ///
    /// Defaults to the process working directory at the time the stage is built.
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    fn context(&self) -> StageContext {
        StageContext {
            formatter: Arc::clone(&self.formatter),
            resolver: Arc::clone(&self.resolver),
            options: self.options.clone(),
        }
    }

    pub fn prettier_stage(&self) -> PrettierStage {
        PrettierStage::new(self.context(), Arc::clone(&self.source_maps))
    }

    pub fn check_stage(&self) -> CheckStage {
        let cwd = self.cwd.clone().or_else(|| match std::env::current_dir() {
            Ok(dir) => Some(dir),
            Err(e) => {
                log::warn!("Cannot read the working directory, using each file's cwd: {}", e);
                None
            }
        });
        CheckStage::new(self.context(), cwd)
    }
}

/// Creates a formatting stage that resolves project config from disk.
pub fn prettier(formatter: impl Formatter + 'static, options: FormatOptions) -> PrettierStage {
    StageBuilder::new(formatter).options(options).prettier_stage()
}

/// Creates a check stage that resolves project config from disk.
pub fn check(formatter: impl Formatter + 'static, options: FormatOptions) -> CheckStage {
    StageBuilder::new(formatter).options(options).check_stage()
}
