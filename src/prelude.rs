//! The `prettier_pipe` prelude for convenient library usage.
//!
//! Re-exports the types and functions most pipelines need.
//!
//! # Example
//!
//! ```
//! use prettier_pipe::prelude::*;
//!
//! let stage = StageBuilder::new(CommandFormatter::default())
//!     .options(FormatOptions::new().set("semi", false))
//!     .resolver(NoConfigResolver)
//!     .prettier_stage();
//! let token = CancellationToken::new();
//! let _outcomes = pipe(futures::stream::iter(Vec::<FileUnit>::new()), stage, token);
//! ```

pub use crate::cancellation::CancellationToken;
pub use crate::config::{Config, ConfigBuilder, Mode};
pub use crate::core_types::{Contents, FileUnit};
pub use crate::errors::{Error, Result};
pub use crate::formatter::{CommandFormatter, FormatOutput, Formatter, FormatterError};
pub use crate::options::FormatOptions;
pub use crate::resolver::{ConfigResolver, FsConfigResolver, NoConfigResolver};
pub use crate::stage::{check, pipe, prettier, CheckStage, PrettierStage, StageBuilder, Transform};
pub use crate::{discover, run};
