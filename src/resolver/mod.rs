//! Resolves the project-level formatter configuration for a file.
//!
//! The stages consume this as a single async lookup keyed by file path. The
//! filesystem implementation searches from the file's directory upward for a
//! Prettier config file; the nearest one wins, and its `overrides` blocks are
//! applied when they match the file. With the `editorconfig` option set,
//! `.editorconfig` settings are layered underneath.

use crate::constants::{CONFIG_OPTION, EDITORCONFIG_OPTION};
use crate::options::FormatOptions;
use async_trait::async_trait;
use log::debug;
use std::path::{Path, PathBuf};
use thiserror::Error;

mod editorconfig;
mod patterns;
mod rc_file;

pub use editorconfig::{editorconfig_to_options, resolve_editorconfig};
pub use rc_file::{find_config_file, load_config_file};

/// Failures reading or parsing a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse '{}': {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

/// Looks up the project configuration for a file.
#[async_trait]
pub trait ConfigResolver: Send + Sync {
    /// Returns the project options for `path`, or `None` when no config applies.
    ///
    /// `options` are the options given to the stage; resolvers may read
    /// resolution switches (such as `editorconfig`) from them.
    async fn resolve(
        &self,
        path: &Path,
        options: &FormatOptions,
    ) -> Result<Option<FormatOptions>, ConfigError>;
}

/// Resolves configuration from files on disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsConfigResolver;

#[async_trait]
impl ConfigResolver for FsConfigResolver {
    async fn resolve(
        &self,
        path: &Path,
        options: &FormatOptions,
    ) -> Result<Option<FormatOptions>, ConfigError> {
        let start_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let rc = match options.get_str(CONFIG_OPTION) {
            Some(explicit) => {
                let config_path = PathBuf::from(explicit);
                debug!("Using explicit config file: {}", config_path.display());
                let value = load_config_file(&config_path).await?;
                value.map(|v| (config_path, v))
            }
            None => find_config_file(start_dir).await?,
        };

        let rc_options = match rc {
            Some((config_path, value)) => {
                debug!(
                    "Resolved config for {} from {}",
                    path.display(),
                    config_path.display()
                );
                let config_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
                Some(rc_file::options_for_file(value, config_dir, path, &config_path)?)
            }
            None => None,
        };

        let editor_options = if options.get_bool(EDITORCONFIG_OPTION) == Some(true) {
            resolve_editorconfig(path).await?
        } else {
            None
        };

        Ok(match (editor_options, rc_options) {
            (None, None) => None,
            (editor, rc) => {
                let mut merged = editor.unwrap_or_default();
                if let Some(rc) = rc {
                    merged.merge(&rc);
                }
                Some(merged)
            }
        })
    }
}

/// A resolver that never finds any project configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoConfigResolver;

#[async_trait]
impl ConfigResolver for NoConfigResolver {
    async fn resolve(
        &self,
        _path: &Path,
        _options: &FormatOptions,
    ) -> Result<Option<FormatOptions>, ConfigError> {
        Ok(None)
    }
}
