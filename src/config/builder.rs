// src/config/builder.rs

use super::{
    parsing::parse_options,
    path_resolve::{current_dir, resolve_input_path},
    validation::validate_builder_options,
    Config, DiscoveryConfig, Mode,
};
use crate::cli::Cli;
use crate::constants::{CONFIG_OPTION, DEFAULT_FORMATTER_PROGRAM, EDITORCONFIG_OPTION};
use crate::errors::Result;
use crate::options::FormatOptions;
use std::path::PathBuf;

/// Builds a [`Config`] programmatically or from parsed CLI arguments.
///
/// ```
/// use prettier_pipe::config::{ConfigBuilder, Mode};
///
/// let config = ConfigBuilder::new()
///     .input(".")
///     .mode(Mode::Check)
///     .option("singleQuote=true")
///     .build()
///     .unwrap();
/// assert_eq!(config.mode, Mode::Check);
/// assert_eq!(config.options.get_bool("singleQuote"), Some(true));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    pub(super) inputs: Vec<String>,
    pub(super) mode: Mode,
    pub(super) dest: Option<String>,
    pub(super) formatter_program: String,
    pub(super) formatter_args: Vec<String>,
    pub(super) options: FormatOptions,
    pub(super) option_pairs: Vec<String>,
    pub(super) config_file: Option<String>,
    pub(super) use_config: bool,
    pub(super) editorconfig: bool,
    pub(super) recursive: bool,
    pub(super) use_gitignore: bool,
    pub(super) keep_going: bool,
    pub(super) cwd: Option<PathBuf>,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            mode: Mode::Write,
            dest: None,
            formatter_program: DEFAULT_FORMATTER_PROGRAM.to_string(),
            formatter_args: Vec::new(),
            options: FormatOptions::new(),
            option_pairs: Vec::new(),
            config_file: None,
            use_config: true,
            editorconfig: false,
            recursive: true,
            use_gitignore: true,
            keep_going: false,
            cwd: None,
        }
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from parsed command-line arguments.
    pub fn from_cli(cli: Cli) -> Self {
        let mode = if cli.check {
            Mode::Check
        } else if cli.list_different {
            Mode::ListDifferent
        } else {
            Mode::Write
        };
        Self {
            inputs: cli.inputs,
            mode,
            dest: cli.dest,
            formatter_program: cli.formatter,
            formatter_args: cli.formatter_args,
            options: FormatOptions::new(),
            option_pairs: cli.options,
            config_file: cli.config,
            use_config: !cli.no_config,
            editorconfig: cli.editorconfig,
            recursive: !cli.no_recursive,
            use_gitignore: !cli.no_gitignore,
            keep_going: cli.keep_going,
            cwd: None,
        }
    }

    /// Adds an input file or directory.
    pub fn input(mut self, path: impl Into<String>) -> Self {
        self.inputs.push(path.into());
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn dest(mut self, dir: impl Into<String>) -> Self {
        self.dest = Some(dir.into());
        self
    }

    pub fn formatter(mut self, program: impl Into<String>) -> Self {
        self.formatter_program = program.into();
        self
    }

    pub fn formatter_arg(mut self, arg: impl Into<String>) -> Self {
        self.formatter_args.push(arg.into());
        self
    }

    /// Sets the explicit formatter options. `KEY=VALUE` pairs added with
    /// [`option`](Self::option) are applied on top.
    pub fn options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    /// Adds one `KEY=VALUE` formatter option, parsed at build time.
    pub fn option(mut self, pair: impl Into<String>) -> Self {
        self.option_pairs.push(pair.into());
        self
    }

    pub fn config_file(mut self, path: impl Into<String>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn use_config(mut self, use_config: bool) -> Self {
        self.use_config = use_config;
        self
    }

    pub fn editorconfig(mut self, editorconfig: bool) -> Self {
        self.editorconfig = editorconfig;
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn use_gitignore(mut self, use_gitignore: bool) -> Self {
        self.use_gitignore = use_gitignore;
        self
    }

    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Directory reported paths are relative to. Defaults to the process working directory.
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Validates the settings and resolves every path.
    pub fn build(self) -> Result<Config> {
        validate_builder_options(&self)?;

        let mut options = self.options;
        options.merge(&parse_options(&self.option_pairs)?);
        if let Some(config_file) = &self.config_file {
            let resolved = resolve_input_path(config_file)?;
            options.insert(CONFIG_OPTION, resolved.to_string_lossy().into_owned());
        }
        if self.editorconfig {
            options.insert(EDITORCONFIG_OPTION, true);
        }

        let inputs = self
            .inputs
            .iter()
            .map(|input| resolve_input_path(input))
            .collect::<Result<Vec<_>>>()?;

        let cwd = match self.cwd {
            Some(cwd) => cwd,
            None => current_dir()?,
        };

        Ok(Config {
            inputs,
            mode: self.mode,
            dest: self.dest.map(PathBuf::from),
            formatter_program: self.formatter_program,
            formatter_args: self.formatter_args,
            options,
            use_config: self.use_config,
            keep_going: self.keep_going,
            discovery: DiscoveryConfig {
                recursive: self.recursive,
                use_gitignore: self.use_gitignore,
            },
            cwd,
        })
    }
}

impl TryFrom<Cli> for Config {
    type Error = anyhow::Error;

    fn try_from(cli: Cli) -> std::result::Result<Self, Self::Error> {
        Ok(ConfigBuilder::from_cli(cli).build()?)
    }
}
