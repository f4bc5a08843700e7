// src/config/validation.rs

use super::{ConfigBuilder, Mode};
use crate::errors::{Error, Result};

/// Validates combinations of options that clap cannot express for library callers.
pub(super) fn validate_builder_options(builder: &ConfigBuilder) -> Result<()> {
    if builder.inputs.is_empty() {
        return Err(Error::Config("at least one input path is required".to_string()));
    }
    if builder.dest.is_some() && builder.mode != Mode::Write {
        return Err(Error::Config(
            "--dest can only be used when writing files, not with --check or --list-different"
                .to_string(),
        ));
    }
    if builder.config_file.is_some() && !builder.use_config {
        return Err(Error::Config(
            "Cannot use --config <FILE> and --no-config simultaneously.".to_string(),
        ));
    }
    if builder.formatter_program.trim().is_empty() {
        return Err(Error::Config("--formatter must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dest_with_check_rejected() {
        let builder = ConfigBuilder::new()
            .input(".")
            .mode(Mode::Check)
            .dest("out");
        let err = validate_builder_options(&builder).unwrap_err();
        assert!(err.to_string().contains("--dest"));
    }

    #[test]
    fn test_config_with_no_config_rejected() {
        let builder = ConfigBuilder::new()
            .input(".")
            .config_file(".prettierrc")
            .use_config(false);
        let err = validate_builder_options(&builder).unwrap_err();
        assert!(err.to_string().contains("simultaneously"));
    }

    #[test]
    fn test_no_inputs_rejected() {
        assert!(validate_builder_options(&ConfigBuilder::new()).is_err());
    }

    #[test]
    fn test_valid_options_pass() -> Result<()> {
        validate_builder_options(&ConfigBuilder::new().input(".").dest("out"))?;
        validate_builder_options(&ConfigBuilder::new().input(".").mode(Mode::Check))?;
        Ok(())
    }
}
