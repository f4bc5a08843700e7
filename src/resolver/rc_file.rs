// src/resolver/rc_file.rs

//! Finding, reading and interpreting Prettier config files.

use super::patterns::matches_pattern;
use super::ConfigError;
use crate::constants::CONFIG_FILE_NAMES;
use crate::core_types::relative_path;
use crate::options::FormatOptions;
use log::{debug, warn};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Searches `start_dir` and its ancestors for a config file.
///
/// Returns the first hit, nearest directory first. A `package.json` without a
/// `"prettier"` key does not count as a hit.
pub async fn find_config_file(start_dir: &Path) -> Result<Option<(PathBuf, Value)>, ConfigError> {
    for dir in start_dir.ancestors() {
        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            let is_file = tokio::fs::metadata(&candidate)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(value) = load_config_file(&candidate).await? {
                return Ok(Some((candidate, value)));
            }
            debug!("{} holds no formatter config, continuing.", candidate.display());
        }
    }
    Ok(None)
}

/// Reads one config file, choosing the parser from its name.
///
/// Returns `Ok(None)` for a `package.json` without a `"prettier"` object.
pub async fn load_config_file(path: &Path) -> Result<Option<Value>, ConfigError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    if file_name == "package.json" {
        let package: Value = parse_json(&contents, path)?;
        return Ok(match package.get("prettier") {
            Some(Value::Object(config)) => Some(Value::Object(config.clone())),
            Some(Value::String(shared)) => {
                warn!(
                    "{} points at shared config '{}', which cannot be loaded; ignoring.",
                    path.display(),
                    shared
                );
                None
            }
            _ => None,
        });
    }

    let value = match extension.as_str() {
        "json" => parse_json(&contents, path)?,
        "yaml" | "yml" => parse_yaml(&contents, path)?,
        "toml" => toml::from_str::<Value>(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?,
        // `.prettierrc` and other extensionless files: JSON, else YAML.
        _ => match serde_json::from_str::<Value>(&contents) {
            Ok(value) => value,
            Err(_) => parse_yaml(&contents, path)?,
        },
    };

    match value {
        Value::Object(_) => Ok(Some(value)),
        Value::Null => Ok(Some(Value::Object(Map::new()))),
        other => Err(ConfigError::Parse {
            path: path.to_path_buf(),
            message: format!("expected an object of options, found {}", kind_of(&other)),
        }),
    }
}

/// Turns a loaded config into the options for one file, applying matching
/// `overrides` blocks in order.
pub(super) fn options_for_file(
    value: Value,
    config_dir: &Path,
    file_path: &Path,
    config_path: &Path,
) -> Result<FormatOptions, ConfigError> {
    let Value::Object(mut config) = value else {
        return Err(ConfigError::Parse {
            path: config_path.to_path_buf(),
            message: "expected an object of options".to_string(),
        });
    };

    let overrides = config.remove("overrides");
    let mut options = FormatOptions::from(config);

    let Some(overrides) = overrides else {
        return Ok(options);
    };
    let Value::Array(overrides) = overrides else {
        return Err(ConfigError::Parse {
            path: config_path.to_path_buf(),
            message: "`overrides` must be an array".to_string(),
        });
    };

    let relative = relative_path(config_dir, file_path);
    for block in &overrides {
        let files = patterns_of(block.get("files"));
        let excluded = patterns_of(block.get("excludeFiles"));
        let applies = files.iter().any(|p| matches_pattern(p, &relative))
            && !excluded.iter().any(|p| matches_pattern(p, &relative));
        if !applies {
            continue;
        }
        if let Some(Value::Object(block_options)) = block.get("options") {
            debug!(
                "Applying override {:?} to {}",
                files,
                file_path.display()
            );
            options.merge(&FormatOptions::from(block_options.clone()));
        }
    }
    Ok(options)
}

fn patterns_of(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(pattern)) => vec![pattern.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

fn parse_json(contents: &str, path: &Path) -> Result<Value, ConfigError> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn parse_yaml(contents: &str, path: &Path) -> Result<Value, ConfigError> {
    serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
