// src/config/parsing.rs

use crate::errors::{Error, Result};
use crate::options::FormatOptions;
use serde_json::Value;

/// Parses one `KEY=VALUE` formatter option.
///
/// The value is read as JSON when it parses (`true`, `4`, `["a"]`), otherwise
/// it is kept as a plain string.
///
/// ```
/// use prettier_pipe::config::parse_option_pair;
/// use serde_json::json;
///
/// assert_eq!(parse_option_pair("semi=false").unwrap(), ("semi".to_string(), json!(false)));
/// assert_eq!(parse_option_pair("trailingComma=all").unwrap(), ("trailingComma".to_string(), json!("all")));
/// ```
pub fn parse_option_pair(pair: &str) -> Result<(String, Value)> {
    let (key, raw) = pair
        .split_once('=')
        .ok_or_else(|| Error::Config(format!("Invalid option '{}': expected KEY=VALUE", pair)))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(Error::Config(format!(
            "Invalid option '{}': the key is empty",
            pair
        )));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// Parses a list of `KEY=VALUE` options. Later duplicates win.
pub fn parse_options<S: AsRef<str>>(pairs: &[S]) -> Result<FormatOptions> {
    let mut options = FormatOptions::new();
    for pair in pairs {
        let (key, value) = parse_option_pair(pair.as_ref())?;
        options.insert(key, value);
    }
    Ok(options)
}
