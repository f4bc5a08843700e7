// src/resolver/editorconfig.rs

//! `.editorconfig` lookup and its mapping onto formatter options.

use super::patterns::matches_pattern;
use super::ConfigError;
use crate::constants::EDITORCONFIG_FILE_NAME;
use crate::core_types::relative_path;
use crate::options::FormatOptions;
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One parsed `.editorconfig` file.
#[derive(Debug, Default)]
struct EditorConfigFile {
    dir: PathBuf,
    root: bool,
    sections: Vec<(String, Vec<(String, String)>)>,
}

/// Collects the `.editorconfig` properties that apply to `path` and maps them
/// onto formatter options.
///
/// Files are read from the file's directory upward until one declares
/// `root = true`. Closer files and later sections win.
pub async fn resolve_editorconfig(path: &Path) -> Result<Option<FormatOptions>, ConfigError> {
    let start_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut chain = Vec::new();
    for dir in start_dir.ancestors() {
        let candidate = dir.join(EDITORCONFIG_FILE_NAME);
        let contents = match tokio::fs::read_to_string(&candidate).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(source) => {
                return Err(ConfigError::Io {
                    path: candidate,
                    source,
                })
            }
        };
        debug!("Read {}", candidate.display());
        let parsed = parse_editorconfig(&contents, dir);
        let is_root = parsed.root;
        chain.push(parsed);
        if is_root {
            break;
        }
    }

    if chain.is_empty() {
        return Ok(None);
    }

    // Outermost first, so nearer files overwrite.
    let mut properties = HashMap::new();
    for file in chain.iter().rev() {
        let relative = relative_path(&file.dir, path);
        for (pattern, pairs) in &file.sections {
            if !matches_pattern(pattern, &relative) {
                continue;
            }
            for (key, value) in pairs {
                properties.insert(key.clone(), value.clone());
            }
        }
    }

    let options = editorconfig_to_options(&properties);
    Ok(if options.is_empty() { None } else { Some(options) })
}

fn parse_editorconfig(contents: &str, dir: &Path) -> EditorConfigFile {
    let mut file = EditorConfigFile {
        dir: dir.to_path_buf(),
        ..Default::default()
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            file.sections.push((section.trim().to_string(), Vec::new()));
            continue;
        }
        let Some((key, value)) = line.split_once('=').or_else(|| line.split_once(':')) else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim().to_ascii_lowercase();
        match file.sections.last_mut() {
            Some((_, pairs)) => pairs.push((key, value)),
            None if key == "root" => file.root = value == "true",
            None => {}
        }
    }
    file
}

/// Maps editorconfig properties (lowercased keys and values) to formatter options.
///
/// ```
/// use prettier_pipe::resolver::editorconfig_to_options;
/// use std::collections::HashMap;
///
/// let props = HashMap::from([
///     ("indent_style".to_string(), "space".to_string()),
///     ("indent_size".to_string(), "4".to_string()),
///     ("max_line_length".to_string(), "100".to_string()),
/// ]);
/// let options = editorconfig_to_options(&props);
/// assert_eq!(options.get_bool("useTabs"), Some(false));
/// assert_eq!(options.get("tabWidth"), Some(&serde_json::json!(4)));
/// assert_eq!(options.get("printWidth"), Some(&serde_json::json!(100)));
/// ```
pub fn editorconfig_to_options(properties: &HashMap<String, String>) -> FormatOptions {
    let get = |key: &str| properties.get(key).map(String::as_str);
    let number = |key: &str| get(key).and_then(|v| v.parse::<u64>().ok());

    let mut options = FormatOptions::new();

    let use_tabs = match (get("indent_style"), get("indent_size")) {
        (Some("tab"), _) | (None, Some("tab")) => Some(true),
        (Some("space"), _) => Some(false),
        _ => None,
    };
    if let Some(use_tabs) = use_tabs {
        options.insert("useTabs", use_tabs);
    }

    let tab_width = if use_tabs == Some(true) {
        number("tab_width").or_else(|| number("indent_size"))
    } else {
        number("indent_size").or_else(|| number("tab_width"))
    };
    if let Some(width) = tab_width {
        options.insert("tabWidth", width);
    }

    if let Some(width) = number("max_line_length") {
        options.insert("printWidth", width);
    }

    match get("quote_type") {
        Some("single") => {
            options.insert("singleQuote", true);
        }
        Some("double") => {
            options.insert("singleQuote", false);
        }
        _ => {}
    }

    if let Some(eol @ ("lf" | "crlf" | "cr")) = get("end_of_line") {
        options.insert("endOfLine", eol);
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn props(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_tab_width_prefers_tab_width_with_tabs() {
        let options = editorconfig_to_options(&props(&[
            ("indent_style", "tab"),
            ("indent_size", "2"),
            ("tab_width", "8"),
        ]));
        assert_eq!(options.get_bool("useTabs"), Some(true));
        assert_eq!(options.get("tabWidth"), Some(&json!(8)));
    }

    #[test]
    fn test_indent_size_tab() {
        let options = editorconfig_to_options(&props(&[("indent_size", "tab"), ("tab_width", "4")]));
        assert_eq!(options.get_bool("useTabs"), Some(true));
        assert_eq!(options.get("tabWidth"), Some(&json!(4)));
    }

    #[test]
    fn test_unknown_values_are_ignored() {
        let options = editorconfig_to_options(&props(&[
            ("max_line_length", "off"),
            ("end_of_line", "native"),
            ("charset", "utf-8"),
        ]));
        assert!(options.is_empty());
    }

    #[test]
    fn test_parse_preamble_and_sections() {
        let parsed = parse_editorconfig(
            "# top\nroot = true\n\n[*.{js,ts}]\nIndent_Style = Space\n; note\n[Makefile]\nindent_style: tab\n",
            Path::new("/w"),
        );
        assert!(parsed.root);
        assert_eq!(parsed.sections.len(), 2);
        assert_eq!(parsed.sections[0].0, "*.{js,ts}");
        assert_eq!(
            parsed.sections[0].1,
            vec![("indent_style".to_string(), "space".to_string())]
        );
        assert_eq!(
            parsed.sections[1].1,
            vec![("indent_style".to_string(), "tab".to_string())]
        );
    }

    #[tokio::test]
    async fn test_nearer_file_wins_until_root() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let outer = temp.path().join("outer");
        let inner = outer.join("inner");
        fs::create_dir_all(&inner)?;
        // Above the root file; must be ignored.
        fs::write(temp.path().join(".editorconfig"), "[*]\nmax_line_length = 40\n")?;
        fs::write(
            outer.join(".editorconfig"),
            "root = true\n[*]\nindent_style = space\nindent_size = 2\n",
        )?;
        fs::write(inner.join(".editorconfig"), "[*.js]\nindent_size = 4\n")?;

        let options = resolve_editorconfig(&inner.join("a.js"))
            .await?
            .expect("editorconfig should apply");
        assert_eq!(options.get_bool("useTabs"), Some(false));
        assert_eq!(options.get("tabWidth"), Some(&json!(4)));
        assert_eq!(options.get("printWidth"), None);

        let css = resolve_editorconfig(&inner.join("a.css"))
            .await?
            .expect("editorconfig should apply");
        assert_eq!(css.get("tabWidth"), Some(&json!(2)));
        Ok(())
    }

    #[tokio::test]
    async fn test_anchored_section() -> anyhow::Result<()> {
        let temp = tempdir()?;
        fs::create_dir_all(temp.path().join("lib"))?;
        fs::write(
            temp.path().join(".editorconfig"),
            "root = true\n[lib/*.js]\nend_of_line = crlf\n",
        )?;

        let hit = resolve_editorconfig(&temp.path().join("lib").join("a.js")).await?;
        assert_eq!(hit.and_then(|o| o.get_str("endOfLine").map(str::to_string)), Some("crlf".to_string()));

        let miss = resolve_editorconfig(&temp.path().join("a.js")).await?;
        assert!(miss.is_none());
        Ok(())
    }
}
