// src/resolver/patterns.rs

//! Glob matching shared by config `overrides` and `.editorconfig` sections.

use crate::core_types::to_slash;
use glob::{MatchOptions, Pattern};
use std::path::Path;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Expands `{a,b}` alternations, which the `glob` crate does not support.
///
/// Groups may repeat and nest: `*.{js,{ts,tsx}}` yields three patterns.
pub(crate) fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };

    // Find the matching close brace and the top-level commas inside the group.
    let mut depth = 0usize;
    let mut close = None;
    let mut splits = Vec::new();
    for (i, ch) in pattern[open..].char_indices() {
        let i = open + i;
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            ',' if depth == 1 => splits.push(i),
            _ => {}
        }
    }

    let Some(close) = close else {
        // Unbalanced; treat the brace literally.
        return vec![pattern.to_string()];
    };
    if splits.is_empty() {
        // No alternatives: the group stays literal, later groups still expand.
        let literal = &pattern[..=close];
        return expand_braces(&pattern[close + 1..])
            .into_iter()
            .map(|rest| format!("{}{}", literal, rest))
            .collect();
    }

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];
    let mut bounds = vec![open];
    bounds.extend(&splits);
    bounds.push(close);

    bounds
        .windows(2)
        .flat_map(|w| {
            let alternative = &pattern[w[0] + 1..w[1]];
            expand_braces(&format!("{}{}{}", prefix, alternative, suffix))
        })
        .collect()
}

/// Matches `relative` (a path relative to the config file's directory)
/// against one pattern.
///
/// Patterns without a `/` match the file name at any depth; others are
/// anchored at the config directory.
pub(crate) fn matches_pattern(pattern: &str, relative: &Path) -> bool {
    let anchored = pattern.contains('/');
    let pattern = pattern.strip_prefix('/').unwrap_or(pattern);

    let candidate = if anchored {
        to_slash(relative)
    } else {
        match relative.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => return false,
        }
    };

    expand_braces(pattern)
        .iter()
        .any(|p| match Pattern::new(p) {
            Ok(glob) => glob.matches_with(&candidate, MATCH_OPTIONS),
            Err(e) => {
                log::warn!("Invalid glob pattern '{}': {}", p, e);
                false
            }
        })
}
